//! Regulatory text patterns
//!
//! Compiled once and shared by the locator and the verifier. Patterns
//! run against [`normalize_for_pattern`](crate::text::normalize_for_pattern)
//! output unless noted, so they are written lowercase.

use once_cell::sync::Lazy;
use regex::Regex;

/// Bare percentage, e.g. `5%`, `12.5%`
pub static ALCOHOL_PERCENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+(\.\d+)?%").expect("valid alcohol percent pattern"));

/// Number followed by a U.S. volume unit, searched on joined source text
pub static NET_CONTENT_PHRASE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b\d+(\.\d+)?\s*(fl\.?\s*oz\.?|pt\.?|pints?|qt\.?|quarts?|gal\.?|gallons?)\b",
    )
    .expect("valid net content pattern")
});

/// "alc", "alc.", "alcohol"
pub static ALCOHOL_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"alc(ohol)?\.?").expect("valid alcohol marker pattern"));

/// "vol", "vol.", "volume"
pub static VOLUME_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"vol(ume)?\.?").expect("valid volume marker pattern"));

/// Percentage inside an alcohol statement, e.g. `5%`, `5.%`, `5.0%`
pub static STATEMENT_PERCENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+\.?\d*%").expect("valid statement percent pattern"));

/// Unit substrings accepted as net-content evidence
pub const NET_UNITS: &[&str] = &[
    "fl", "fl.", "oz", "oz.", "floz",
    "pint", "pt", "pt.",
    "quart", "qt", "qt.",
    "gallon", "gal", "gal.",
];

pub fn has_digit(word: &str) -> bool {
    word.chars().any(|c| c.is_ascii_digit())
}

pub fn has_net_unit(word: &str) -> bool {
    let lower = word.to_lowercase();
    NET_UNITS.iter().any(|unit| lower.contains(unit))
}

/// A single token carrying both the quantity and its unit, e.g. "12FLOZ"
pub fn is_net_content_token(word: &str) -> bool {
    has_digit(word) && has_net_unit(word)
}
