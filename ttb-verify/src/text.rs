//! Token normalization
//!
//! Two canonical forms are used for comparisons:
//! - [`normalize`]: lookup key, lowercase ASCII alphanumerics only
//! - [`normalize_for_pattern`]: regex input, punctuation preserved ("alc.", "5%")

/// Lowercase and drop everything outside `[a-z0-9]`
pub fn normalize(text: &str) -> String {
    text.chars()
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}

/// Trim surrounding whitespace and lowercase
pub fn normalize_for_pattern(text: &str) -> String {
    text.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_punctuation_and_case() {
        assert_eq!(normalize("WARNING:"), "warning");
        assert_eq!(normalize("General,"), "general");
        assert_eq!(normalize("(1)"), "1");
        assert_eq!(normalize("12 FL. OZ."), "12floz");
        assert_eq!(normalize("Brewing Co."), "brewingco");
    }

    #[test]
    fn test_normalize_drops_non_ascii() {
        assert_eq!(normalize("Café"), "caf");
        assert_eq!(normalize("—"), "");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let samples = [
            "GOVERNMENT",
            "5.0% ALC/VOL",
            "  mixed Case 42 ",
            "Ünïcödé-Straße",
            "",
            "!!!",
        ];
        for sample in samples {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", sample);
            assert!(
                once.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()),
                "unexpected characters in {:?}",
                once
            );
        }
    }

    #[test]
    fn test_normalize_for_pattern_keeps_punctuation() {
        assert_eq!(normalize_for_pattern("  ALC. 5.0% "), "alc. 5.0%");
        assert_eq!(normalize_for_pattern("Vol."), "vol.");
    }
}
