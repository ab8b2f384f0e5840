//! Government health warning reference text
//!
//! Statutory statement required on alcohol beverage labels
//! (27 U.S.C. 215, 27 CFR 16.21). Tokens keep their printed
//! capitalization and punctuation; verification compares them exactly.
//! New revisions are added as new tables and selected in
//! [`WarningText::current`].

/// A revision of the required warning text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WarningText {
    /// Regulation the tokens were transcribed from
    pub revision: &'static str,
    /// Whitespace tokens in printed order
    pub tokens: &'static [&'static str],
}

/// 27 CFR 16.21 wording
pub const GOVERNMENT_WARNING_27_CFR_16_21: WarningText = WarningText {
    revision: "27 CFR 16.21",
    tokens: &[
        "GOVERNMENT", "WARNING:", "(1)", "According", "to", "the", "Surgeon",
        "General,", "women", "should", "not", "drink", "alcoholic", "beverages",
        "during", "pregnancy", "because", "of", "the", "risk", "of", "birth",
        "defects.", "(2)", "Consumption", "of", "alcoholic", "beverages",
        "impairs", "your", "ability", "to", "drive", "a", "car", "or",
        "operate", "machinery,", "and", "may", "cause", "health", "problems.",
    ],
};

impl WarningText {
    /// Revision in force
    pub fn current() -> &'static WarningText {
        &GOVERNMENT_WARNING_27_CFR_16_21
    }

    /// Printed statement, tokens joined by single spaces
    pub fn statement(&self) -> String {
        self.tokens.join(" ")
    }
}
