//! Core Types for Label Verification
//!
//! Word observations flow through three stages:
//! - **OCR scans:** `WordObservation` lists, one per engine (A, B)
//! - **Fusion:** `FusedWord` records reconciled from matching pairs
//! - **Verification:** `ElementOutcome` per required element, folded into a `LabelResult`

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Geometry and Words
// ============================================================================

/// Top-left pixel coordinate of a word box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Euclidean pixel distance
    ///
    /// Computed in `f64` so coordinates anywhere in the `i64` range are safe.
    pub fn distance(&self, other: &Point) -> f64 {
        let dx = self.x as f64 - other.x as f64;
        let dy = self.y as f64 - other.y as f64;
        (dx * dx + dy * dy).sqrt()
    }

    /// Horizontal gap, `|x - other.x|`
    pub fn abs_dx(&self, other: &Point) -> u64 {
        self.x.abs_diff(other.x)
    }

    /// Vertical gap, `|y - other.y|`
    pub fn abs_dy(&self, other: &Point) -> u64 {
        self.y.abs_diff(other.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Which OCR engine produced an observation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OcrSource {
    A,
    B,
}

impl fmt::Display for OcrSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OcrSource::A => write!(f, "A"),
            OcrSource::B => write!(f, "B"),
        }
    }
}

/// Read-only view over anything that carries a recognized word
///
/// Clustering, lookup and pattern search run uniformly over raw scans
/// and the fused set through this trait.
pub trait WordRecord {
    fn text(&self) -> &str;
    fn location(&self) -> Point;
    fn confidence(&self) -> f64;
}

/// One word recognized by one OCR engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordObservation {
    pub text: String,
    pub location: Point,
    pub confidence: f64,
    pub source: OcrSource,
}

impl WordObservation {
    pub fn new(text: impl Into<String>, x: i64, y: i64, confidence: f64, source: OcrSource) -> Self {
        Self {
            text: text.into(),
            location: Point::new(x, y),
            confidence,
            source,
        }
    }
}

impl WordRecord for WordObservation {
    fn text(&self) -> &str {
        &self.text
    }

    fn location(&self) -> Point {
        self.location
    }

    fn confidence(&self) -> f64 {
        self.confidence
    }
}

/// Reconciled representative of a matched (A, B) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FusedWord {
    pub text: String,
    pub location: Point,
    pub confidence: f64,
}

impl WordRecord for FusedWord {
    fn text(&self) -> &str {
        &self.text
    }

    fn location(&self) -> Point {
        self.location
    }

    fn confidence(&self) -> f64 {
        self.confidence
    }
}

/// Owned copy of whichever record satisfied a lookup or pattern
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocatedWord {
    pub text: String,
    pub location: Point,
    pub confidence: f64,
}

impl LocatedWord {
    pub fn from_record<W: WordRecord + ?Sized>(record: &W) -> Self {
        Self {
            text: record.text().to_string(),
            location: record.location(),
            confidence: record.confidence(),
        }
    }
}

/// Identity field lookup result: present only when every token resolved
pub type FieldMatch = Option<Vec<LocatedWord>>;

// ============================================================================
// Elements and Outcomes
// ============================================================================

/// Elements verified on every label, in aggregation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Element {
    BrandName,
    Class,
    FancifulName,
    BottlerName,
    BottlerAddress,
    AlcoholContent,
    NetContent,
    GovernmentWarning,
}

impl Element {
    pub const ALL: [Element; 8] = [
        Element::BrandName,
        Element::Class,
        Element::FancifulName,
        Element::BottlerName,
        Element::BottlerAddress,
        Element::AlcoholContent,
        Element::NetContent,
        Element::GovernmentWarning,
    ];

    /// Position in the outcome list
    pub fn index(self) -> usize {
        self as usize
    }

    /// Optional elements never fail a label
    pub fn is_optional(self) -> bool {
        matches!(self, Element::FancifulName)
    }
}

/// Uniform `(found, location)` result for every verified element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementOutcome {
    pub found: bool,
    pub location: Option<Point>,
}

impl ElementOutcome {
    pub fn found(at: Point) -> Self {
        Self {
            found: true,
            location: Some(at),
        }
    }

    pub fn missing() -> Self {
        Self {
            found: false,
            location: None,
        }
    }
}

impl From<&FieldMatch> for ElementOutcome {
    /// Anchor a found field at its first token
    fn from(field: &FieldMatch) -> Self {
        match field.as_ref().and_then(|words| words.first()) {
            Some(first) => ElementOutcome::found(first.location),
            None => ElementOutcome::missing(),
        }
    }
}

// ============================================================================
// Label Input and Result
// ============================================================================

/// Application-supplied reference values for the five identity fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelFields {
    pub brand_name: Option<String>,
    pub class: Option<String>,
    pub fanciful_name: Option<String>,
    pub bottler_name: Option<String>,
    pub bottler_address: Option<String>,
}

impl LabelFields {
    /// Reference phrases in element order (brand name .. bottler address)
    pub fn phrases(&self) -> [Option<&str>; 5] {
        [
            self.brand_name.as_deref(),
            self.class.as_deref(),
            self.fanciful_name.as_deref(),
            self.bottler_name.as_deref(),
            self.bottler_address.as_deref(),
        ]
    }
}

/// Overall label status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelStatus {
    Passed,
    Failed,
    Error,
}

impl fmt::Display for LabelStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelStatus::Passed => write!(f, "Passed"),
            LabelStatus::Failed => write!(f, "Failed"),
            LabelStatus::Error => write!(f, "Error"),
        }
    }
}

/// Final verification result for one label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelResult {
    pub status: LabelStatus,
    pub failures: Vec<String>,
}

impl LabelResult {
    pub fn passed() -> Self {
        Self {
            status: LabelStatus::Passed,
            failures: Vec::new(),
        }
    }

    pub fn failed(failures: Vec<String>) -> Self {
        Self {
            status: LabelStatus::Failed,
            failures,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: LabelStatus::Error,
            failures: vec![message.into()],
        }
    }

    /// Human-readable status line, e.g. `Failed: brand name, net content`
    pub fn display_status(&self) -> String {
        match self.status {
            LabelStatus::Passed => "Passed".to_string(),
            LabelStatus::Failed | LabelStatus::Error => {
                format!("{}: {}", self.status, self.failures.join(", "))
            }
        }
    }
}
