//! OCR capability providers
//!
//! The verification core never runs recognition itself. Two independent
//! providers (slots A and B) each turn a label image into a list of
//! `(word, location, confidence)` observations; the pipeline sorts each
//! list into reading order before fusion.
//!
//! Providers are built once per process and shared. A provider that
//! cannot serve concurrent calls is wrapped in [`SerializedProvider`].

pub mod tesseract;
pub mod transcript;

pub use tesseract::TesseractCliProvider;
pub use transcript::TranscriptProvider;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;
use tokio::sync::Mutex;

use crate::error::VerifyResult;
use crate::types::{OcrSource, WordObservation};

/// OCR capability: image in, word observations out
#[async_trait]
pub trait OcrProvider: Send + Sync {
    /// Provider identifier for logs and error messages
    fn name(&self) -> &str;

    /// Recognize words in `image`, tagging each with `source`
    ///
    /// # Errors
    /// Any failure is reported for this label only; the batch continues.
    async fn scan(&self, image: &Path, source: OcrSource) -> VerifyResult<Vec<WordObservation>>;
}

/// Serializes calls to a provider that cannot run inference concurrently
pub struct SerializedProvider<P> {
    inner: P,
    gate: Mutex<()>,
}

impl<P: OcrProvider> SerializedProvider<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            gate: Mutex::new(()),
        }
    }
}

#[async_trait]
impl<P: OcrProvider> OcrProvider for SerializedProvider<P> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn scan(&self, image: &Path, source: OcrSource) -> VerifyResult<Vec<WordObservation>> {
        let _guard = self.gate.lock().await;
        self.inner.scan(image, source).await
    }
}

/// Sort top-to-bottom, then left-to-right (stable)
pub fn sort_reading_order(words: &mut [WordObservation]) {
    words.sort_by_key(|w| (w.location.y, w.location.x));
}

// ============================================================================
// Line-level detections
// ============================================================================

/// Letter-spaced text such as "C O M P A N Y"
static SPACED_LETTERS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z] [A-Za-z] ").expect("valid spaced letters pattern"));

/// One text line with its bounding polygon, as line-level engines report it
#[derive(Debug, Clone, PartialEq)]
pub struct LineDetection {
    pub text: String,
    pub polygon: Vec<[f64; 2]>,
    pub confidence: f64,
}

/// Break line detections into word observations
///
/// Every word inherits the polygon's top-left corner and the line's
/// confidence. Letter-spaced lines stay whole so "C O M P A N Y" is not
/// shattered into single letters.
pub fn split_line_detections(lines: &[LineDetection], source: OcrSource) -> Vec<WordObservation> {
    let mut words = Vec::new();
    for line in lines {
        let x = line.polygon.iter().map(|p| p[0]).fold(f64::INFINITY, f64::min);
        let y = line.polygon.iter().map(|p| p[1]).fold(f64::INFINITY, f64::min);
        let (x, y) = if x.is_finite() && y.is_finite() {
            (x.floor() as i64, y.floor() as i64)
        } else {
            (0, 0)
        };

        if SPACED_LETTERS.is_match(&line.text) {
            words.push(WordObservation::new(line.text.clone(), x, y, line.confidence, source));
        } else {
            words.extend(
                line.text
                    .split_whitespace()
                    .map(|word| WordObservation::new(word, x, y, line.confidence, source)),
            );
        }
    }
    words
}
