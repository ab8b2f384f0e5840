//! Pre-computed transcript provider
//!
//! Reads OCR output that an external engine already wrote next to the
//! image: `labels/1234.png` with suffix `easyocr` reads
//! `labels/1234.easyocr.json`.
//!
//! Accepted entries (mixed freely in one array):
//! - word-level: `{"word": "ALC", "location": [x, y], "confidence": 0.91}`
//!   (`text` is accepted for `word`; `location` may be `{"x": .., "y": ..}`)
//! - line-level: `{"text": "Stone Brewing", "box": [[x, y], ...], "confidence": 0.8}`

use async_trait::async_trait;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::{split_line_detections, LineDetection, OcrProvider};
use crate::error::{VerifyError, VerifyResult};
use crate::types::{OcrSource, WordObservation};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TranscriptEntry {
    Line {
        text: String,
        #[serde(rename = "box")]
        polygon: Vec<[f64; 2]>,
        confidence: f64,
    },
    Word {
        #[serde(alias = "text")]
        word: String,
        location: TranscriptPoint,
        confidence: f64,
    },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TranscriptPoint {
    Pair([f64; 2]),
    Object { x: f64, y: f64 },
}

impl TranscriptPoint {
    fn pixels(&self) -> (i64, i64) {
        let (x, y) = match *self {
            TranscriptPoint::Pair([x, y]) => (x, y),
            TranscriptPoint::Object { x, y } => (x, y),
        };
        (x.floor() as i64, y.floor() as i64)
    }
}

/// Parse a transcript document into observations (file order)
pub fn parse_transcript(json: &str, source: OcrSource) -> VerifyResult<Vec<WordObservation>> {
    let entries: Vec<TranscriptEntry> =
        serde_json::from_str(json).map_err(|e| VerifyError::Transcript(e.to_string()))?;

    let mut words = Vec::with_capacity(entries.len());
    for entry in entries {
        match entry {
            TranscriptEntry::Word {
                word,
                location,
                confidence,
            } => {
                if word.trim().is_empty() {
                    continue;
                }
                let (x, y) = location.pixels();
                words.push(WordObservation::new(word, x, y, confidence, source));
            }
            TranscriptEntry::Line {
                text,
                polygon,
                confidence,
            } => {
                let line = LineDetection {
                    text,
                    polygon,
                    confidence,
                };
                words.extend(split_line_detections(std::slice::from_ref(&line), source));
            }
        }
    }
    Ok(words)
}

/// Reads `<stem>.<suffix>.json` beside each image
#[derive(Debug, Clone)]
pub struct TranscriptProvider {
    name: String,
    suffix: String,
}

impl TranscriptProvider {
    pub fn new(suffix: impl Into<String>) -> Self {
        let suffix = suffix.into();
        Self {
            name: format!("transcript:{}", suffix),
            suffix,
        }
    }

    /// Transcript location for `image`
    pub fn transcript_path(&self, image: &Path) -> PathBuf {
        let stem = image
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        image.with_file_name(format!("{}.{}.json", stem, self.suffix))
    }
}

#[async_trait]
impl OcrProvider for TranscriptProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn scan(&self, image: &Path, source: OcrSource) -> VerifyResult<Vec<WordObservation>> {
        let path = self.transcript_path(image);
        let json = tokio::fs::read_to_string(&path).await.map_err(|e| {
            VerifyError::provider(&self.name, format!("cannot read {}: {}", path.display(), e))
        })?;

        let words = parse_transcript(&json, source)
            .map_err(|e| VerifyError::provider(&self.name, e))?;
        debug!(provider = %self.name, path = %path.display(), words = words.len(), "Loaded transcript");
        Ok(words)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Point;
    use tempfile::TempDir;

    #[test]
    fn test_parse_word_entries() {
        let json = r#"[
            {"word": "ALC", "location": [10, 20], "confidence": 91.5},
            {"text": "VOL", "location": {"x": 40.7, "y": 20.2}, "confidence": 88},
            {"word": "  ", "location": [0, 0], "confidence": -1}
        ]"#;
        let words = parse_transcript(json, OcrSource::A).unwrap();
        assert_eq!(words.len(), 2);
        assert_eq!(words[0].text, "ALC");
        assert_eq!(words[0].location, Point::new(10, 20));
        assert_eq!(words[1].text, "VOL");
        assert_eq!(words[1].location, Point::new(40, 20));
        assert_eq!(words[1].confidence, 88.0);
    }

    #[test]
    fn test_parse_line_entries() {
        let json = r#"[{"text": "5.0% ALC/VOL", "box": [[5, 9], [90, 8], [90, 30], [5, 31]], "confidence": 0.7}]"#;
        let words = parse_transcript(json, OcrSource::B).unwrap();
        let texts: Vec<&str> = words.iter().map(|w| w.text.as_str()).collect();
        assert_eq!(texts, vec!["5.0%", "ALC/VOL"]);
        assert!(words.iter().all(|w| w.location == Point::new(5, 8)));
    }

    #[test]
    fn test_parse_malformed() {
        assert!(matches!(
            parse_transcript("{\"not\": \"an array\"}", OcrSource::A),
            Err(VerifyError::Transcript(_))
        ));
    }

    #[test]
    fn test_transcript_path() {
        let provider = TranscriptProvider::new("easyocr");
        assert_eq!(
            provider.transcript_path(Path::new("labels/1234.png")),
            PathBuf::from("labels/1234.easyocr.json")
        );
        assert_eq!(provider.name(), "transcript:easyocr");
    }

    #[tokio::test]
    async fn test_scan_reads_sidecar() {
        let temp_dir = TempDir::new().unwrap();
        let image = temp_dir.path().join("77.png");
        std::fs::write(&image, b"png").unwrap();
        std::fs::write(
            temp_dir.path().join("77.easyocr.json"),
            r#"[{"word": "Lager", "location": [1, 2], "confidence": 0.5}]"#,
        )
        .unwrap();

        let words = TranscriptProvider::new("easyocr")
            .scan(&image, OcrSource::B)
            .await
            .unwrap();
        assert_eq!(words, vec![WordObservation::new("Lager", 1, 2, 0.5, OcrSource::B)]);
    }

    #[tokio::test]
    async fn test_scan_missing_sidecar_is_provider_failure() {
        let temp_dir = TempDir::new().unwrap();
        let image = temp_dir.path().join("78.png");

        let result = TranscriptProvider::new("easyocr").scan(&image, OcrSource::B).await;
        assert!(matches!(result, Err(VerifyError::OcrProviderFailure { .. })));
    }
}
