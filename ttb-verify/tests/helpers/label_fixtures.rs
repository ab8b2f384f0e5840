//! Synthetic OCR scans of a beer label
//!
//! Layout (pixels):
//! - identity block at the top left (y 10..130)
//! - alcohol statement at (300, 300)
//! - net content at (300, 500)
//! - government warning as a grid from (10, 700)
//!
//! Blocks are more than 100 px apart so each forms its own cluster.

use std::path::PathBuf;
use tempfile::TempDir;
use ttb_verify::warning::WarningText;
use ttb_verify::{LabelFields, OcrSource, WordObservation};

/// Builder for one scan of the sample label
#[derive(Debug, Clone)]
pub struct LabelScan {
    source: OcrSource,
    confidence: f64,
    brand: Option<String>,
    alcohol: Vec<(&'static str, i64, i64)>,
    net_content: Vec<(&'static str, i64, i64)>,
    drop_warning_token: Option<&'static str>,
}

pub fn sample_scan(source: OcrSource) -> LabelScan {
    LabelScan {
        source,
        confidence: match source {
            OcrSource::A => 0.92,
            OcrSource::B => 0.81,
        },
        brand: Some("Zephyr".to_string()),
        alcohol: vec![("ALC", 300, 300), ("5.0%", 340, 300), ("VOL", 390, 300)],
        net_content: vec![("12FLOZ", 300, 500)],
        drop_warning_token: None,
    }
}

impl LabelScan {
    pub fn without_brand(mut self) -> Self {
        self.brand = None;
        self
    }

    pub fn with_alcohol(mut self, words: Vec<(&'static str, i64, i64)>) -> Self {
        self.alcohol = words;
        self
    }

    pub fn with_net_content(mut self, words: Vec<(&'static str, i64, i64)>) -> Self {
        self.net_content = words;
        self
    }

    pub fn without_warning_token(mut self, token: &'static str) -> Self {
        self.drop_warning_token = Some(token);
        self
    }

    pub fn build(&self) -> Vec<WordObservation> {
        let mut words = Vec::new();
        let mut push = |text: &str, x: i64, y: i64| {
            words.push(WordObservation::new(text, x, y, self.confidence, self.source));
        };

        if let Some(brand) = &self.brand {
            push(brand.as_str(), 10, 10);
        }
        push("Pilsner", 10, 40);
        push("Acme", 10, 70);
        push("Brewing", 70, 70);
        push("Co.", 140, 70);
        push("Springfield,", 10, 100);
        push("OR", 110, 100);

        for &(text, x, y) in &self.alcohol {
            push(text, x, y);
        }
        for &(text, x, y) in &self.net_content {
            push(text, x, y);
        }

        let mut dropped = false;
        for (text, x, y) in warning_words() {
            if !dropped && Some(text.as_str()) == self.drop_warning_token {
                dropped = true;
                continue;
            }
            push(text.as_str(), x, y);
        }

        words
    }
}

/// Statutory warning laid out ten words per row
fn warning_words() -> Vec<(String, i64, i64)> {
    WarningText::current()
        .tokens
        .iter()
        .enumerate()
        .map(|(i, token)| {
            let i = i as i64;
            (token.to_string(), 10 + (i % 10) * 40, 700 + (i / 10) * 20)
        })
        .collect()
}

/// Application values matching [`sample_scan`]
pub fn reference_fields() -> LabelFields {
    LabelFields {
        brand_name: Some("Zephyr".to_string()),
        class: Some("Pilsner".to_string()),
        fanciful_name: Some("Midnight Harbor".to_string()),
        bottler_name: Some("Acme Brewing Co.".to_string()),
        bottler_address: Some("Springfield, OR".to_string()),
    }
}

/// Temp label directory holding `<num>.png` for each number
pub fn label_dir_with_images(app_nums: &[&str]) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    for num in app_nums {
        std::fs::write(temp_dir.path().join(format!("{}.png", num)), b"\x89PNG").unwrap();
    }
    let path = temp_dir.path().to_path_buf();
    (temp_dir, path)
}
