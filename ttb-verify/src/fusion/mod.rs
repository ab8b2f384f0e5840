//! Fusion Engine
//!
//! Reconciles two independent OCR scans of the same label into one
//! higher-confidence word set.
//!
//! # Matching
//! Every word of the shorter scan is compared with every word of the
//! longer scan. A pair is a candidate match when:
//! - raw-text similarity ≥ `similarity_threshold` (default 60), and
//! - vertical offset < `line_tolerance_px` (default 25), i.e. same line.
//!
//! A word may appear in several candidate pairs. The engines tokenize
//! differently ("ALC/VOL" vs "ALC" "VOL"), so the fused set favours
//! recall over a one-to-one pairing.
//!
//! # Selection
//! Per pair, text and confidence come from whichever scan is at least as
//! confident (ties go to scan A). The location always comes from scan B.

mod fused_set;
mod similarity;

pub use fused_set::FusedSet;
pub use similarity::{indel_ratio, similarity};

use tracing::debug;

use crate::config::VerifyConfig;
use crate::types::{FusedWord, WordObservation};

/// Two observations judged to be the same printed word, stored as (A, B)
#[derive(Debug, Clone, Copy)]
pub struct CandidatePair<'a> {
    pub a: &'a WordObservation,
    pub b: &'a WordObservation,
    pub similarity: f64,
}

impl CandidatePair<'_> {
    /// Reconciled representative of this pair
    pub fn fused(&self) -> FusedWord {
        let winner = if self.a.confidence >= self.b.confidence {
            self.a
        } else {
            self.b
        };
        // Location is taken from B even when A's text wins; cluster checks
        // downstream were tuned against this behaviour.
        FusedWord {
            text: winner.text.clone(),
            location: self.b.location,
            confidence: winner.confidence,
        }
    }
}

/// Collect every candidate match between scan A and scan B
///
/// Cost is `len(shorter) × len(longer)`; scan A is the outer loop when
/// the scans have equal length.
pub fn candidate_pairs<'a>(
    scan_a: &'a [WordObservation],
    scan_b: &'a [WordObservation],
    config: &VerifyConfig,
) -> Vec<CandidatePair<'a>> {
    let a_is_outer = scan_a.len() <= scan_b.len();
    let (outer, inner) = if a_is_outer {
        (scan_a, scan_b)
    } else {
        (scan_b, scan_a)
    };

    // A negative tolerance admits no pair
    let tolerance = u64::try_from(config.line_tolerance_px).unwrap_or(0);

    let mut pairs = Vec::new();
    for short in outer {
        for long in inner {
            if long.location.abs_dy(&short.location) >= tolerance {
                continue;
            }
            let score = similarity(&short.text, &long.text, config.similarity_metric);
            if score < config.similarity_threshold {
                continue;
            }

            let (a, b) = if a_is_outer { (short, long) } else { (long, short) };
            pairs.push(CandidatePair {
                a,
                b,
                similarity: score,
            });
        }
    }
    pairs
}

/// Reduce candidate pairs to a deduplicated fused set
pub fn fuse_pairs(pairs: &[CandidatePair<'_>]) -> FusedSet {
    pairs.iter().map(CandidatePair::fused).collect()
}

/// Fuse two scans: [`candidate_pairs`] then [`fuse_pairs`]
pub fn fuse(
    scan_a: &[WordObservation],
    scan_b: &[WordObservation],
    config: &VerifyConfig,
) -> FusedSet {
    let pairs = candidate_pairs(scan_a, scan_b, config);
    let fused = fuse_pairs(&pairs);

    debug!(
        scan_a = scan_a.len(),
        scan_b = scan_b.len(),
        candidate_pairs = pairs.len(),
        fused = fused.len(),
        "Fused OCR scans"
    );

    fused
}
