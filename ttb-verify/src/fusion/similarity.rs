//! String similarity scores on a 0-100 scale

use crate::config::SimilarityMetric;

/// Similarity of two raw (non-normalized) strings, 0.0 - 100.0
pub fn similarity(a: &str, b: &str, metric: SimilarityMetric) -> f64 {
    match metric {
        SimilarityMetric::Indel => indel_ratio(a, b),
        SimilarityMetric::Levenshtein => strsim::normalized_levenshtein(a, b) * 100.0,
    }
}

/// Insertion/deletion similarity: `(1 - indel / (|a| + |b|)) · 100`
///
/// Two empty strings are identical (100).
pub fn indel_ratio(a: &str, b: &str) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 100.0;
    }
    rapidfuzz::fuzz::ratio(a.chars(), b.chars()) * 100.0
}
