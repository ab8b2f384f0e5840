//! Element Verifier
//!
//! Located alcohol and net-content claims are only accepted when they
//! read as a statement inside one spatial cluster:
//! - **Alcohol:** one cluster holds an "alc"/"alcohol" marker, a
//!   "vol"/"volume" marker and a percentage ("ALC/VOL 5%",
//!   "Alcohol by Volume 5.0%").
//! - **Net content:** one cluster holds a digit+unit token, or a number
//!   and a unit within `net_proximity_px` on both axes.
//!
//! Cluster sets are tried fused → A → B; first success wins.
//!
//! The government warning is an exact, count-aware containment check of
//! the statutory tokens against every word of every source.

use std::collections::HashMap;

use tracing::debug;

use crate::cluster::{cluster_words, WordCluster};
use crate::config::VerifyConfig;
use crate::locator::{LocatedElements, ScanSources};
use crate::patterns::{
    has_digit, has_net_unit, is_net_content_token, ALCOHOL_MARKER, STATEMENT_PERCENT,
    VOLUME_MARKER,
};
use crate::text::normalize_for_pattern;
use crate::types::{ElementOutcome, FusedWord, Point, WordObservation, WordRecord};
use crate::warning::WarningText;

/// Clusters of each source, in verification priority order
#[derive(Debug)]
pub struct ClusterSets<'a> {
    pub fused: Vec<WordCluster<'a, FusedWord>>,
    pub scan_a: Vec<WordCluster<'a, WordObservation>>,
    pub scan_b: Vec<WordCluster<'a, WordObservation>>,
}

impl<'a> ClusterSets<'a> {
    pub fn build(sources: &ScanSources<'a>, eps: f64) -> Self {
        let sets = Self {
            fused: cluster_words(sources.fused.as_slice(), eps),
            scan_a: cluster_words(sources.scan_a, eps),
            scan_b: cluster_words(sources.scan_b, eps),
        };

        debug!(
            eps,
            fused = sets.fused.len(),
            scan_a = sets.scan_a.len(),
            scan_b = sets.scan_b.len(),
            "Clustered sources"
        );

        sets
    }
}

fn found(outcome: ElementOutcome) -> Option<ElementOutcome> {
    outcome.found.then_some(outcome)
}

fn anchor<W: WordRecord>(cluster: &[&W]) -> Option<Point> {
    cluster.first().map(|w| w.location())
}

// ============================================================================
// Alcohol content
// ============================================================================

/// First cluster with alcohol marker, volume marker and percentage
pub fn find_alcohol_statement<W: WordRecord>(clusters: &[WordCluster<'_, W>]) -> ElementOutcome {
    for cluster in clusters {
        let mut has_alcohol = false;
        let mut has_volume = false;
        let mut has_percent = false;

        for word in cluster {
            let text = normalize_for_pattern(word.text());
            has_alcohol |= ALCOHOL_MARKER.is_match(&text);
            has_volume |= VOLUME_MARKER.is_match(&text);
            has_percent |= STATEMENT_PERCENT.is_match(&text);
        }

        if has_alcohol && has_volume && has_percent {
            if let Some(at) = anchor(cluster) {
                return ElementOutcome::found(at);
            }
        }
    }
    ElementOutcome::missing()
}

/// Alcohol statement check over fused, A, B clusters
pub fn verify_alcohol(located: &LocatedElements, sets: &ClusterSets<'_>) -> ElementOutcome {
    if located.alcohol.is_none() {
        return ElementOutcome::missing();
    }

    found(find_alcohol_statement(&sets.fused))
        .or_else(|| found(find_alcohol_statement(&sets.scan_a)))
        .or_else(|| found(find_alcohol_statement(&sets.scan_b)))
        .unwrap_or_else(ElementOutcome::missing)
}

// ============================================================================
// Net content
// ============================================================================

/// First cluster with a digit+unit token or a nearby number/unit pair
pub fn find_net_content<W: WordRecord>(
    clusters: &[WordCluster<'_, W>],
    max_gap_px: i64,
) -> ElementOutcome {
    let max_gap = u64::try_from(max_gap_px).unwrap_or(0);

    for cluster in clusters {
        let Some(at) = anchor(cluster) else {
            continue;
        };

        if cluster.iter().any(|w| is_net_content_token(w.text())) {
            return ElementOutcome::found(at);
        }

        let numbers: Vec<Point> = cluster
            .iter()
            .filter(|w| has_digit(w.text()))
            .map(|w| w.location())
            .collect();
        let units: Vec<Point> = cluster
            .iter()
            .filter(|w| has_net_unit(w.text()))
            .map(|w| w.location())
            .collect();

        let adjacent = numbers.iter().any(|n| {
            units
                .iter()
                .any(|u| n.abs_dx(u) < max_gap && n.abs_dy(u) < max_gap)
        });
        if adjacent {
            return ElementOutcome::found(at);
        }
    }
    ElementOutcome::missing()
}

/// Net content check over fused, A, B clusters
pub fn verify_net_content(
    located: &LocatedElements,
    sets: &ClusterSets<'_>,
    max_gap_px: i64,
) -> ElementOutcome {
    if located.net_content.is_none() {
        return ElementOutcome::missing();
    }

    found(find_net_content(&sets.fused, max_gap_px))
        .or_else(|| found(find_net_content(&sets.scan_a, max_gap_px)))
        .or_else(|| found(find_net_content(&sets.scan_b, max_gap_px)))
        .unwrap_or_else(ElementOutcome::missing)
}

// ============================================================================
// Government warning
// ============================================================================

/// Multiset containment: every required token occurs in `available` at
/// least as many times as in `required`. Exact comparison (case and
/// punctuation significant).
pub fn contains_all_words<R, A>(required: &[R], available: &[A]) -> bool
where
    R: AsRef<str>,
    A: AsRef<str>,
{
    let mut available_counts: HashMap<&str, usize> = HashMap::new();
    for word in available {
        *available_counts.entry(word.as_ref()).or_insert(0) += 1;
    }

    let mut required_counts: HashMap<&str, usize> = HashMap::new();
    for word in required {
        *required_counts.entry(word.as_ref()).or_insert(0) += 1;
    }

    required_counts
        .iter()
        .all(|(word, needed)| available_counts.get(word).copied().unwrap_or(0) >= *needed)
}

/// Warning text present across all sources combined
///
/// The reported location is the first word seen (fused, then A, then B);
/// it is a display anchor only.
pub fn verify_government_warning(sources: &ScanSources<'_>, reference: &WarningText) -> ElementOutcome {
    let [fused, scan_a, scan_b] = sources.texts();
    let bag: Vec<&str> = fused.into_iter().chain(scan_a).chain(scan_b).collect();

    let first_location = sources
        .fused
        .iter()
        .map(|w| w.location)
        .chain(sources.scan_a.iter().map(|w| w.location))
        .chain(sources.scan_b.iter().map(|w| w.location))
        .next();

    match first_location {
        Some(at) if contains_all_words(reference.tokens, &bag) => ElementOutcome::found(at),
        _ => {
            debug!(available = bag.len(), revision = reference.revision, "Government warning incomplete");
            ElementOutcome::missing()
        }
    }
}

// ============================================================================
// All verified elements
// ============================================================================

/// Verifier output for one label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifiedElements {
    pub alcohol: ElementOutcome,
    pub net_content: ElementOutcome,
    pub government_warning: ElementOutcome,
}

pub fn verify_elements(
    located: &LocatedElements,
    sources: &ScanSources<'_>,
    config: &VerifyConfig,
) -> VerifiedElements {
    let sets = ClusterSets::build(sources, config.cluster_eps);

    VerifiedElements {
        alcohol: verify_alcohol(located, &sets),
        net_content: verify_net_content(located, &sets, config.net_proximity_px),
        government_warning: verify_government_warning(sources, WarningText::current()),
    }
}
