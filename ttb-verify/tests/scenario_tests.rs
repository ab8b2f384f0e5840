//! End-to-end verification of fused scans
//!
//! Drives `verify_scans` with synthetic scans of one label; no OCR or
//! filesystem involved.

#[allow(dead_code)]
mod helpers;

use helpers::label_fixtures::{reference_fields, sample_scan};
use ttb_verify::config::{FailureLabels, SimilarityMetric};
use ttb_verify::{verify_scans, LabelFields, LabelResult, LabelStatus, OcrSource, VerifyConfig};

fn verify(a: Vec<ttb_verify::WordObservation>, b: Vec<ttb_verify::WordObservation>) -> LabelResult {
    verify_scans(&reference_fields(), &a, &b, &VerifyConfig::default())
}

#[test]
fn test_complete_label_passes() {
    let result = verify(sample_scan(OcrSource::A).build(), sample_scan(OcrSource::B).build());

    assert_eq!(result.status, LabelStatus::Passed);
    assert!(result.failures.is_empty());
    assert_eq!(result.display_status(), "Passed");
}

#[test]
fn test_missing_brand_fails() {
    let result = verify(
        sample_scan(OcrSource::A).without_brand().build(),
        sample_scan(OcrSource::B).without_brand().build(),
    );

    assert_eq!(result, LabelResult::failed(vec!["brand name".to_string()]));
    assert_eq!(result.display_status(), "Failed: brand name");
}

#[test]
fn test_brand_seen_by_one_engine_is_enough() {
    let result = verify(
        sample_scan(OcrSource::A).without_brand().build(),
        sample_scan(OcrSource::B).build(),
    );
    assert_eq!(result.status, LabelStatus::Passed);
}

#[test]
fn test_incomplete_warning_fails() {
    let result = verify(
        sample_scan(OcrSource::A).without_warning_token("(2)").build(),
        sample_scan(OcrSource::B).without_warning_token("(2)").build(),
    );

    assert_eq!(result, LabelResult::failed(vec!["government warning".to_string()]));
}

#[test]
fn test_warning_split_across_engines_passes() {
    // Each engine misses a different token; together they hold the full text
    let result = verify(
        sample_scan(OcrSource::A).without_warning_token("(1)").build(),
        sample_scan(OcrSource::B).without_warning_token("(2)").build(),
    );
    assert_eq!(result.status, LabelStatus::Passed);
}

#[test]
fn test_fanciful_name_absent_still_passes() {
    // "Midnight Harbor" never appears on the sample label
    let fields = reference_fields();
    assert!(fields.fanciful_name.is_some());

    let result = verify(sample_scan(OcrSource::A).build(), sample_scan(OcrSource::B).build());
    assert!(!result.failures.iter().any(|f| f == "fanciful name"));
}

#[test]
fn test_alcohol_statement_split_across_clusters_fails() {
    let scattered = vec![("ALC", 300, 300), ("5.0%", 900, 300), ("VOL", 950, 300)];
    let result = verify(
        sample_scan(OcrSource::A).with_alcohol(scattered.clone()).build(),
        sample_scan(OcrSource::B).with_alcohol(scattered).build(),
    );

    assert_eq!(result, LabelResult::failed(vec!["alcohol content".to_string()]));
}

#[test]
fn test_alcohol_without_percentage_fails() {
    let no_percent = vec![("ALC", 300, 300), ("VOL", 390, 300)];
    let result = verify(
        sample_scan(OcrSource::A).with_alcohol(no_percent.clone()).build(),
        sample_scan(OcrSource::B).with_alcohol(no_percent).build(),
    );

    assert_eq!(result, LabelResult::failed(vec!["alcohol content".to_string()]));
}

#[test]
fn test_net_content_as_separate_words_passes() {
    let spaced = vec![("12", 300, 500), ("FL", 330, 500), ("OZ", 360, 500)];
    let result = verify(
        sample_scan(OcrSource::A).with_net_content(spaced.clone()).build(),
        sample_scan(OcrSource::B).with_net_content(spaced).build(),
    );
    assert_eq!(result.status, LabelStatus::Passed);
}

#[test]
fn test_empty_scans_fail_every_required_element() {
    let result = verify_scans(&reference_fields(), &[], &[], &VerifyConfig::default());

    assert_eq!(result.status, LabelStatus::Failed);
    assert_eq!(
        result.failures,
        vec![
            "brand name",
            "class",
            "bottler name",
            "bottler address",
            "alcohol content",
            "net content",
            "government warning",
        ]
    );
}

#[test]
fn test_unset_fields_fail() {
    let fields = LabelFields {
        class: None,
        ..reference_fields()
    };
    let a = sample_scan(OcrSource::A).build();
    let b = sample_scan(OcrSource::B).build();

    let result = verify_scans(&fields, &a, &b, &VerifyConfig::default());
    assert_eq!(result, LabelResult::failed(vec!["class".to_string()]));
}

#[test]
fn test_custom_failure_labels() {
    let config = VerifyConfig {
        failure_labels: FailureLabels(vec!["Brand".to_string()]),
        ..VerifyConfig::default()
    };
    let a = sample_scan(OcrSource::A).without_brand().without_warning_token("WARNING:").build();
    let b = sample_scan(OcrSource::B).without_brand().without_warning_token("WARNING:").build();

    let result = verify_scans(&reference_fields(), &a, &b, &config);
    assert_eq!(
        result,
        LabelResult::failed(vec!["Brand".to_string(), "element 7".to_string()])
    );
}

#[test]
fn test_levenshtein_metric_gives_same_verdict() {
    let config = VerifyConfig {
        similarity_metric: SimilarityMetric::Levenshtein,
        ..VerifyConfig::default()
    };
    let a = sample_scan(OcrSource::A).build();
    let b = sample_scan(OcrSource::B).build();

    assert_eq!(verify_scans(&reference_fields(), &a, &b, &config), LabelResult::passed());
}

#[test]
fn test_verification_is_deterministic() {
    let a = sample_scan(OcrSource::A).build();
    let b = sample_scan(OcrSource::B).without_warning_token("(2)").build();
    let config = VerifyConfig::default();

    let first = verify_scans(&reference_fields(), &a, &b, &config);
    for _ in 0..5 {
        assert_eq!(verify_scans(&reference_fields(), &a, &b, &config), first);
    }
}
