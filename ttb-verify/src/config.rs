//! Configuration for ttb-verify
//!
//! One TOML file with three tables, each optional:
//!
//! ```toml
//! [logging]
//! level = "info"
//!
//! [verification]
//! similarity_threshold = 60.0
//! similarity_metric = "indel"
//! line_tolerance_px = 25
//! cluster_eps = 100.0
//! net_proximity_px = 60
//!
//! [pipeline]
//! ocr_timeout_secs = 120
//! max_concurrent_labels = 4
//! label_dirs = ["test_labels"]
//! engine_a = "tesseract"
//! engine_b = { transcript = "easyocr" }
//! ```
//!
//! Missing tables and keys take the built-in defaults below.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use ttb_common::config::LoggingConfig;

/// Complete file configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub verification: VerifyConfig,

    #[serde(default)]
    pub pipeline: PipelineConfig,
}

impl TomlConfig {
    /// Resolve (CLI → `TTB_CONFIG` → user config dir) and load
    pub fn load(cli_path: Option<&Path>) -> ttb_common::Result<Self> {
        let path = ttb_common::config::resolve_config_path(
            cli_path,
            ttb_common::config::CONFIG_ENV_VAR,
        );
        ttb_common::config::load_toml_config(path.as_deref())
    }
}

// ============================================================================
// Verification knobs
// ============================================================================

/// String similarity metric used to pair words across the two scans
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimilarityMetric {
    /// Insertion/deletion ratio, `2·LCS / (|a| + |b|)`
    #[default]
    Indel,
    /// `1 − levenshtein / max(|a|, |b|)`
    Levenshtein,
}

/// Thresholds for fusion, clustering and proximity checks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifyConfig {
    /// Minimum similarity (0-100) for two words to be a candidate match
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f64,

    #[serde(default)]
    pub similarity_metric: SimilarityMetric,

    /// Candidate matches must differ vertically by strictly less than this
    #[serde(default = "default_line_tolerance_px")]
    pub line_tolerance_px: i64,

    /// Clustering neighbourhood radius in pixels
    #[serde(default = "default_cluster_eps")]
    pub cluster_eps: f64,

    /// Max per-axis gap between a net-content number and its unit
    #[serde(default = "default_net_proximity_px")]
    pub net_proximity_px: i64,

    /// Names reported for failed elements, in element order
    #[serde(default)]
    pub failure_labels: FailureLabels,
}

fn default_similarity_threshold() -> f64 {
    60.0
}

fn default_line_tolerance_px() -> i64 {
    25
}

fn default_cluster_eps() -> f64 {
    100.0
}

fn default_net_proximity_px() -> i64 {
    60
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: default_similarity_threshold(),
            similarity_metric: SimilarityMetric::default(),
            line_tolerance_px: default_line_tolerance_px(),
            cluster_eps: default_cluster_eps(),
            net_proximity_px: default_net_proximity_px(),
            failure_labels: FailureLabels::default(),
        }
    }
}

/// Caller-supplied names for failed elements
///
/// Indexed by [`Element::index`](crate::types::Element::index). A table shorter than the element list
/// is allowed; unnamed positions are reported as `element <index>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FailureLabels(pub Vec<String>);

impl FailureLabels {
    pub fn label(&self, index: usize) -> String {
        self.0
            .get(index)
            .cloned()
            .unwrap_or_else(|| format!("element {}", index))
    }
}

impl Default for FailureLabels {
    fn default() -> Self {
        Self(
            [
                "brand name",
                "class",
                "fanciful name",
                "bottler name",
                "bottler address",
                "alcohol content",
                "net content",
                "government warning",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        )
    }
}

// ============================================================================
// Pipeline knobs
// ============================================================================

/// Which OCR provider backs a scan slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    /// Run the `tesseract` binary and parse its TSV output
    Tesseract,
    /// Read `<stem>.<suffix>.json` written next to the image
    Transcript(String),
}

/// Batch processing settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Upper bound for one OCR call
    #[serde(default = "default_ocr_timeout_secs")]
    pub ocr_timeout_secs: u64,

    /// Labels processed concurrently in a batch
    #[serde(default = "default_max_concurrent_labels")]
    pub max_concurrent_labels: usize,

    /// Directories searched for `<application_num>.png`
    #[serde(default = "default_label_dirs")]
    pub label_dirs: Vec<PathBuf>,

    #[serde(default = "default_engine_a")]
    pub engine_a: EngineKind,

    #[serde(default = "default_engine_b")]
    pub engine_b: EngineKind,

    /// Tesseract executable (resolved via PATH when relative)
    #[serde(default = "default_tesseract_bin")]
    pub tesseract_bin: PathBuf,
}

fn default_ocr_timeout_secs() -> u64 {
    120
}

fn default_max_concurrent_labels() -> usize {
    4
}

fn default_label_dirs() -> Vec<PathBuf> {
    vec![PathBuf::from("test_labels")]
}

fn default_engine_a() -> EngineKind {
    EngineKind::Tesseract
}

fn default_engine_b() -> EngineKind {
    EngineKind::Transcript("easyocr".to_string())
}

fn default_tesseract_bin() -> PathBuf {
    PathBuf::from("tesseract")
}

impl PipelineConfig {
    pub fn ocr_timeout(&self) -> Duration {
        Duration::from_secs(self.ocr_timeout_secs)
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            ocr_timeout_secs: default_ocr_timeout_secs(),
            max_concurrent_labels: default_max_concurrent_labels(),
            label_dirs: default_label_dirs(),
            engine_a: default_engine_a(),
            engine_b: default_engine_b(),
            tesseract_bin: default_tesseract_bin(),
        }
    }
}
