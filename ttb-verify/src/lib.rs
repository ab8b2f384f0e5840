//! ttb-verify: alcohol label compliance verification
//!
//! Two independent OCR scans of a label image are fused into one word
//! set, the eight mandatory label elements are located and verified,
//! and the outcomes fold into a `Passed` / `Failed` / `Error` result.
//!
//! Stages, in pipeline order:
//! - [`fusion`]: pair A/B observations and keep the higher-confidence text
//! - [`locator`]: find identity fields and pattern elements
//! - [`cluster`] / [`verifier`]: confirm claims inside spatial clusters
//! - [`aggregate`]: element outcomes to a verdict
//! - [`pipeline`]: OCR invocation, timeouts and batch concurrency

pub mod aggregate;
pub mod cluster;
pub mod config;
pub mod error;
pub mod fusion;
pub mod locator;
pub mod ocr;
pub mod patterns;
pub mod pipeline;
pub mod records;
pub mod resolver;
pub mod text;
pub mod types;
pub mod verifier;
pub mod warning;

pub use crate::config::{PipelineConfig, TomlConfig, VerifyConfig};
pub use crate::error::{VerifyError, VerifyResult};
pub use crate::pipeline::{verify_scans, LabelPipeline};
pub use crate::types::{LabelFields, LabelResult, LabelStatus, OcrSource, WordObservation};
