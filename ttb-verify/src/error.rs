//! Error types for ttb-verify
//!
//! Only infrastructure failures are errors: the label image could not be
//! found, or an OCR provider failed or timed out. A label missing required
//! elements is a normal `Failed` result, never an error.

use thiserror::Error;

/// Verification pipeline error
#[derive(Debug, Error)]
pub enum VerifyError {
    /// Label image could not be resolved or opened
    #[error("Label image not found: {0}")]
    ImageUnavailable(String),

    /// OCR provider returned an error
    #[error("OCR provider {provider} failed: {message}")]
    OcrProviderFailure { provider: String, message: String },

    /// OCR provider exceeded its time budget
    #[error("OCR provider {provider} timed out after {seconds}s")]
    OcrTimeout { provider: String, seconds: u64 },

    /// Provider output could not be parsed
    #[error("Malformed OCR transcript: {0}")]
    Transcript(String),

    /// Blocking verification task did not complete
    #[error("Verification task failed: {0}")]
    Join(String),
}

impl VerifyError {
    pub fn provider(provider: impl Into<String>, message: impl ToString) -> Self {
        VerifyError::OcrProviderFailure {
            provider: provider.into(),
            message: message.to_string(),
        }
    }
}

/// Result type for pipeline operations
pub type VerifyResult<T> = Result<T, VerifyError>;
