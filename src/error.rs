//! Hard failures surfaced to callers.
//!
//! Per-item anomalies never reach this type: a malformed field skips its
//! pricing rule and an unknown id prices at zero. Only whole-batch decoding
//! and configuration loading can fail.

use std::path::PathBuf;

/// Error type for batch decoding and configuration loading
#[derive(Debug, thiserror::Error)]
pub enum NetworthError {
    #[error("Batch payload is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Batch payload must be a JSON array, got {0}")]
    NotAnArray(&'static str),
    #[error("Malformed RON: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("File watcher error: {0}")]
    Watch(#[from] notify::Error),
    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(PathBuf),
}

pub type Result<T> = std::result::Result<T, NetworthError>;
