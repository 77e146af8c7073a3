//! Error types for huangpu.

use thiserror::Error;

use crate::DateParseError;

/// Result type alias for huangpu operations.
pub type Result<T> = std::result::Result<T, HuangpuError>;

/// Errors that can occur while fetching and normalizing provider data.
#[derive(Error, Debug)]
pub enum HuangpuError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Provider accepted the request but answered with a business error.
    #[error("provider error {code}: {msg}")]
    Provider {
        /// Provider status code (zero means success).
        code: i64,
        /// Provider error message.
        msg: String,
    },

    /// Response data did not have the expected shape.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid trade date string.
    #[error(transparent)]
    InvalidDate(#[from] DateParseError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
