//! Error types for anaphor.

use thiserror::Error;

/// Result type for anaphor operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for anaphor operations.
///
/// Errors are reserved for configuration construction and document
/// validation. Per-mention degradation (a filter refusing to run, a
/// malformed annotation) is logged and skipped, never surfaced here.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Invalid resolution configuration (unknown filter name, bad parameter).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid document structure (span out of bounds, empty multi-span).
    #[error("Document error: {0}")]
    Document(String),

    /// Strategy table serialization error.
    #[error("Strategy table error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Create a document error.
    pub fn document(msg: impl Into<String>) -> Self {
        Error::Document(msg.into())
    }
}
