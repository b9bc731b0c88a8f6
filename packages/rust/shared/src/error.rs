//! Error types for conflabel.
//!
//! Library crates use [`ConflabelError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all conflabel operations.
#[derive(Debug, thiserror::Error)]
pub enum ConflabelError {
    /// A string that matches neither the page nor the folder URL shape.
    #[error("invalid Confluence URL: {url}")]
    InvalidUrl { url: String },

    /// Network/HTTP error talking to the wiki REST API.
    #[error("network error: {0}")]
    Network(String),

    /// Unexpected response payload from the wiki REST API.
    #[error("API error: {0}")]
    Api(String),

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, ConflabelError>;

impl ConflabelError {
    /// Create an invalid-URL error for the given input string.
    pub fn invalid_url(url: impl Into<String>) -> Self {
        Self::InvalidUrl { url: url.into() }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
