//! Error types for Skein operations.
//!
//! Only one error is part of the extraction contract:
//!
//! - **`Error::FileAccess`**: the source file could not be read. No tree is
//!   produced and extraction cannot proceed.
//!
//! Everything else here belongs to the surrounding plumbing (configuration,
//! the line protocol, parser setup). Malformed source is *not* an error:
//! unrecognized or erroneous syntax simply contributes no relationships.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for Skein operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for Skein operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The source file is missing, unreadable, or not a regular file
    #[error("cannot read {}: {source}", path.display())]
    FileAccess {
        /// Path that was requested
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// Tree-sitter parsing infrastructure failed
    #[error("parser error: {0}")]
    Parser(String),

    /// Invalid configuration file or arguments
    #[error("configuration error: {0}")]
    Config(String),

    /// A message could not be encoded or decoded as JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Stream I/O failed (outside of reading a source file)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a file access error for `path`.
    #[must_use]
    pub fn file_access(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileAccess {
            path: path.into(),
            source,
        }
    }

    /// Returns `true` if this error means the requested source file could not be read.
    #[must_use]
    pub fn is_file_access(&self) -> bool {
        matches!(self, Self::FileAccess { .. })
    }
}
