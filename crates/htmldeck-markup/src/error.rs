//! Error types for markup loading.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for markup operations
pub type Result<T> = std::result::Result<T, MarkupError>;

/// Errors that can occur while loading markup
#[derive(Error, Debug)]
pub enum MarkupError {
    /// Document file does not exist
    #[error("Markup document not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// Document bytes are not valid UTF-8
    #[error("Markup is not valid UTF-8: {reason}")]
    Encoding { reason: String },

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl MarkupError {
    /// Create a not found error
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Create an encoding error
    pub fn encoding(reason: impl Into<String>) -> Self {
        Self::Encoding {
            reason: reason.into(),
        }
    }

    /// Get the error code for diagnostics
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "MARKUP001",
            Self::Encoding { .. } => "MARKUP002",
            Self::IoError(_) => "MARKUP003",
        }
    }
}
