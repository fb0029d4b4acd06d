//! Error types for the synthesis engine.

use htmldeck_markup::MarkupError;
use htmldeck_pptx::PptxError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// Fatal conversion errors.
///
/// Only a missing or unreadable input document, an invalid configuration
/// and a failure to write the output container end a run.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Input document does not exist
    #[error("Input document not found: {}", path.display())]
    InputNotFound { path: PathBuf },

    /// Input document could not be parsed
    #[error("Markup error: {0}")]
    Markup(#[from] MarkupError),

    /// Configuration file is invalid
    #[error("Configuration error in {}: {reason}", path.display())]
    Config { path: PathBuf, reason: String },

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// Output container could not be produced
    #[error("Container error: {0}")]
    Container(#[from] PptxError),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl EngineError {
    /// Create an input not found error
    pub fn input_not_found(path: impl Into<PathBuf>) -> Self {
        Self::InputNotFound { path: path.into() }
    }

    /// Create a configuration error
    pub fn config(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Get the error code for diagnostics
    pub fn code(&self) -> &'static str {
        match self {
            Self::InputNotFound { .. } => "DECK001",
            Self::Markup(_) => "DECK002",
            Self::Config { .. } => "DECK003",
            Self::TomlError(_) => "DECK004",
            Self::Container(_) => "DECK005",
            Self::IoError(_) => "DECK006",
        }
    }
}

/// A layout computation that could not complete.
///
/// Raised by templates and caught by the assembler, which keeps whatever
/// the template placed before failing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TemplateError {
    /// Computed geometry is not finite or has negative extent
    #[error("Invalid geometry for '{region}': {detail}")]
    InvalidGeometry { region: String, detail: String },

    /// A region the template cannot do without is absent
    #[error("Missing region '{region}'")]
    MissingRegion { region: String },
}

impl TemplateError {
    /// Create an invalid geometry error
    pub fn invalid_geometry(region: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::InvalidGeometry {
            region: region.into(),
            detail: detail.into(),
        }
    }

    /// Create a missing region error
    pub fn missing_region(region: impl Into<String>) -> Self {
        Self::MissingRegion {
            region: region.into(),
        }
    }

    /// Get the error code for diagnostics
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidGeometry { .. } => "TPL001",
            Self::MissingRegion { .. } => "TPL002",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = EngineError::input_not_found("deck.html");
        assert_eq!(err.code(), "DECK001");
        assert!(err.to_string().contains("deck.html"));

        let err = EngineError::config("deck.toml", "unknown field");
        assert_eq!(err.code(), "DECK003");
        assert!(err.to_string().contains("unknown field"));
    }

    #[test]
    fn test_wrapped_errors() {
        let err: EngineError = PptxError::image_error("bad").into();
        assert_eq!(err.code(), "DECK005");

        let err: EngineError = MarkupError::encoding("bad byte").into();
        assert_eq!(err.code(), "DECK002");
    }

    #[test]
    fn test_template_error_display() {
        let err = TemplateError::invalid_geometry("chart", "width is NaN");
        assert_eq!(err.code(), "TPL001");
        assert!(err.to_string().contains("chart"));
        assert!(err.to_string().contains("NaN"));

        let err = TemplateError::missing_region("cards");
        assert_eq!(err.code(), "TPL002");
    }
}
