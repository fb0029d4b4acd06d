//! Conversion diagnostics.
//!
//! Everything the engine recovers from (unresolved images, undecodable
//! images, failed templates) is logged and also recorded here so callers
//! can inspect it without installing a subscriber. Fatal conditions are
//! [`EngineError`](crate::error::EngineError)s, never diagnostics.

use serde::{Deserialize, Serialize};

/// A diagnostic message from the engine
///
/// # Example
///
/// ```
/// use htmldeck_core::diagnostics::{Diagnostic, Severity};
///
/// let diag = Diagnostic::warning("Image not found: chart.png")
///     .with_code("ASSET001")
///     .with_slide(3);
/// assert_eq!(diag.severity, Severity::Warning);
/// assert_eq!(diag.to_string(), "warning[ASSET001]: slide 3: Image not found: chart.png");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Severity level of the diagnostic
    pub severity: Severity,

    /// The diagnostic message
    pub message: String,

    /// Optional code (e.g., "ASSET001", "TPL001")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// 1-based slide index the issue belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slide: Option<usize>,

    /// Additional help text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
}

/// Severity level of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Worth knowing, output unaffected
    Info,

    /// Recovered problem; output is degraded but produced
    Warning,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            code: None,
            slide: None,
            help: None,
        }
    }

    /// Create a warning diagnostic
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    /// Create an info diagnostic
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Severity::Info, message)
    }

    /// Set the diagnostic code
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Attach the slide index
    pub fn with_slide(mut self, slide: usize) -> Self {
        self.slide = Some(slide);
        self
    }

    /// Set help text
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn is_warning(&self) -> bool {
        matches!(self.severity, Severity::Warning)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: severity[code]: slide N: message
        write!(f, "{}", self.severity)?;
        if let Some(ref code) = self.code {
            write!(f, "[{}]", code)?;
        }
        write!(f, ": ")?;
        if let Some(slide) = self.slide {
            write!(f, "slide {}: ", slide)?;
        }
        write!(f, "{}", self.message)?;

        if let Some(ref help) = self.help {
            write!(f, "\n  = help: {}", help)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let diag = Diagnostic::warning("Template failed")
            .with_code("TPL001")
            .with_slide(4)
            .with_help("Check the card markup");
        assert!(diag.is_warning());
        assert_eq!(diag.slide, Some(4));
        assert!(diag.to_string().contains("= help: Check the card markup"));
    }

    #[test]
    fn test_display_without_slide() {
        let diag = Diagnostic::info("Image found by file name");
        assert!(!diag.is_warning());
        assert_eq!(diag.to_string(), "info: Image found by file name");
    }

    #[test]
    fn test_serialization_skips_empty_fields() {
        let diag = Diagnostic::warning("Image not found");
        let json = serde_json::to_value(&diag).unwrap();
        assert_eq!(json["severity"], "warning");
        assert!(json.get("code").is_none());
        assert!(json.get("slide").is_none());
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Info < Severity::Warning);
    }
}
