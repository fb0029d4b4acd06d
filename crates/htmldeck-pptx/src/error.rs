//! Error types for PPTX generation.

use thiserror::Error;

/// Result type for PPTX operations
pub type Result<T> = std::result::Result<T, PptxError>;

/// Errors that can occur during PPTX generation
#[derive(Error, Debug)]
pub enum PptxError {
    /// Element geometry cannot be serialized
    #[error("Invalid geometry on slide {slide}: {reason}")]
    InvalidGeometry { slide: usize, reason: String },

    /// Image could not be embedded
    #[error("Image error: {reason}")]
    ImageError { reason: String },

    /// Package could not be read back
    #[error("Invalid package: {reason}")]
    InvalidPackage { reason: String },

    /// XML generation or parsing error
    #[error("XML error: {0}")]
    XmlError(#[from] quick_xml::Error),

    /// ZIP archive error
    #[error("Archive error: {0}")]
    ZipError(#[from] zip::result::ZipError),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl PptxError {
    /// Create an invalid geometry error
    pub fn invalid_geometry(slide: usize, reason: impl Into<String>) -> Self {
        Self::InvalidGeometry {
            slide,
            reason: reason.into(),
        }
    }

    /// Create an image error
    pub fn image_error(reason: impl Into<String>) -> Self {
        Self::ImageError {
            reason: reason.into(),
        }
    }

    /// Create an invalid package error
    pub fn invalid_package(reason: impl Into<String>) -> Self {
        Self::InvalidPackage {
            reason: reason.into(),
        }
    }

    /// Get the error code for diagnostics
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidGeometry { .. } => "PPTX001",
            Self::ImageError { .. } => "PPTX002",
            Self::InvalidPackage { .. } => "PPTX003",
            Self::XmlError(_) => "PPTX004",
            Self::ZipError(_) => "PPTX005",
            Self::IoError(_) => "PPTX006",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = PptxError::invalid_geometry(3, "width is NaN");
        assert_eq!(err.code(), "PPTX001");
        assert!(err.to_string().contains("slide 3"));

        let err = PptxError::image_error("chart.png unreadable");
        assert_eq!(err.code(), "PPTX002");
        assert!(err.to_string().contains("chart.png"));
    }

    #[test]
    fn test_error_display() {
        let err = PptxError::invalid_package("missing ppt/presentation.xml");
        assert!(err.to_string().contains("presentation.xml"));

        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let err: PptxError = io.into();
        assert_eq!(err.code(), "PPTX006");
        assert!(err.to_string().contains("disk full"));
    }
}
