//! # htmldeck-pptx
//!
//! The output side of htmldeck: a positioned-element slide model and a
//! writer that packages it as a PowerPoint (PPTX) container.
//!
//! Every element carries an explicit [`BoundingBox`] in inches. The writer
//! converts to EMU, embeds each distinct image once, and emits a package
//! whose bytes depend only on its input.
//!
//! ## Example
//!
//! ```rust
//! use htmldeck_pptx::{BoundingBox, Color, Deck, PositionedElement, PptxWriter, Slide, TextStyle};
//!
//! let mut slide = Slide::new(Some(Color::rgb(0xfe, 0xf2, 0xf2)));
//! slide.push(PositionedElement::text(
//!     BoundingBox::new(0.5, 0.2, 9.0, 0.6),
//!     "Hello",
//!     TextStyle::new(28.0).bold(),
//! ));
//!
//! let mut deck = Deck::new();
//! deck.push(slide);
//!
//! let mut writer = PptxWriter::default().with_title("Example");
//! writer.add_deck(&deck);
//! let bytes = writer.generate().unwrap();
//! assert!(!bytes.is_empty());
//! ```

pub mod error;
pub mod media;
pub mod reader;
pub mod slide;
pub mod writer;

// Re-exports
pub use error::{PptxError, Result};
pub use reader::{read_package, PackageSummary, SlideSummary};
pub use slide::{Alignment, BoundingBox, Color, Deck, PositionedElement, Slide, TextStyle};
pub use writer::PptxWriter;

/// PPTX-related constants
pub mod constants {
    /// EMU per inch
    pub const EMU_PER_INCH: i64 = 914_400;

    /// Font size units per point (`sz` is in hundredths of a point)
    pub const FONT_UNITS_PER_POINT: f64 = 100.0;

    /// PresentationML namespace
    pub const NS_PRESENTATION: &str =
        "http://schemas.openxmlformats.org/presentationml/2006/main";

    /// DrawingML namespace
    pub const NS_DRAWING: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";

    /// Relationships namespace
    pub const NS_RELATIONSHIPS: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

    /// Package relationships namespace
    pub const NS_PACKAGE_RELATIONSHIPS: &str =
        "http://schemas.openxmlformats.org/package/2006/relationships";

    /// Content Types namespace
    pub const NS_CONTENT_TYPES: &str =
        "http://schemas.openxmlformats.org/package/2006/content-types";

    /// Slide relationship type
    pub const REL_TYPE_SLIDE: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";

    /// Slide layout relationship type
    pub const REL_TYPE_SLIDE_LAYOUT: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout";

    /// Slide master relationship type
    pub const REL_TYPE_SLIDE_MASTER: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster";

    /// Theme relationship type
    pub const REL_TYPE_THEME: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme";

    /// Image relationship type
    pub const REL_TYPE_IMAGE: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";

    /// Timestamp written into core properties, fixed so output is reproducible
    pub const FIXED_TIMESTAMP: &str = "2025-01-01T00:00:00Z";
}

/// Convert inches to EMU, rounding to the nearest unit.
pub fn inches_to_emu(inches: f64) -> i64 {
    (inches * constants::EMU_PER_INCH as f64).round() as i64
}

/// Convert a point size to the `sz` attribute value.
pub fn points_to_font_units(points: f64) -> i64 {
    (points * constants::FONT_UNITS_PER_POINT).round() as i64
}
