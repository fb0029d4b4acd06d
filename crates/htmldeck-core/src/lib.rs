//! htmldeck-core - HTML slides to positioned PPTX decks
//!
//! Reads a document of Reveal.js-style `<section>` slides, picks a layout
//! template for each section from an ordered rule list, and lays the
//! section's content out as absolutely positioned text and image elements.
//! Missing content falls back to literal defaults and missing images are
//! dropped with a warning, so a readable document always yields a deck.
//!
//! # Example
//!
//! ```
//! use htmldeck_core::{Converter, DeckConfig, TemplateId};
//!
//! let html = r#"
//!     <section><h2>Interactive Dashboard: See It Live</h2></section>
//!     <section><h2>Methods</h2><p>We compared two classifiers.</p></section>
//! "#;
//! let plan = Converter::new(DeckConfig::default()).plan_str(html);
//!
//! assert_eq!(plan.deck.len(), 2);
//! assert_eq!(plan.report.slides[0].template, TemplateId::Dashboard);
//! assert_eq!(plan.report.slides[1].template, TemplateId::Generic);
//! ```

pub mod assembler;
pub mod assets;
pub mod classifier;
pub mod config;
pub mod convert;
pub mod defaults;
pub mod diagnostics;
pub mod error;
pub mod extract;
pub mod geometry;
pub mod layout;
pub mod section;
pub mod templates;

// Re-export main types and functions
pub use assembler::{Assembly, DeckAssembler, SlideRecord};
pub use assets::{AssetResolver, ResolveStrategy};
pub use classifier::{classify, ClassificationRule, RULES};
pub use config::DeckConfig;
pub use convert::{ConversionReport, Converter, DeckPlan};
pub use diagnostics::{Diagnostic, Severity};
pub use error::{EngineError, Result, TemplateError};
pub use geometry::ImageGeometry;
pub use layout::{Canvas, LayoutContext, RenderContext, SlideBuilder};
pub use section::{parse_sections, ImageRef, Section};
pub use templates::{SlideTemplate, TemplateId};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
