//! Deck assembly.
//!
//! Sections are classified and rendered one at a time, in document order,
//! each with a fresh [`SlideBuilder`]. A failing template never drops its
//! slide: whatever it placed before failing is kept and a warning is
//! recorded, so the deck always holds exactly one slide per section.

use crate::assets::ResolveStrategy;
use crate::classifier::classify;
use crate::config::{DeckConfig, GenericConfig};
use crate::diagnostics::Diagnostic;
use crate::geometry::{ImageGeometry, NativeImage};
use crate::layout::{Canvas, RenderContext, SlideBuilder};
use crate::section::Section;
use crate::templates::{SlideTemplate, TemplateId};
use htmldeck_pptx::{Deck, Slide};
use serde::Serialize;
use tracing::{debug, info, warn};

/// What happened to one section
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlideRecord {
    /// 1-based slide index
    pub index: usize,
    pub title: String,
    pub template: TemplateId,
    /// Positioned elements on the slide
    pub elements: usize,
    /// Image elements on the slide
    pub images: usize,
}

/// A laid-out deck with its per-slide records and diagnostics.
#[derive(Debug, Clone, Default)]
pub struct Assembly {
    pub deck: Deck,
    pub slides: Vec<SlideRecord>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Assembly {
    pub fn warning_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_warning()).count()
    }
}

/// Turns sections into slides.
#[derive(Debug, Clone)]
pub struct DeckAssembler {
    canvas: Canvas,
    geometry: ImageGeometry,
    generic: GenericConfig,
}

impl Default for DeckAssembler {
    fn default() -> Self {
        Self::new(&DeckConfig::default())
    }
}

impl DeckAssembler {
    pub fn new(config: &DeckConfig) -> Self {
        Self {
            canvas: Canvas::from(config.canvas),
            geometry: ImageGeometry::from_config(&config.images),
            generic: config.generic,
        }
    }

    fn context(&self) -> RenderContext<'_> {
        RenderContext {
            canvas: self.canvas,
            geometry: &self.geometry,
            generic: &self.generic,
        }
    }

    /// Lay out every section, in order.
    pub fn assemble(&self, sections: &[Section]) -> Assembly {
        let mut assembly = Assembly::default();
        for section in sections {
            let template = classify(section);
            let slide = self.render_with(section, template.template(), &mut assembly.diagnostics);
            assembly.slides.push(SlideRecord {
                index: section.index,
                title: section.title.clone(),
                template,
                elements: slide.len(),
                images: slide.image_count(),
            });
            assembly.deck.push(slide);
        }

        info!(
            slides = assembly.deck.len(),
            warnings = assembly.warning_count(),
            "Assembled deck"
        );
        assembly
    }

    /// Render one section with a given template, recording problems in
    /// `diagnostics`. Always returns a slide.
    pub fn render_with(
        &self,
        section: &Section,
        template: &dyn SlideTemplate,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Slide {
        for source in &section.unresolved {
            diagnostics.push(
                Diagnostic::warning(format!("Image not found: {}", source))
                    .with_code("ASSET001")
                    .with_slide(section.index)
                    .with_help("place the file under the asset root or use an absolute path"),
            );
        }
        for image in &section.images {
            let Some(path) = image.resolved_path.as_deref() else {
                continue;
            };
            if image.resolved_by == Some(ResolveStrategy::Basename) {
                diagnostics.push(
                    Diagnostic::info(format!(
                        "Image {} found by file name at {}",
                        image.source_path,
                        path.display()
                    ))
                    .with_code("ASSET003")
                    .with_slide(section.index),
                );
            }
            if let Err(e) = NativeImage::inspect(path) {
                diagnostics.push(
                    Diagnostic::warning(format!(
                        "Could not decode image {}: {}; using default size",
                        path.display(),
                        e
                    ))
                    .with_code("ASSET002")
                    .with_slide(section.index),
                );
            }
        }

        let mut builder = SlideBuilder::new(section.background);
        if let Err(err) = template.render(section, &self.context(), &mut builder) {
            warn!(
                slide = section.index,
                template = %template.id(),
                error = %err,
                "Template failed, keeping partial slide"
            );
            diagnostics.push(
                Diagnostic::warning(format!("Template '{}' failed: {}", template.id(), err))
                    .with_code(err.code())
                    .with_slide(section.index),
            );
        }

        let slide = builder.finish();
        debug!(
            slide = section.index,
            template = %template.id(),
            elements = slide.len(),
            "Rendered slide"
        );
        slide
    }
}
