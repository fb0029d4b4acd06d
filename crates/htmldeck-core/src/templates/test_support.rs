//! Helpers for template unit tests.

use crate::assets::AssetResolver;
use crate::config::GenericConfig;
use crate::error::TemplateError;
use crate::geometry::ImageGeometry;
use crate::layout::{Canvas, RenderContext, SlideBuilder};
use crate::section::{parse_sections, Section};
use crate::templates::SlideTemplate;
use htmldeck_markup::parse_html;
use htmldeck_pptx::{PositionedElement, Slide, TextStyle};
use image::{Rgb, RgbImage};
use std::path::Path;

/// First section of `html`, resolving images under `assets`.
pub fn section_with_assets(html: &str, assets: &Path) -> Section {
    let tree = parse_html(html);
    parse_sections(&tree, &AssetResolver::new(assets)).remove(0)
}

/// First section of `html` with no assets available.
pub fn section(html: &str) -> Section {
    let dir = tempfile::tempdir().unwrap();
    section_with_assets(html, dir.path())
}

/// Render a section with default settings, returning the partial slide
/// alongside the template's result.
pub fn try_render(
    template: &dyn SlideTemplate,
    section: &Section,
) -> (Slide, Result<(), TemplateError>) {
    let geometry = ImageGeometry::default();
    let generic = GenericConfig::default();
    let ctx = RenderContext {
        canvas: Canvas::default(),
        geometry: &geometry,
        generic: &generic,
    };
    let mut slide = SlideBuilder::new(section.background);
    let result = template.render(section, &ctx, &mut slide);
    (slide.finish(), result)
}

/// Render a section with default settings; panics on template error.
pub fn render(template: &dyn SlideTemplate, section: &Section) -> Slide {
    let (slide, result) = try_render(template, section);
    result.unwrap();
    slide
}

/// Write a solid PNG of the given pixel size.
pub fn write_png(dir: &Path, name: &str, width: u32, height: u32) {
    RgbImage::from_pixel(width, height, Rgb([17, 202, 160]))
        .save(dir.join(name))
        .unwrap();
}

/// Text element whose text equals `text`.
pub fn text_element<'a>(slide: &'a Slide, text: &str) -> Option<(&'a htmldeck_pptx::BoundingBox, &'a TextStyle)> {
    slide.elements.iter().find_map(|e| match e {
        PositionedElement::Text { bbox, text: t, style } if t == text => Some((bbox, style)),
        _ => None,
    })
}

/// Whether any text element contains `needle`.
pub fn has_text(slide: &Slide, needle: &str) -> bool {
    slide.texts().any(|t| t.contains(needle))
}
