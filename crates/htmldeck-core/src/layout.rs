//! Layout primitives shared by the templates.
//!
//! [`LayoutContext`] is the vertical cursor: a `Copy` value that placement
//! steps take and return, so no cursor state outlives a single template
//! call. [`SlideBuilder`] collects the placed elements and rejects
//! geometry the container cannot represent.

use crate::config::{CanvasConfig, GenericConfig};
use crate::error::TemplateError;
use crate::extract::normalize;
use crate::geometry::ImageGeometry;
use htmldeck_pptx::{BoundingBox, Color, PositionedElement, Slide, TextStyle};
use std::path::Path;

/// Lowest cursor position content may start at, in inches.
pub const DEFAULT_FLOOR: f64 = 6.8;

/// Slide canvas in inches
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 10.0,
            height: 7.5,
        }
    }
}

impl From<CanvasConfig> for Canvas {
    fn from(config: CanvasConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
        }
    }
}

impl Canvas {
    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::new(0.0, 0.0, self.width, self.height)
    }

    /// Left edge that centers a box of `width`.
    pub fn centered_left(&self, width: f64) -> f64 {
        (self.width - width) / 2.0
    }
}

/// Vertical cursor within a column
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutContext {
    pub left: f64,
    pub y: f64,
    pub width: f64,
    pub floor: f64,
}

impl LayoutContext {
    pub fn new(left: f64, y: f64, width: f64) -> Self {
        Self {
            left,
            y,
            width,
            floor: DEFAULT_FLOOR,
        }
    }

    pub fn with_floor(mut self, floor: f64) -> Self {
        self.floor = floor;
        self
    }

    /// Move the cursor down by `dy`.
    pub fn advance(mut self, dy: f64) -> Self {
        self.y += dy;
        self
    }

    /// Move the cursor to `y`.
    pub fn at(mut self, y: f64) -> Self {
        self.y = y;
        self
    }

    /// Shift right by `dx` and narrow by `shrink`.
    pub fn inset(mut self, dx: f64, shrink: f64) -> Self {
        self.left += dx;
        self.width -= shrink;
        self
    }

    /// Still above the floor.
    pub fn has_room(&self) -> bool {
        self.y < self.floor
    }

    /// Strictly below the floor.
    pub fn past_floor(&self) -> bool {
        self.y > self.floor
    }

    /// Box at the cursor spanning the column.
    pub fn bbox(&self, height: f64) -> BoundingBox {
        BoundingBox::new(self.left, self.y, self.width, height)
    }
}

/// Shared inputs of a template call
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub canvas: Canvas,
    pub geometry: &'a ImageGeometry,
    pub generic: &'a GenericConfig,
}

/// Appends elements to one slide
#[derive(Debug, Default)]
pub struct SlideBuilder {
    slide: Slide,
}

impl SlideBuilder {
    pub fn new(background: Option<Color>) -> Self {
        Self {
            slide: Slide::new(background),
        }
    }

    /// Paint the whole slide with `color`.
    pub fn set_background(&mut self, color: Color) {
        self.slide.background = Some(color);
    }

    /// Place a text box. Text is normalized first; nothing is placed when
    /// it ends up empty, and `Ok(false)` is returned.
    pub fn text(
        &mut self,
        bbox: BoundingBox,
        text: &str,
        style: TextStyle,
    ) -> Result<bool, TemplateError> {
        let text = normalize(text);
        if text.is_empty() {
            return Ok(false);
        }
        check_geometry(&bbox, &text)?;
        if !style.font_size_pt.is_finite() || style.font_size_pt <= 0.0 {
            return Err(TemplateError::invalid_geometry(
                region_name(&text),
                format!("font size {} pt", style.font_size_pt),
            ));
        }
        self.slide.push(PositionedElement::text(bbox, text, style));
        Ok(true)
    }

    /// Place a picture.
    pub fn image(&mut self, bbox: BoundingBox, path: &Path) -> Result<(), TemplateError> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        check_geometry(&bbox, &name)?;
        self.slide.push(PositionedElement::image(bbox, path));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.slide.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slide.is_empty()
    }

    /// Elements placed so far.
    pub fn elements(&self) -> &[PositionedElement] {
        &self.slide.elements
    }

    pub fn finish(self) -> Slide {
        self.slide
    }
}

fn region_name(text: &str) -> String {
    text.chars().take(32).collect()
}

fn check_geometry(bbox: &BoundingBox, region: &str) -> Result<(), TemplateError> {
    if bbox.is_valid() {
        Ok(())
    } else {
        Err(TemplateError::invalid_geometry(
            region_name(region),
            format!(
                "({}, {}, {}, {})",
                bbox.left, bbox.top, bbox.width, bbox.height
            ),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_steps() {
        let ctx = LayoutContext::new(0.5, 1.0, 4.5);
        let next = ctx.advance(0.5).advance(1.2);
        assert!((next.y - 2.7).abs() < 1e-9);
        assert_eq!(ctx.y, 1.0);

        let inner = ctx.inset(0.1, 0.2);
        assert!((inner.left - 0.6).abs() < 1e-9);
        assert!((inner.width - 4.3).abs() < 1e-9);

        assert!(!ctx.at(6.8).past_floor());
        assert!(!ctx.at(6.8).has_room());
        assert!(ctx.at(6.9).past_floor());
        assert!(ctx.with_floor(4.5).at(4.4).has_room());
    }

    #[test]
    fn test_bbox_from_cursor() {
        let ctx = LayoutContext::new(5.6, 1.0, 3.8);
        assert_eq!(ctx.bbox(0.35), BoundingBox::new(5.6, 1.0, 3.8, 0.35));
    }

    #[test]
    fn test_empty_text_is_skipped() {
        let mut slide = SlideBuilder::new(None);
        let placed = slide
            .text(BoundingBox::new(0.5, 0.2, 9.0, 0.6), " \u{1F4CA} ", TextStyle::new(12.0))
            .unwrap();
        assert!(!placed);
        assert!(slide.is_empty());
    }

    #[test]
    fn test_text_is_normalized() {
        let mut slide = SlideBuilder::new(None);
        slide
            .text(BoundingBox::new(0.5, 0.2, 9.0, 0.6), "  Key\n  Insights ", TextStyle::new(12.0))
            .unwrap();
        assert_eq!(slide.elements()[0].as_text(), Some("Key Insights"));
    }

    #[test]
    fn test_invalid_geometry_rejected() {
        let mut slide = SlideBuilder::new(None);
        let err = slide
            .text(BoundingBox::new(0.5, 0.2, -1.0, 0.6), "Title", TextStyle::new(12.0))
            .unwrap_err();
        assert_eq!(err.code(), "TPL001");

        let err = slide
            .image(BoundingBox::new(f64::NAN, 0.0, 1.0, 1.0), Path::new("/tmp/a.png"))
            .unwrap_err();
        assert!(err.to_string().contains("a.png"));

        let err = slide
            .text(BoundingBox::new(0.5, 0.2, 1.0, 0.6), "Title", TextStyle::new(f64::NAN))
            .unwrap_err();
        assert_eq!(err.code(), "TPL001");
        assert!(slide.is_empty());
    }

    #[test]
    fn test_background_override() {
        let mut slide = SlideBuilder::new(Some(Color::WHITE));
        slide.set_background(Color::rgb(0x00, 0x50, 0x88));
        assert_eq!(slide.finish().background, Some(Color::rgb(0x00, 0x50, 0x88)));
    }

    #[test]
    fn test_canvas_centering() {
        let canvas = Canvas::default();
        assert_eq!(canvas.centered_left(7.0), 1.5);
        assert_eq!(canvas.bounds().right(), 10.0);
    }
}
