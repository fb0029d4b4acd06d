//! Palette, standard regions and placement helpers shared by templates.

use crate::error::TemplateError;
use crate::extract::node_text;
use crate::layout::{RenderContext, SlideBuilder};
use crate::section::{ImageRef, Section};
use htmldeck_markup::NodeRef;
use htmldeck_pptx::{BoundingBox, Color, TextStyle};

/// Deck colors.
pub mod palette {
    use htmldeck_pptx::Color;

    pub const PRIMARY: Color = Color::rgb(0x00, 0x50, 0x88);
    pub const ACCENT: Color = Color::rgb(0x11, 0xca, 0xa0);
    pub const DANGER: Color = Color::rgb(0xef, 0x44, 0x44);
    pub const SUCCESS: Color = Color::rgb(0x10, 0xb9, 0x81);
    pub const BODY: Color = Color::rgb(0x33, 0x41, 0x55);
    pub const MUTED: Color = Color::rgb(0x64, 0x74, 0x8b);
    pub const WARNING: Color = Color::rgb(0x92, 0x40, 0x0e);
    pub const LINK: Color = Color::rgb(0x25, 0x63, 0xeb);
    pub const PALE_BLUE: Color = Color::rgb(0xe0, 0xf2, 0xfe);
    pub const ALERT_BACKGROUND: Color = Color::rgb(0xfe, 0xf2, 0xf2);
}

pub const LEFT_MARGIN: f64 = 0.5;
pub const CONTENT_WIDTH: f64 = 9.0;

/// Cursor start when no title was placed.
pub const BODY_TOP: f64 = 1.2;

/// Cursor start below a standard title.
pub const BELOW_TITLE: f64 = 1.0;

/// Bullet prefix for list lines.
pub const BULLET: &str = "\u{2022} ";

/// Text style with a size and a color.
pub fn styled(size: f64, color: Color) -> TextStyle {
    TextStyle::new(size).color(color)
}

/// Standard title region.
pub fn title_box() -> BoundingBox {
    BoundingBox::new(LEFT_MARGIN, 0.2, CONTENT_WIDTH, 0.6)
}

/// Standard title style: 28pt bold primary.
pub fn title_style() -> TextStyle {
    styled(28.0, palette::PRIMARY).bold()
}

/// Place the title in the standard region and return where content
/// starts.
pub fn place_title(section: &Section, slide: &mut SlideBuilder) -> Result<f64, TemplateError> {
    place_title_with(section, slide, title_box(), title_style())
}

/// Place the title in a custom region; same return as [`place_title`].
pub fn place_title_with(
    section: &Section,
    slide: &mut SlideBuilder,
    bbox: BoundingBox,
    style: TextStyle,
) -> Result<f64, TemplateError> {
    if slide.text(bbox, &section.title, style)? {
        Ok(BELOW_TITLE)
    } else {
        Ok(BODY_TOP)
    }
}

/// Place a subtitle line in the full content width.
pub fn place_subtitle(
    slide: &mut SlideBuilder,
    text: Option<String>,
    top: f64,
    height: f64,
    style: TextStyle,
) -> Result<(), TemplateError> {
    if let Some(text) = text {
        slide.text(
            BoundingBox::new(LEFT_MARGIN, top, CONTENT_WIDTH, height),
            &text,
            style,
        )?;
    }
    Ok(())
}

/// Place an image scaled into `(max_width, max_height)` with its top-left
/// corner at `(left, top)`. Returns the placed size.
pub fn place_image(
    slide: &mut SlideBuilder,
    ctx: &RenderContext<'_>,
    image: &ImageRef,
    left: f64,
    top: f64,
    max_width: f64,
    max_height: f64,
) -> Result<Option<(f64, f64)>, TemplateError> {
    let Some(path) = image.resolved_path.as_deref() else {
        return Ok(None);
    };
    let (width, height) = ctx.geometry.fit(path, max_width, max_height);
    slide.image(BoundingBox::new(left, top, width, height), path)?;
    Ok(Some((width, height)))
}

/// Place the section's first image, if any.
pub fn place_first_image(
    slide: &mut SlideBuilder,
    ctx: &RenderContext<'_>,
    section: &Section,
    left: f64,
    top: f64,
    max_width: f64,
    max_height: f64,
) -> Result<Option<(f64, f64)>, TemplateError> {
    match section.first_image() {
        Some(image) => place_image(slide, ctx, image, left, top, max_width, max_height),
        None => Ok(None),
    }
}

/// First paragraph whose normalized text contains any keyword, ignoring case.
pub fn paragraph_containing(root: NodeRef<'_>, keywords: &[&str]) -> Option<String> {
    root.find_all("p").into_iter().map(node_text).find(|text| {
        let lower = text.to_lowercase();
        keywords.iter().any(|k| lower.contains(&k.to_lowercase()))
    })
}

/// Normalized text of the first `tag` under `node`.
pub fn first_text(node: NodeRef<'_>, tag: &str) -> Option<String> {
    node.find(tag).map(node_text).filter(|t| !t.is_empty())
}

/// Normalized texts of every `tag` under `node` longer than `min_chars`.
pub fn texts_longer_than(node: NodeRef<'_>, tag: &str, min_chars: usize) -> Vec<String> {
    node.find_all(tag)
        .into_iter()
        .map(node_text)
        .filter(|t| t.chars().count() > min_chars)
        .collect()
}

/// Every `.card` element of a section, in document order.
pub fn cards(root: NodeRef<'_>) -> Vec<NodeRef<'_>> {
    root.find_all_by_class("card")
}

/// Owned copies of a default list.
pub fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
