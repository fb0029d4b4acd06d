//! Positioned-element slide model.
//!
//! This is the boundary between layout and packaging: templates append
//! elements with absolute geometry, and the writer serializes them in
//! insertion order (later elements paint over earlier ones).

use serde::{Serialize, Serializer};
use std::fmt;
use std::path::PathBuf;

/// Rectangle in inches, measured from the top-left corner of the slide.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Right edge
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Bottom edge
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Finite coordinates and non-negative extent.
    pub fn is_valid(&self) -> bool {
        [self.left, self.top, self.width, self.height]
            .iter()
            .all(|v| v.is_finite())
            && self.width >= 0.0
            && self.height >= 0.0
    }
}

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb`, `rrggbb` or `#rgb`.
    pub fn parse_hex(value: &str) -> Option<Self> {
        let hex = value.trim().trim_start_matches('#');
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let expanded: String = match hex.len() {
            3 => hex.chars().flat_map(|c| [c, c]).collect(),
            6 => hex.to_string(),
            _ => return None,
        };
        let channel = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).ok();
        Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Parse a hex color; anything unparsable (including `none`) is white.
    pub fn from_hex(value: &str) -> Self {
        Self::parse_hex(value).unwrap_or(Self::WHITE)
    }

    /// Uppercase `RRGGBB`, as DrawingML expects.
    pub fn hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Horizontal paragraph alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

impl Alignment {
    /// DrawingML `algn` value
    pub fn as_ooxml(&self) -> &'static str {
        match self {
            Self::Left => "l",
            Self::Center => "ctr",
            Self::Right => "r",
        }
    }
}

/// Run formatting for a text element.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextStyle {
    pub font_size_pt: f64,
    pub bold: bool,
    /// `None` inherits the theme text color.
    pub color: Option<Color>,
    pub alignment: Alignment,
}

impl TextStyle {
    pub fn new(font_size_pt: f64) -> Self {
        Self {
            font_size_pt,
            bold: false,
            color: None,
            alignment: Alignment::Left,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn centered(mut self) -> Self {
        self.alignment = Alignment::Center;
        self
    }

    pub fn aligned(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }
}

/// A slide element with explicit geometry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PositionedElement {
    /// Word-wrapped text box holding one paragraph
    Text {
        bbox: BoundingBox,
        text: String,
        style: TextStyle,
    },
    /// Picture scaled to the box
    Image { bbox: BoundingBox, path: PathBuf },
    /// Borderless filled rectangle
    Shape { bbox: BoundingBox, fill: Color },
}

impl PositionedElement {
    pub fn text(bbox: BoundingBox, text: impl Into<String>, style: TextStyle) -> Self {
        Self::Text {
            bbox,
            text: text.into(),
            style,
        }
    }

    pub fn image(bbox: BoundingBox, path: impl Into<PathBuf>) -> Self {
        Self::Image {
            bbox,
            path: path.into(),
        }
    }

    pub fn shape(bbox: BoundingBox, fill: Color) -> Self {
        Self::Shape { bbox, fill }
    }

    pub fn bbox(&self) -> &BoundingBox {
        match self {
            Self::Text { bbox, .. } | Self::Image { bbox, .. } | Self::Shape { bbox, .. } => bbox,
        }
    }

    /// Text payload, for text elements.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { text, .. } => Some(text),
            _ => None,
        }
    }

    pub fn is_image(&self) -> bool {
        matches!(self, Self::Image { .. })
    }
}

/// One output slide
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Slide {
    /// Flat background fill; `None` keeps the master background
    pub background: Option<Color>,

    /// Elements in paint order
    pub elements: Vec<PositionedElement>,
}

impl Slide {
    pub fn new(background: Option<Color>) -> Self {
        Self {
            background,
            elements: Vec::new(),
        }
    }

    pub fn push(&mut self, element: PositionedElement) {
        self.elements.push(element);
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Text payloads in paint order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.elements.iter().filter_map(|e| e.as_text())
    }

    pub fn image_count(&self) -> usize {
        self.elements.iter().filter(|e| e.is_image()).count()
    }
}

/// Ordered collection of slides
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Deck {
    pub slides: Vec<Slide>,
}

impl Deck {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, slide: Slide) {
        self.slides.push(slide);
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Slide> {
        self.slides.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_parsing() {
        assert_eq!(Color::from_hex("#005088"), Color::rgb(0x00, 0x50, 0x88));
        assert_eq!(Color::from_hex("ef4444"), Color::rgb(0xef, 0x44, 0x44));
        assert_eq!(Color::from_hex("#abc"), Color::rgb(0xaa, 0xbb, 0xcc));
        assert_eq!(Color::from_hex("zzz"), Color::WHITE);
        assert_eq!(Color::from_hex("none"), Color::WHITE);
        assert_eq!(Color::from_hex("#12345"), Color::WHITE);
        assert!(Color::parse_hex("").is_none());
    }

    #[test]
    fn test_color_formatting() {
        let color = Color::rgb(0x11, 0xca, 0xa0);
        assert_eq!(color.hex(), "11CAA0");
        assert_eq!(color.to_string(), "#11caa0");
        assert_eq!(serde_json::to_string(&color).unwrap(), "\"#11caa0\"");
    }

    #[test]
    fn test_bounding_box_validity() {
        assert!(BoundingBox::new(0.5, 0.2, 9.0, 0.6).is_valid());
        assert!(BoundingBox::new(0.0, 0.0, 0.0, 0.0).is_valid());
        assert!(!BoundingBox::new(f64::NAN, 0.0, 1.0, 1.0).is_valid());
        assert!(!BoundingBox::new(0.0, 0.0, -1.0, 1.0).is_valid());
        assert!(!BoundingBox::new(0.0, f64::INFINITY, 1.0, 1.0).is_valid());

        let bbox = BoundingBox::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(bbox.right(), 4.0);
        assert_eq!(bbox.bottom(), 6.0);
    }

    #[test]
    fn test_text_style_builder() {
        let style = TextStyle::new(80.0)
            .bold()
            .color(Color::rgb(0xef, 0x44, 0x44))
            .centered();
        assert_eq!(style.font_size_pt, 80.0);
        assert!(style.bold);
        assert_eq!(style.alignment, Alignment::Center);
        assert_eq!(Alignment::Center.as_ooxml(), "ctr");
    }

    #[test]
    fn test_slide_accessors() {
        let mut slide = Slide::new(None);
        slide.push(PositionedElement::text(
            BoundingBox::new(0.5, 0.2, 9.0, 0.6),
            "Title",
            TextStyle::new(28.0),
        ));
        slide.push(PositionedElement::image(
            BoundingBox::new(1.0, 1.0, 4.0, 3.0),
            "/tmp/chart.png",
        ));
        assert_eq!(slide.len(), 2);
        assert_eq!(slide.image_count(), 1);
        assert_eq!(slide.texts().collect::<Vec<_>>(), vec!["Title"]);
    }

    #[test]
    fn test_element_serialization_is_tagged() {
        let element = PositionedElement::shape(BoundingBox::new(0.0, 0.0, 1.0, 1.0), Color::rgb(0, 0, 0));
        let json = serde_json::to_value(&element).unwrap();
        assert_eq!(json["kind"], "shape");
        assert_eq!(json["fill"], "#000000");
    }
}
