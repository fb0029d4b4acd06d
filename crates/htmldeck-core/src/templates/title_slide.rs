//! Opening slide: title, then subtitle and author lines.

use super::common::{self, CONTENT_WIDTH, LEFT_MARGIN};
use super::{SlideTemplate, TemplateId, TemplateResult};
use crate::extract::node_text;
use crate::layout::{LayoutContext, RenderContext, SlideBuilder, DEFAULT_FLOOR};
use crate::section::Section;
use htmldeck_pptx::TextStyle;

const LINES_TOP: f64 = 2.5;
const MAX_LINES: usize = 5;

pub struct TitleSlide;

impl SlideTemplate for TitleSlide {
    fn id(&self) -> TemplateId {
        TemplateId::TitleSlide
    }

    fn render(
        &self,
        section: &Section,
        _ctx: &RenderContext<'_>,
        slide: &mut SlideBuilder,
    ) -> TemplateResult {
        common::place_title(section, slide)?;

        let mut cursor =
            LayoutContext::new(LEFT_MARGIN, LINES_TOP, CONTENT_WIDTH).with_floor(DEFAULT_FLOOR);
        for paragraph in section.root().find_all("p").into_iter().take(MAX_LINES) {
            let text = node_text(paragraph);
            if text.is_empty() || !cursor.has_room() {
                continue;
            }
            slide.text(cursor.bbox(0.3), &text, TextStyle::new(14.0))?;
            cursor = cursor.advance(0.4);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::test_support::*;

    #[test]
    fn test_lines_below_title() {
        let slide = render(
            &TitleSlide,
            &section(
                "<section><h1>Comparative Analysis of LDA and QDA</h1>\
                 <p>Diabetes prediction</p><p> </p><p>A. Author</p>\
                 <p>3</p><p>4</p><p>5</p><p>6</p></section>",
            ),
        );
        let (bbox, style) = text_element(&slide, "Diabetes prediction").unwrap();
        assert_eq!(bbox.top, 2.5);
        assert_eq!(style.font_size_pt, 14.0);
        assert_eq!(style.color, None);

        // blank paragraphs do not advance the cursor
        let (bbox, _) = text_element(&slide, "A. Author").unwrap();
        assert!((bbox.top - 2.9).abs() < 1e-9);

        // only the first five paragraphs are considered, the blank one included
        assert!(text_element(&slide, "4").is_some());
        assert!(text_element(&slide, "5").is_none());
        assert_eq!(slide.len(), 5);
    }
}
