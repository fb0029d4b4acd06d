//! Content-driven fallback layout.
//!
//! Walks images, paragraphs, sub-headings, list items and callout regions
//! top to bottom, each group capped by [`GenericConfig`](crate::config::GenericConfig)
//! so the element count stays bounded whatever the input.

use super::common::{self, palette, styled, BULLET, CONTENT_WIDTH, LEFT_MARGIN};
use super::{SlideTemplate, TemplateId, TemplateResult};
use crate::extract::{char_len, node_text};
use crate::layout::{LayoutContext, RenderContext, SlideBuilder};
use crate::section::Section;
use htmldeck_markup::NodeRef;
use htmldeck_pptx::{Alignment, BoundingBox, TextStyle};

const CALLOUT_CLASSES: &[&str] = &["card", "bg-light", "callout-box", "story-highlight"];

/// Paragraphs shorter than this are skipped.
const MIN_PARAGRAPH_CHARS: usize = 3;

/// Short paragraphs naming an image file are stray captions.
const CAPTION_CHARS: usize = 50;

pub struct Generic;

/// Paragraph style derived from inline style hints.
fn paragraph_style(paragraph: NodeRef<'_>) -> TextStyle {
    let style = paragraph.style();

    let mut size = 11.0;
    if style.contains("font-size") {
        if style.contains("0.9em") || style.contains("0.85em") {
            size = 10.0;
        } else if style.contains("0.75em") || style.contains("0.7em") {
            size = 9.0;
        } else if style.contains("0.65em") || style.contains("0.6em") {
            size = 8.0;
        }
    }

    let mut color = palette::BODY;
    if style.contains("color:") {
        if style.contains("#005") {
            color = palette::PRIMARY;
        } else if style.contains("#ef4") {
            color = palette::DANGER;
        } else if style.contains("#64748b") {
            color = palette::MUTED;
        }
    }

    let alignment = if style.contains("text-align: center") || style.contains("text-align:center") {
        Alignment::Center
    } else {
        Alignment::Left
    };

    styled(size, color)
        .with_bold(paragraph.find("strong").is_some())
        .aligned(alignment)
}

fn is_stray_caption(text: &str) -> bool {
    let lower = text.to_lowercase();
    char_len(text) < CAPTION_CHARS && (lower.contains("png") || lower.contains("jpg"))
}

impl SlideTemplate for Generic {
    fn id(&self) -> TemplateId {
        TemplateId::Generic
    }

    fn render(
        &self,
        section: &Section,
        ctx: &RenderContext<'_>,
        slide: &mut SlideBuilder,
    ) -> TemplateResult {
        let limits = ctx.generic;
        let top = common::place_title(section, slide)?;
        let mut cursor =
            LayoutContext::new(LEFT_MARGIN, top, CONTENT_WIDTH).with_floor(limits.floor);
        let root = section.root();

        for image in &section.images {
            if cursor.y > limits.floor - limits.image_reserve {
                break;
            }
            let Some(path) = image.resolved_path.as_deref() else {
                continue;
            };
            let (width, height) =
                ctx.geometry.fit(path, limits.image_box_width, limits.image_box_height);
            slide.image(
                BoundingBox::new(ctx.canvas.centered_left(width), cursor.y, width, height),
                path,
            )?;
            cursor = cursor.advance(height + 0.2);
        }

        for paragraph in root.find_all("p").into_iter().take(limits.max_paragraphs) {
            let text = node_text(paragraph);
            if text.is_empty() || text == section.title || char_len(&text) < MIN_PARAGRAPH_CHARS {
                continue;
            }
            if is_stray_caption(&text) {
                continue;
            }
            if cursor.past_floor() {
                break;
            }
            let style = paragraph_style(paragraph);
            let column = if style.alignment == Alignment::Center {
                cursor.inset(0.5, 1.0)
            } else {
                cursor
            };
            slide.text(column.bbox(0.3), &text, style)?;
            cursor = cursor.advance(0.4);
        }

        for heading in root.find_all_any(&["h3", "h4"]).into_iter().take(limits.max_headings) {
            let text = node_text(heading);
            if text.is_empty() || text == section.title || cursor.past_floor() {
                continue;
            }
            slide.text(cursor.bbox(0.35), &text, styled(16.0, palette::PRIMARY).bold())?;
            cursor = cursor.advance(0.4);
        }

        let bullets = TextStyle::new(10.0);
        for list in root.find_all_any(&["ul", "ol"]).into_iter().take(limits.max_lists) {
            for item in list.children_by_tag("li").take(limits.max_list_items) {
                let text = node_text(item);
                if text.is_empty() || cursor.past_floor() {
                    break;
                }
                slide.text(
                    cursor.inset(0.2, 0.2).bbox(0.25),
                    &format!("{BULLET}{text}"),
                    bullets.clone(),
                )?;
                cursor = cursor.advance(0.3);
            }
        }

        let callouts = root.find_all_by_class_any(CALLOUT_CLASSES);
        for callout in callouts.into_iter().take(limits.max_callouts) {
            let text = node_text(callout);
            if char_len(&text) > 10 && cursor.has_room() {
                slide.text(cursor.bbox(0.5), &text, TextStyle::new(10.0))?;
                cursor = cursor.advance(0.6);
            }
        }
        Ok(())
    }
}

impl Generic {
    /// Most elements a single call can place for `images` resolved images.
    pub fn element_bound(limits: &crate::config::GenericConfig, images: usize) -> usize {
        limits.max_paragraphs
            + limits.max_headings
            + limits.max_lists * limits.max_list_items
            + limits.max_callouts
            + images
            + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GenericConfig;
    use crate::templates::test_support::*;

    #[test]
    fn test_paragraph_hints() {
        let slide = render(
            &Generic,
            &section(
                r##"<section><h2>Methods</h2>
                   <p>Methods</p>
                   <p>ok</p>
                   <p>see chart.png</p>
                   <p style="font-size: 0.75em; color: #ef4444">Small red note here</p>
                   <p style="text-align: center"><strong>Centered</strong> and bold</p>
                   <p>Plain paragraph</p></section>"##,
            ),
        );
        assert!(!has_text(&slide, "chart.png"));
        assert!(text_element(&slide, "ok").is_none());

        let (bbox, style) = text_element(&slide, "Small red note here").unwrap();
        assert_eq!(bbox.top, 1.0);
        assert_eq!(style.font_size_pt, 9.0);
        assert_eq!(style.color, Some(palette::DANGER));
        assert!(!style.bold);

        let (bbox, style) = text_element(&slide, "Centered and bold").unwrap();
        assert_eq!(bbox.left, 1.0);
        assert_eq!(bbox.width, 8.0);
        assert!(style.bold);
        assert_eq!(style.alignment, Alignment::Center);

        let (bbox, style) = text_element(&slide, "Plain paragraph").unwrap();
        assert_eq!(bbox.left, 0.5);
        assert!((bbox.top - 1.8).abs() < 1e-9);
        assert_eq!(style.font_size_pt, 11.0);
        assert_eq!(style.color, Some(palette::BODY));
    }

    #[test]
    fn test_headings_lists_and_callouts() {
        let slide = render(
            &Generic,
            &section(
                r#"<section><p>Intro paragraph</p><h3>Findings</h3>
                   <ul><li>One</li><li>Two<ul><li>Nested</li></ul></li></ul>
                   <div class="callout-box">A callout with enough text</div>
                   <div class="card">tiny</div></section>"#,
            ),
        );
        // no title: content starts lower
        let (bbox, _) = text_element(&slide, "Intro paragraph").unwrap();
        assert_eq!(bbox.top, 1.2);

        let (bbox, style) = text_element(&slide, "Findings").unwrap();
        assert!((bbox.top - 1.6).abs() < 1e-9);
        assert_eq!(style.font_size_pt, 16.0);

        let (bbox, _) = text_element(&slide, "\u{2022} One").unwrap();
        assert!((bbox.left - 0.7).abs() < 1e-9);
        assert!((bbox.width - 8.8).abs() < 1e-9);
        assert!(text_element(&slide, "\u{2022} TwoNested").is_some());
        // nested list is processed as its own list
        assert!(text_element(&slide, "\u{2022} Nested").is_some());

        assert!(text_element(&slide, "A callout with enough text").is_some());
        assert!(text_element(&slide, "tiny").is_none());
    }

    #[test]
    fn test_image_is_centered() {
        let dir = tempfile::tempdir().unwrap();
        write_png(dir.path(), "wide.png", 1400, 700);
        let slide = render(
            &Generic,
            &section_with_assets(
                r#"<section><h2>Chart</h2><img src="images/wide.png"><p>After the image</p></section>"#,
                dir.path(),
            ),
        );
        let image = slide.elements.iter().find(|e| e.is_image()).unwrap();
        let bbox = image.bbox();
        assert_eq!(bbox.width, 7.0);
        assert!((bbox.height - 3.5).abs() < 1e-9);
        assert_eq!(bbox.left, 1.5);
        assert_eq!(bbox.top, 1.0);

        let (bbox, _) = text_element(&slide, "After the image").unwrap();
        assert!((bbox.top - 4.7).abs() < 1e-9);
    }

    #[test]
    fn test_element_count_is_bounded() {
        let mut html = String::from("<section><h2>Everything</h2>");
        for i in 0..40 {
            html.push_str(&format!(
                "<p>Paragraph number {i}</p><h4>Heading {i}</h4><ul><li>a {i}</li><li>b {i}</li></ul><div class=\"card\">Card body number {i}</div>"
            ));
        }
        html.push_str("</section>");
        let slide = render(&Generic, &section(&html));
        assert!(slide.len() <= Generic::element_bound(&GenericConfig::default(), 0));
        assert!(slide.elements.iter().all(|e| e.bbox().top <= 6.8 + 0.4));
    }
}
