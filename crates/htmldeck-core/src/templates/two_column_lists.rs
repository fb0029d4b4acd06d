//! Strong and weak lists on the left, implications on the right.

use super::common::{self, palette, styled, BULLET, LEFT_MARGIN};
use super::{SlideTemplate, TemplateId, TemplateResult};
use crate::defaults;
use crate::error::TemplateError;
use crate::extract::{extract_list, node_text, TextPredicate};
use crate::layout::{LayoutContext, RenderContext, SlideBuilder};
use crate::section::Section;
use htmldeck_markup::NodeRef;

const LEFT_WIDTH: f64 = 4.5;
const RIGHT_LEFT: f64 = 5.5;
const RIGHT_WIDTH: f64 = 4.0;
const TOP: f64 = 1.0;

pub struct TwoColumnLists;

/// List items (longer than 10 characters) under the parent of every `h4`
/// whose text contains `marker`.
fn items_under_heading(root: NodeRef<'_>, marker: &str) -> Vec<String> {
    root.find_all("h4")
        .into_iter()
        .filter(|h| node_text(*h).contains(marker))
        .flat_map(|h| common::texts_longer_than(h.parent().unwrap_or(h), "li", 10))
        .collect()
}

/// Header followed by up to `limit` bullets while the cursor is above `floor`.
fn place_list(
    slide: &mut SlideBuilder,
    mut cursor: LayoutContext,
    header: &str,
    items: &[String],
    limit: usize,
) -> Result<LayoutContext, TemplateError> {
    slide.text(cursor.bbox(0.35), header, styled(16.0, palette::PRIMARY).bold())?;
    cursor = cursor.advance(0.4);
    for item in items.iter().take(limit) {
        if cursor.has_room() {
            slide.text(
                cursor.inset(0.2, 0.2).bbox(0.35),
                &format!("{BULLET}{item}"),
                styled(9.0, palette::BODY),
            )?;
            cursor = cursor.advance(0.4);
        }
    }
    Ok(cursor)
}

impl SlideTemplate for TwoColumnLists {
    fn id(&self) -> TemplateId {
        TemplateId::TwoColumnLists
    }

    fn render(
        &self,
        section: &Section,
        _ctx: &RenderContext<'_>,
        slide: &mut SlideBuilder,
    ) -> TemplateResult {
        common::place_title(section, slide)?;
        let root = section.root();

        let strong = extract_list(root)
            .structured(|r| Some(items_under_heading(r, "Strong")))
            .keyword(&TextPredicate::matching(&["li"], |t| {
                t.contains("0.54") || t.contains("0.42")
            }))
            .or_default(defaults::list(self.id(), "strong"));
        let weak = extract_list(root)
            .structured(|r| Some(items_under_heading(r, "Weak")))
            .keyword(&TextPredicate::matching(&["li"], |t| {
                t.contains("0.00") || t.contains("0.02")
            }))
            .or_default(defaults::list(self.id(), "weak"));

        let cursor = LayoutContext::new(LEFT_MARGIN, TOP, LEFT_WIDTH).with_floor(4.5);
        let cursor = place_list(slide, cursor, "Strong Correlations", &strong, 3)?;
        let cursor = cursor.advance(0.2).with_floor(5.5);
        place_list(slide, cursor, "Weak Correlations", &weak, 2)?;

        let implications = extract_list(root)
            .structured(|r| {
                r.find_by_class("bg-light")
                    .map(|panel| common::texts_longer_than(panel, "p", 20))
            })
            .or_default(defaults::list(self.id(), "implications"));

        let mut cursor = LayoutContext::new(RIGHT_LEFT, TOP, RIGHT_WIDTH).with_floor(6.0);
        slide.text(cursor.bbox(0.35), "Implications", styled(16.0, palette::ACCENT).bold())?;
        cursor = cursor.advance(0.4);
        for text in implications.iter().take(2) {
            if cursor.has_room() {
                slide.text(cursor.inset(0.1, 0.2).bbox(0.6), text, styled(9.0, palette::BODY))?;
                cursor = cursor.advance(0.7);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::test_support::*;

    #[test]
    fn test_lists_from_headings() {
        let section = section(
            r#"<section><h2>Key Correlations</h2>
               <div><h4>Strong Correlations</h4><ul>
                 <li>Age &amp; Pregnancies (0.54)</li><li>tiny</li>
               </ul></div>
               <div><h4>Weak Correlations</h4><ul><li>BP &amp; Pedigree (0.00)</li></ul></div>
               <div class="bg-light"><p>Moderate correlations everywhere we looked.</p></div>
               </section>"#,
        );
        let slide = render(&TwoColumnLists, &section);

        let (bbox, _) = text_element(&slide, "Strong Correlations").unwrap();
        assert_eq!(bbox.top, 1.0);
        let (bbox, _) = text_element(&slide, "\u{2022} Age & Pregnancies (0.54)").unwrap();
        assert!((bbox.top - 1.4).abs() < 1e-9);
        assert!((bbox.left - 0.7).abs() < 1e-9);
        let (bbox, _) = text_element(&slide, "Weak Correlations").unwrap();
        assert!((bbox.top - 2.0).abs() < 1e-9);
        assert!(text_element(&slide, "\u{2022} BP & Pedigree (0.00)").is_some());
        assert!(!has_text(&slide, "tiny"));

        let (_, style) = text_element(&slide, "Implications").unwrap();
        assert_eq!(style.color, Some(palette::ACCENT));
        assert!(text_element(&slide, "Moderate correlations everywhere we looked.").is_some());
    }

    #[test]
    fn test_defaults() {
        let slide = render(&TwoColumnLists, &section("<section><h2>Key Correlations</h2></section>"));
        assert!(has_text(&slide, "Age & Pregnancies (0.54)"));
        assert!(has_text(&slide, "Pregnancies & BMI (0.02)"));
        assert!(has_text(&slide, "No single dominant predictor"));
        // title, 2 headers + 3 + 2, implications header + 2
        assert_eq!(slide.len(), 11);
    }
}
