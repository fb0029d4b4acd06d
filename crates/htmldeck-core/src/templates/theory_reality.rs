//! Contrasting "theory" and "reality" cards with bullet items.

use super::common::{self, palette, styled, BULLET, CONTENT_WIDTH, LEFT_MARGIN};
use super::{SlideTemplate, TemplateId, TemplateResult};
use crate::defaults;
use crate::extract::{extract_text, node_text, TextPredicate};
use crate::layout::{LayoutContext, RenderContext, SlideBuilder};
use crate::section::Section;
use htmldeck_markup::NodeRef;
use htmldeck_pptx::Color;

const NOTE_TOP: f64 = 1.2;
const CARD_TOP: f64 = 1.8;
const CARD_FLOOR: f64 = 5.5;
const INSIGHT_TOP: f64 = 5.6;

pub struct TheoryVsReality;

/// Card paragraphs then list items, each longer than 10 characters.
fn card_items(card: NodeRef<'_>) -> Vec<String> {
    let mut items = common::texts_longer_than(card, "p", 10);
    items.extend(common::texts_longer_than(card, "li", 10));
    items
}

/// Prefix a bullet unless the item already carries one.
fn bulleted(item: &str) -> String {
    if item.starts_with('\u{2022}') {
        item.to_string()
    } else {
        format!("{BULLET}{item}")
    }
}

struct Column {
    prefix: &'static str,
    left: f64,
    width: f64,
    color: Color,
    max_items: usize,
}

const COLUMNS: [Column; 2] = [
    Column {
        prefix: "theory",
        left: LEFT_MARGIN,
        width: 4.5,
        color: palette::DANGER,
        max_items: 4,
    },
    Column {
        prefix: "reality",
        left: 5.5,
        width: 4.0,
        color: palette::SUCCESS,
        max_items: 3,
    },
];

impl Column {
    fn draw(&self, slide: &mut SlideBuilder, card: Option<NodeRef<'_>>) -> TemplateResult {
        let id = TemplateId::TheoryVsReality;
        let heading = card
            .and_then(|c| common::first_text(c, "h3"))
            .unwrap_or_else(|| defaults::text(id, &format!("{}.heading", self.prefix)).to_string());
        let items = card
            .map(card_items)
            .filter(|items| !items.is_empty())
            .unwrap_or_else(|| common::owned(defaults::list(id, &format!("{}.items", self.prefix))));

        let mut cursor =
            LayoutContext::new(self.left + 0.1, CARD_TOP, self.width - 0.2).with_floor(CARD_FLOOR);
        slide.text(cursor.bbox(0.35), &heading, styled(14.0, self.color).bold())?;
        cursor = cursor.advance(0.4);

        let mut line = cursor.inset(0.05, 0.1);
        for item in items.iter().take(self.max_items) {
            if !line.has_room() {
                break;
            }
            slide.text(line.bbox(0.4), &bulleted(item), styled(9.0, palette::BODY))?;
            line = line.advance(0.45);
        }
        Ok(())
    }
}

impl SlideTemplate for TheoryVsReality {
    fn id(&self) -> TemplateId {
        TemplateId::TheoryVsReality
    }

    fn render(
        &self,
        section: &Section,
        _ctx: &RenderContext<'_>,
        slide: &mut SlideBuilder,
    ) -> TemplateResult {
        common::place_title(section, slide)?;
        let root = section.root();

        let subtitle = root.find("p").map(node_text).filter(|t| {
            let lower = t.to_lowercase();
            lower.contains("data tells") || lower.contains("textbooks")
        });
        common::place_subtitle(slide, subtitle, 0.8, 0.3, styled(11.0, palette::MUTED))?;

        let inset = LayoutContext::new(LEFT_MARGIN + 0.1, NOTE_TOP, CONTENT_WIDTH - 0.2);
        let note = extract_text(root)
            .structured(|r| r.find_tag_with_class("div", "bg-light").map(node_text))
            .keyword(&TextPredicate::matching(&["p"], |t| {
                t.contains("Box's M Test") || t.to_lowercase().contains("covariance matrices")
            }))
            .or_empty();
        slide.text(inset.bbox(0.5), &note, styled(8.0, palette::BODY))?;

        let cards = common::cards(root);
        for (i, column) in COLUMNS.iter().enumerate() {
            column.draw(slide, cards.get(i).copied())?;
        }

        let insight = TextPredicate::matching(&["div"], |t| t.contains("Key Insight")).first_match(root);
        if let Some(insight) = insight {
            slide.text(
                inset.at(INSIGHT_TOP).bbox(0.6),
                &insight,
                styled(9.0, palette::PRIMARY).bold(),
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::test_support::*;

    #[test]
    fn test_cards_from_markup() {
        let slide = render(
            &TheoryVsReality,
            &section(
                r#"<section><h2>The Plot Twist: Theory vs. Reality</h2>
                   <p>What the textbooks said</p>
                   <div class="bg-light">Box's M Test rejected equal covariance.</div>
                   <div class="two-col">
                     <div class="card"><h3>Theory</h3><p>QDA should win here.</p><ul><li>short</li><li>Unequal covariances</li></ul></div>
                     <div class="card"><h3>Reality</h3><p>• LDA won anyway.</p></div>
                   </div>
                   <div>Key Insight: simpler models generalize.</div></section>"#,
            ),
        );
        assert!(text_element(&slide, "What the textbooks said").is_some());
        let (bbox, _) = text_element(&slide, "Box's M Test rejected equal covariance.").unwrap();
        assert_eq!(bbox.top, 1.2);

        let (bbox, style) = text_element(&slide, "Theory").unwrap();
        assert!((bbox.left - 0.6).abs() < 1e-9);
        assert_eq!(style.color, Some(palette::DANGER));
        let (bbox, _) = text_element(&slide, "\u{2022} QDA should win here.").unwrap();
        assert!((bbox.top - 2.2).abs() < 1e-9);
        assert!((bbox.left - 0.65).abs() < 1e-9);
        assert!(text_element(&slide, "\u{2022} Unequal covariances").is_some());
        assert!(!has_text(&slide, "short"));

        let (_, style) = text_element(&slide, "Reality").unwrap();
        assert_eq!(style.color, Some(palette::SUCCESS));
        assert!(text_element(&slide, "\u{2022} LDA won anyway.").is_some());

        let (bbox, _) = text_element(&slide, "Key Insight: simpler models generalize.").unwrap();
        assert_eq!(bbox.top, 5.6);
    }

    #[test]
    fn test_defaults_and_item_cap() {
        let slide = render(
            &TheoryVsReality,
            &section("<section><h2>The Plot Twist</h2></section>"),
        );
        assert!(text_element(&slide, "What Theory Said").is_some());
        assert!(text_element(&slide, "What Data Revealed").is_some());
        assert!(text_element(&slide, "\u{2022} LDA Won by 4.79%").is_some());
        // title, 2 headings, 4 + 3 items
        assert_eq!(slide.len(), 10);
    }

    #[test]
    fn test_bulleted() {
        assert_eq!(bulleted("x"), "\u{2022} x");
        assert_eq!(bulleted("\u{2022} x"), "\u{2022} x");
    }
}
