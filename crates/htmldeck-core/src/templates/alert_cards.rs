//! Two big-number alert cards over a pale red background, then a
//! critical-issue note.

use super::common::{self, palette, styled, CONTENT_WIDTH, LEFT_MARGIN};
use super::{SlideTemplate, TemplateId, TemplateResult};
use crate::defaults;
use crate::extract::{extract_text, node_text, TextPredicate};
use crate::layout::{LayoutContext, RenderContext, SlideBuilder};
use crate::section::Section;
use htmldeck_markup::NodeRef;

const CARD_TOP: f64 = 1.4;
const CARD_WIDTH: f64 = 4.2;
const CARD_LEFTS: [f64; 2] = [LEFT_MARGIN, 5.8];
const CRITICAL_TOP: f64 = 4.0;
const CRITICAL_LABEL: &str = "Critical Issue:";

pub struct AlertCards;

/// Card-like containers: `.card`, else any div whose class mentions a card
/// or that is pinned to a fixed width.
fn card_nodes(root: NodeRef<'_>) -> Vec<NodeRef<'_>> {
    let cards = common::cards(root);
    if !cards.is_empty() {
        return cards;
    }
    root.find_all("div")
        .into_iter()
        .filter(|div| {
            div.attr("class").is_some_and(|c| c.contains("card"))
                || div.style().contains("width: 250px")
        })
        .collect()
}

/// `(number, label, text)` for card `n`, each falling back independently.
fn card_content(card: Option<NodeRef<'_>>, n: usize) -> [String; 3] {
    let region = |field: &str| defaults::text(TemplateId::AlertCards, &format!("card{n}.{field}"));
    let paragraphs: Vec<String> = card
        .map(|c| c.find_all("p").into_iter().map(node_text).collect())
        .unwrap_or_default();
    let number = card.and_then(|c| c.find("h1")).map(node_text);
    [
        number.unwrap_or_else(|| region("number").to_string()),
        paragraphs.first().cloned().unwrap_or_else(|| region("label").to_string()),
        paragraphs.get(1).cloned().unwrap_or_else(|| region("text").to_string()),
    ]
}

/// Split `"Label: body"` at the first colon when the text carries the
/// critical-issue label.
fn split_critical(text: &str) -> (String, String) {
    if text.contains(CRITICAL_LABEL) {
        if let Some((head, body)) = text.split_once(':') {
            return (format!("{head}:"), body.trim().to_string());
        }
    }
    (CRITICAL_LABEL.to_string(), text.to_string())
}

impl SlideTemplate for AlertCards {
    fn id(&self) -> TemplateId {
        TemplateId::AlertCards
    }

    fn render(
        &self,
        section: &Section,
        _ctx: &RenderContext<'_>,
        slide: &mut SlideBuilder,
    ) -> TemplateResult {
        slide.set_background(palette::ALERT_BACKGROUND);
        common::place_title_with(
            section,
            slide,
            common::title_box(),
            styled(28.0, palette::DANGER).bold(),
        )?;
        let root = section.root();

        let subtitle = root.find("p").map(node_text).filter(|t| {
            let lower = t.to_lowercase();
            lower.contains("sobering") || lower.contains("reality")
        });
        common::place_subtitle(slide, subtitle, 0.8, 0.3, styled(12.0, palette::MUTED))?;

        let cards = card_nodes(root);
        for (i, left) in CARD_LEFTS.into_iter().enumerate() {
            let [number, label, text] = card_content(cards.get(i).copied(), i + 1);
            let mut cursor = LayoutContext::new(left + 0.2, CARD_TOP, CARD_WIDTH - 0.4);
            slide.text(cursor.bbox(0.8), &number, styled(48.0, palette::DANGER).bold().centered())?;
            cursor = cursor.advance(0.85);
            slide.text(cursor.bbox(0.3), &label, styled(11.0, palette::MUTED).centered())?;
            cursor = cursor.advance(0.35);
            slide.text(cursor.bbox(0.5), &text, styled(9.0, palette::BODY).centered())?;
        }

        let critical = extract_text(root)
            .structured(|r| {
                r.find_all("div")
                    .into_iter()
                    .find(|div| div.style().to_lowercase().contains("fef2f2"))
                    .map(node_text)
            })
            .keyword(&TextPredicate::keywords(&["div"], &["critical issue"]))
            .or_default(defaults::text(self.id(), "critical"));
        let (header, body) = split_critical(&critical);

        let cursor = LayoutContext::new(LEFT_MARGIN + 0.1, CRITICAL_TOP, CONTENT_WIDTH - 0.2);
        slide.text(cursor.bbox(0.3), &header, styled(10.0, palette::BODY).bold())?;
        slide.text(
            cursor.advance(0.35).bbox(1.2),
            &body,
            styled(9.0, palette::BODY),
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::test_support::*;
    use htmldeck_pptx::Alignment;

    #[test]
    fn test_cards_and_critical_note() {
        let slide = render(
            &AlertCards,
            &section(
                r#"<section><h2>The Critical Blind Spot</h2><p>A sobering reality check</p>
                   <div style="width: 250px"><h1>60%</h1><p>Recall</p><p>Six in ten found</p></div>
                   <div style="width: 250px"><h1>40%</h1><p>Missed</p></div>
                   <div class="note">Critical Issue: recall is too low.</div></section>"#,
            ),
        );
        assert_eq!(slide.background, Some(palette::ALERT_BACKGROUND));

        let (_, style) = text_element(&slide, "The Critical Blind Spot").unwrap();
        assert_eq!(style.color, Some(palette::DANGER));
        assert!(text_element(&slide, "A sobering reality check").is_some());

        let (bbox, style) = text_element(&slide, "60%").unwrap();
        assert!((bbox.left - 0.7).abs() < 1e-9);
        assert_eq!(bbox.top, 1.4);
        assert_eq!(style.alignment, Alignment::Center);
        assert_eq!(style.font_size_pt, 48.0);

        let (bbox, _) = text_element(&slide, "40%").unwrap();
        assert!((bbox.left - 6.0).abs() < 1e-9);
        assert!(text_element(&slide, "Missed").is_some());
        // second card has no text paragraph
        assert!(text_element(&slide, "44% of diabetic patients go undetected").is_some());

        assert!(text_element(&slide, "Critical Issue:").is_some());
        let (bbox, _) = text_element(&slide, "recall is too low.").unwrap();
        assert!((bbox.top - 4.35).abs() < 1e-9);
    }

    #[test]
    fn test_defaults() {
        let slide = render(
            &AlertCards,
            &section("<section><h2>The Critical Blind Spot</h2><p>Unrelated opener</p></section>"),
        );
        assert!(!has_text(&slide, "Unrelated opener"));
        assert!(text_element(&slide, "56%").is_some());
        assert!(text_element(&slide, "Missed Cases").is_some());
        assert!(has_text(&slide, "The model is excellent at identifying healthy individuals"));
    }

    #[test]
    fn test_split_critical() {
        assert_eq!(
            split_critical("Critical Issue: a: b"),
            ("Critical Issue:".to_string(), "a: b".to_string())
        );
        assert_eq!(
            split_critical("critical issue without label"),
            ("Critical Issue:".to_string(), "critical issue without label".to_string())
        );
    }
}
