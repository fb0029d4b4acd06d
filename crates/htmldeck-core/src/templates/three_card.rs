//! Title, subtitle and three cards side by side.

use super::common::{self, palette, styled, CONTENT_WIDTH, LEFT_MARGIN};
use super::{SlideTemplate, TemplateId, TemplateResult};
use crate::defaults;
use crate::extract::{extract_list, extract_text, node_text, TextPredicate};
use crate::layout::{LayoutContext, RenderContext, SlideBuilder};
use crate::section::Section;
use htmldeck_markup::NodeRef;
use htmldeck_pptx::{BoundingBox, Color};

const CARD_WIDTH: f64 = 2.8;
const CARD_GAP: f64 = 0.3;
const CARD_TOP: f64 = 1.5;

/// Heading color, detail limit and detail step per card.
const CARDS: [(Color, usize, f64); 3] = [
    (palette::PRIMARY, 2, 0.4),
    (palette::ACCENT, 2, 0.4),
    (palette::DANGER, 3, 0.35),
];

pub struct ThreeCardOverview;

/// Direct `div.card` children of `.three-col`, else any direct `div`.
fn card_nodes(root: NodeRef<'_>) -> Vec<NodeRef<'_>> {
    let Some(container) = root.find_by_class("three-col") else {
        return Vec::new();
    };
    let cards = container.child_elements_with_class(Some("div"), "card");
    if cards.is_empty() {
        container.children_by_tag("div").collect()
    } else {
        cards
    }
}

/// Paragraph texts of a card. With `join_emphasis`, a paragraph holding
/// bold runs is replaced by those runs joined with ` = `.
fn card_details(card: NodeRef<'_>, join_emphasis: bool) -> Vec<String> {
    card.find_all("p")
        .into_iter()
        .filter_map(|p| {
            let text = node_text(p);
            if text.chars().count() <= 5 {
                return None;
            }
            let emphasis = p.find_all_any(&["b", "strong"]);
            if join_emphasis && !emphasis.is_empty() {
                let parts: Vec<String> = emphasis.into_iter().map(node_text).collect();
                Some(parts.join(" = "))
            } else {
                Some(text)
            }
        })
        .collect()
}

impl SlideTemplate for ThreeCardOverview {
    fn id(&self) -> TemplateId {
        TemplateId::ThreeCardOverview
    }

    fn render(
        &self,
        section: &Section,
        _ctx: &RenderContext<'_>,
        slide: &mut SlideBuilder,
    ) -> TemplateResult {
        common::place_title(section, slide)?;
        let root = section.root();

        let subtitle = extract_text(root)
            .keyword(&TextPredicate::keywords(&["p"], &["real-world"]))
            .found();
        if let Some(subtitle) = subtitle {
            slide.text(
                BoundingBox::new(LEFT_MARGIN, 0.9, CONTENT_WIDTH, 0.3),
                &subtitle,
                styled(12.0, palette::MUTED),
            )?;
        }

        let nodes = card_nodes(root);
        let nodes = if nodes.len() >= 3 { nodes } else { Vec::new() };

        let mut left = LEFT_MARGIN;
        for (i, (color, limit, step)) in CARDS.into_iter().enumerate() {
            let card = nodes.get(i).copied();
            let heading_region = format!("card{}.heading", i + 1);
            let details_region = format!("card{}.details", i + 1);

            let heading = extract_text(root)
                .structured(|_| card.and_then(|c| common::first_text(c, "h4")))
                .or_default(defaults::text(self.id(), &heading_region));
            let details = extract_list(root)
                .structured(|_| card.map(|c| card_details(c, i == 2)))
                .or_default(defaults::list(self.id(), &details_region));

            let column = LayoutContext::new(left, CARD_TOP, CARD_WIDTH);
            slide.text(column.bbox(0.5), &heading, styled(20.0, color).bold().centered())?;

            let mut cursor = column.advance(0.6).inset(0.1, 0.2);
            for detail in details.iter().take(limit) {
                slide.text(cursor.bbox(0.4), detail, styled(9.0, palette::BODY))?;
                cursor = cursor.advance(step);
            }

            left += CARD_WIDTH + CARD_GAP;
        }
        Ok(())
    }
}
