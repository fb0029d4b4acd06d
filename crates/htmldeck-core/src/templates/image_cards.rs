//! Image with caption on the left, three stacked cards on the right.

use super::common::{self, palette, styled, LEFT_MARGIN};
use super::{SlideTemplate, TemplateId, TemplateResult};
use crate::defaults;
use crate::extract::{node_text, truncate_chars};
use crate::layout::{LayoutContext, RenderContext, SlideBuilder};
use crate::section::Section;
use htmldeck_markup::NodeRef;
use htmldeck_pptx::{BoundingBox, Color};

const IMAGE_TOP: f64 = 1.0;
const IMAGE_BOX: (f64, f64) = (5.0, 4.5);
const CARD_LEFT: f64 = 5.6;
const CARD_WIDTH: f64 = 3.8;
const CARD_STEP: f64 = 1.15;

/// Observation bodies longer than this are cut.
const OBSERVATION_LIMIT: usize = 150;
const OBSERVATION_KEEP: usize = 147;

pub struct ImageWithCards;

/// Heading and first paragraph of a card, when it has a heading.
fn heading_and_detail(card: NodeRef<'_>) -> Option<(String, String)> {
    let heading = common::first_text(card, "h4")?;
    let detail = card.find("p").map(node_text).unwrap_or_default();
    Some((heading, detail))
}

/// Card content, or the `(heading, detail)` defaults of `prefix`.
fn card_or_default(card: Option<NodeRef<'_>>, prefix: &str) -> (String, String) {
    card.and_then(heading_and_detail).unwrap_or_else(|| {
        let id = TemplateId::ImageWithCards;
        (
            defaults::text(id, &format!("{prefix}.heading")).to_string(),
            defaults::text(id, &format!("{prefix}.detail")).to_string(),
        )
    })
}

impl SlideTemplate for ImageWithCards {
    fn id(&self) -> TemplateId {
        TemplateId::ImageWithCards
    }

    fn render(
        &self,
        section: &Section,
        ctx: &RenderContext<'_>,
        slide: &mut SlideBuilder,
    ) -> TemplateResult {
        common::place_title(section, slide)?;
        let root = section.root();

        let placed = common::place_first_image(
            slide,
            ctx,
            section,
            LEFT_MARGIN,
            IMAGE_TOP,
            IMAGE_BOX.0,
            IMAGE_BOX.1,
        )?;
        if let (Some((_, height)), Some(caption)) = (placed, root.find_by_class("image-caption")) {
            slide.text(
                BoundingBox::new(LEFT_MARGIN, IMAGE_TOP + height + 0.05, IMAGE_BOX.0, 0.25),
                &node_text(caption),
                styled(8.0, palette::MUTED),
            )?;
        }

        let cards = common::cards(root);
        let (heading1, detail1) = card_or_default(cards.first().copied(), "card1");
        let (heading2, detail2) = card_or_default(cards.get(1).copied(), "card2");
        let (heading3, detail3) = card_or_default(root.find_by_class("bg-light"), "observation");
        let detail3 = truncate_chars(&detail3, OBSERVATION_LIMIT, OBSERVATION_KEEP);

        // heading, detail, heading color, detail height, detail size
        let entries: [(String, String, Color, f64, f64); 3] = [
            (heading1, detail1, palette::ACCENT, 0.6, 9.0),
            (heading2, detail2, palette::PRIMARY, 0.6, 9.0),
            (heading3, detail3, palette::PRIMARY, 0.8, 8.0),
        ];

        let mut cursor = LayoutContext::new(CARD_LEFT, IMAGE_TOP, CARD_WIDTH);
        for (heading, detail, color, detail_height, detail_size) in entries {
            slide.text(cursor.bbox(0.35), &heading, styled(14.0, color).bold())?;
            slide.text(
                cursor.advance(0.4).bbox(detail_height),
                &detail,
                styled(detail_size, palette::BODY),
            )?;
            cursor = cursor.advance(CARD_STEP);
        }
        Ok(())
    }
}
