//! Dashboard screenshot on the left, feature lists on the right and a live
//! demo link along the bottom.

use super::common::{self, palette, styled, BULLET, CONTENT_WIDTH, LEFT_MARGIN};
use super::{SlideTemplate, TemplateId, TemplateResult};
use crate::defaults;
use crate::extract::node_text;
use crate::layout::{LayoutContext, RenderContext, SlideBuilder};
use crate::section::Section;
use htmldeck_markup::NodeRef;
use htmldeck_pptx::BoundingBox;

const COLUMN_TOP: f64 = 1.1;
const IMAGE_BOX: (f64, f64) = (5.0, 4.0);
const LIST_LEFT: f64 = 5.5;
const LIST_WIDTH: f64 = 4.0;
const DEMO_TOP: f64 = 5.6;

const DEMO_HEADING: &str = "Live Demo: Try the interactive dashboard yourself!";
const DEMO_INSTRUCTION: &str =
    "Adjust the slider and toggle SMOTE to see real-time model performance changes.";

pub struct Dashboard;

/// Feature cards: `.card`, else the direct `div.card` children of the
/// second column of `.two-col`.
fn feature_cards(root: NodeRef<'_>) -> Vec<NodeRef<'_>> {
    let cards = common::cards(root);
    if !cards.is_empty() {
        return cards;
    }
    root.find_by_class("two-col")
        .and_then(|cols| cols.children_by_tag("div").nth(1))
        .map(|col| col.child_elements_with_class(Some("div"), "card"))
        .unwrap_or_default()
}

/// Heading and list items of a feature card, each falling back to the
/// region defaults.
fn card_content(card: Option<NodeRef<'_>>, prefix: &str) -> (String, Vec<String>) {
    let id = TemplateId::Dashboard;
    let heading = card
        .and_then(|c| common::first_text(c, "h4"))
        .unwrap_or_else(|| defaults::text(id, &format!("{prefix}.heading")).to_string());
    let items: Vec<String> = card
        .and_then(|c| c.find("ul"))
        .map(|ul| {
            ul.find_all("li")
                .into_iter()
                .map(node_text)
                .filter(|t| !t.is_empty())
                .collect()
        })
        .unwrap_or_default();
    let items = if items.is_empty() {
        common::owned(defaults::list(id, &format!("{prefix}.items")))
    } else {
        items
    };
    (heading, items)
}

/// First link pointing at a hosted demo or a dashboard page.
fn demo_link(root: NodeRef<'_>) -> Option<String> {
    root.find_all("a")
        .into_iter()
        .filter_map(|a| a.attr("href"))
        .find(|href| href.contains("vercel.app") || href.to_lowercase().contains("dashboard"))
        .map(str::to_string)
}

impl SlideTemplate for Dashboard {
    fn id(&self) -> TemplateId {
        TemplateId::Dashboard
    }

    fn render(
        &self,
        section: &Section,
        ctx: &RenderContext<'_>,
        slide: &mut SlideBuilder,
    ) -> TemplateResult {
        common::place_title_with(
            section,
            slide,
            BoundingBox::new(LEFT_MARGIN, 0.2, CONTENT_WIDTH, 0.5),
            styled(24.0, palette::PRIMARY).bold(),
        )?;
        let root = section.root();

        let subtitle = root.find("p").map(node_text).filter(|t| {
            let lower = t.to_lowercase();
            lower.contains("class balance") || lower.contains("smote")
        });
        common::place_subtitle(slide, subtitle, 0.7, 0.25, styled(10.0, palette::MUTED))?;

        let placed = common::place_first_image(
            slide,
            ctx,
            section,
            LEFT_MARGIN,
            COLUMN_TOP,
            IMAGE_BOX.0,
            IMAGE_BOX.1,
        )?;
        if let (Some((_, height)), Some(caption)) = (placed, root.find_by_class("image-caption")) {
            slide.text(
                BoundingBox::new(LEFT_MARGIN, COLUMN_TOP + height + 0.05, IMAGE_BOX.0, 0.25),
                &node_text(caption),
                styled(7.0, palette::MUTED).centered(),
            )?;
        }

        let cards = feature_cards(root);
        let mut cursor = LayoutContext::new(LIST_LEFT + 0.1, COLUMN_TOP, LIST_WIDTH - 0.2);
        for (i, (prefix, floor)) in [("features", 3.0), ("explore", 5.5)].into_iter().enumerate() {
            let (heading, items) = card_content(cards.get(i).copied(), prefix);
            slide.text(cursor.bbox(0.3), &heading, styled(12.0, palette::PRIMARY).bold())?;
            let mut line = cursor.advance(0.35).inset(0.05, 0.1).with_floor(floor);
            for item in items.iter().take(4) {
                if !line.has_room() {
                    break;
                }
                let text = if item.starts_with('\u{2022}') {
                    item.clone()
                } else {
                    format!("{BULLET}{item}")
                };
                slide.text(line.bbox(0.3), &text, styled(8.0, palette::BODY))?;
                line = line.advance(0.32);
            }
            cursor = cursor.at(line.y).advance(0.1);
        }

        let url = demo_link(root).unwrap_or_else(|| defaults::text(self.id(), "demo.url").to_string());
        let demo = LayoutContext::new(LEFT_MARGIN + 0.1, DEMO_TOP, CONTENT_WIDTH - 0.2);
        slide.text(demo.bbox(0.25), DEMO_HEADING, styled(10.0, palette::PRIMARY).bold())?;
        slide.text(demo.advance(0.3).bbox(0.25), &url, styled(9.0, palette::LINK))?;
        slide.text(demo.advance(0.6).bbox(0.25), DEMO_INSTRUCTION, styled(8.0, palette::MUTED))?;
        Ok(())
    }
}
