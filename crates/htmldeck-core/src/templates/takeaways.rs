//! Two takeaway columns and two summary lines along the bottom.

use super::common::{self, palette, styled, BULLET, CONTENT_WIDTH, LEFT_MARGIN};
use super::{SlideTemplate, TemplateId, TemplateResult};
use crate::defaults;
use crate::extract::node_text;
use crate::layout::{LayoutContext, RenderContext, SlideBuilder};
use crate::section::Section;
use htmldeck_markup::NodeRef;

const COLUMN_TOP: f64 = 1.0;
const COLUMN_FLOOR: f64 = 4.5;
const SUMMARY_TOP: f64 = 5.2;

pub struct Takeaways;

/// One column: card region prefix, geometry and item spacing.
struct Column {
    prefix: &'static str,
    left: f64,
    width: f64,
    max_items: usize,
    item_height: f64,
    item_step: f64,
}

const COLUMNS: [Column; 2] = [
    Column {
        prefix: "left",
        left: LEFT_MARGIN,
        width: 4.5,
        max_items: 3,
        item_height: 0.5,
        item_step: 0.6,
    },
    Column {
        prefix: "right",
        left: 5.5,
        width: 4.0,
        max_items: 4,
        item_height: 0.4,
        item_step: 0.5,
    },
];

/// List items of the card's first list, or its longer paragraphs when it
/// has no list.
fn card_items(card: NodeRef<'_>) -> Vec<String> {
    match card.find("ul") {
        Some(ul) => ul
            .find_all("li")
            .into_iter()
            .map(node_text)
            .filter(|t| !t.is_empty())
            .collect(),
        None => common::texts_longer_than(card, "p", 20),
    }
}

impl Column {
    fn draw(&self, slide: &mut SlideBuilder, card: Option<NodeRef<'_>>) -> TemplateResult {
        let id = TemplateId::Takeaways;
        let heading = card
            .and_then(|c| common::first_text(c, "h4"))
            .unwrap_or_else(|| defaults::text(id, &format!("{}.heading", self.prefix)).to_string());
        let items = card
            .map(card_items)
            .filter(|items| !items.is_empty())
            .unwrap_or_else(|| common::owned(defaults::list(id, &format!("{}.items", self.prefix))));

        let cursor = LayoutContext::new(self.left + 0.1, COLUMN_TOP, self.width - 0.2);
        slide.text(cursor.bbox(0.35), &heading, styled(14.0, palette::PRIMARY).bold())?;

        let mut line = cursor
            .advance(0.4)
            .inset(0.05, 0.1)
            .with_floor(COLUMN_FLOOR);
        for item in items.iter().take(self.max_items) {
            if !line.has_room() {
                break;
            }
            let text = if item.starts_with('\u{2022}') {
                item.clone()
            } else {
                format!("{BULLET}{item}")
            };
            slide.text(line.bbox(self.item_height), &text, styled(9.0, palette::BODY))?;
            line = line.advance(self.item_step);
        }
        Ok(())
    }
}

/// Bottom-line and promise texts. Later divs override earlier ones, and a
/// div that reads as a bottom line is never taken as the promise.
fn summary_lines(root: NodeRef<'_>) -> (Option<String>, Option<String>) {
    let mut bottom_line = None;
    let mut promise = None;
    for div in root.find_all("div") {
        let text = node_text(div);
        let lower = text.to_lowercase();
        if text.contains("Bottom Line") || lower.contains("not ready for clinical") {
            bottom_line = Some(text);
        } else if text.contains("Our Promise") || lower.contains("continue improving") {
            promise = Some(text);
        }
    }
    (bottom_line, promise)
}

impl SlideTemplate for Takeaways {
    fn id(&self) -> TemplateId {
        TemplateId::Takeaways
    }

    fn render(
        &self,
        section: &Section,
        _ctx: &RenderContext<'_>,
        slide: &mut SlideBuilder,
    ) -> TemplateResult {
        common::place_title(section, slide)?;
        let root = section.root();

        let cards = root
            .find_by_class("two-col")
            .map(|cols| cols.child_elements_with_class(Some("div"), "card"))
            .unwrap_or_default();
        for (i, column) in COLUMNS.iter().enumerate() {
            column.draw(slide, cards.get(i).copied())?;
        }

        let (bottom_line, promise) = summary_lines(root);
        let bottom_line =
            bottom_line.unwrap_or_else(|| defaults::text(self.id(), "bottom-line").to_string());
        let promise = promise.unwrap_or_else(|| defaults::text(self.id(), "promise").to_string());

        let cursor = LayoutContext::new(LEFT_MARGIN + 0.1, SUMMARY_TOP, CONTENT_WIDTH - 0.2);
        slide.text(cursor.bbox(0.4), &bottom_line, styled(10.0, palette::PRIMARY).bold())?;
        slide.text(
            cursor.advance(0.45).bbox(0.4),
            &promise,
            styled(10.0, palette::SUCCESS).bold(),
        )?;
        Ok(())
    }
}
