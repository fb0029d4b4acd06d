//! Chart on the left; "The Numbers" and a warning box on the right.

use super::common::{self, palette, styled, BULLET, LEFT_MARGIN};
use super::{SlideTemplate, TemplateId, TemplateResult};
use crate::defaults;
use crate::extract::{extract_list, extract_text, node_text, TextPredicate};
use crate::layout::{LayoutContext, RenderContext, SlideBuilder};
use crate::section::Section;
use htmldeck_markup::NodeRef;

const CHART_BOX: (f64, f64) = (5.0, 5.0);
const COLUMN_LEFT: f64 = 5.5;
const COLUMN_WIDTH: f64 = 4.0;
const TOP: f64 = 1.3;

pub struct ChartWithCallouts;

fn strip_warning_label(text: String) -> String {
    if text.contains("Warning Sign") {
        match text.split_once(':') {
            Some((_, rest)) => rest.trim().to_string(),
            None => text,
        }
    } else {
        text
    }
}

/// First paragraph of a `div` styled with the alert colors.
fn alert_paragraph(root: NodeRef<'_>) -> Option<String> {
    root.find_all("div")
        .into_iter()
        .find(|div| {
            let style = div.style().to_lowercase();
            style.contains("fef2f2") || style.contains("ef4444")
        })
        .and_then(|div| div.find("p"))
        .map(node_text)
}

impl SlideTemplate for ChartWithCallouts {
    fn id(&self) -> TemplateId {
        TemplateId::ChartWithCallouts
    }

    fn render(
        &self,
        section: &Section,
        ctx: &RenderContext<'_>,
        slide: &mut SlideBuilder,
    ) -> TemplateResult {
        common::place_title(section, slide)?;
        let root = section.root();

        let subtitle = common::paragraph_containing(root, &["first challenge"]);
        common::place_subtitle(slide, subtitle, 0.9, 0.3, styled(11.0, palette::MUTED))?;

        common::place_first_image(slide, ctx, section, LEFT_MARGIN, TOP, CHART_BOX.0, CHART_BOX.1)?;

        let numbers = extract_list(root)
            .structured(|r| {
                r.find_by_class("bg-light").map(|panel| {
                    panel.find_all("li")
                        .into_iter()
                        .map(node_text)
                        .filter(|t| t.contains("Diabetes"))
                        .collect()
                })
            })
            .keyword(&TextPredicate::matching(&["li"], |t| {
                t.contains("65%") || t.contains("35%")
            }))
            .or_default(defaults::list(self.id(), "numbers"));

        let mut column = LayoutContext::new(COLUMN_LEFT, TOP, COLUMN_WIDTH);
        slide.text(
            column.bbox(0.4),
            "The Numbers",
            styled(16.0, palette::PRIMARY).bold(),
        )?;
        column = column.advance(0.5);
        for line in numbers.iter().take(2) {
            slide.text(
                column.inset(0.1, 0.2).bbox(0.3),
                &format!("{BULLET}{line}"),
                styled(10.0, palette::BODY),
            )?;
            column = column.advance(0.35);
        }
        column = column.advance(0.2);

        let warning = extract_text(root)
            .structured(alert_paragraph)
            .keyword(&TextPredicate::matching(&["p"], |t| {
                let lower = t.to_lowercase();
                lower.contains("2:1 imbalance")
                    || (lower.contains("imbalance") && lower.contains("majority class"))
            }))
            .found()
            .map(strip_warning_label)
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| defaults::text(self.id(), "warning").to_string());

        slide.text(
            column.bbox(0.4),
            "Warning Sign:",
            styled(16.0, palette::WARNING).bold(),
        )?;
        column = column.advance(0.5);
        slide.text(
            column.inset(0.1, 0.2).bbox(0.8),
            &warning,
            styled(10.0, palette::WARNING),
        )?;
        Ok(())
    }
}
