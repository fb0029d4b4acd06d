//! Metrics table on the left, image on the right.

use super::common::{self, palette, styled, LEFT_MARGIN};
use super::{SlideTemplate, TemplateId, TemplateResult};
use crate::defaults;
use crate::extract::{extract_list, extract_text, node_text, TextPredicate};
use crate::layout::{RenderContext, SlideBuilder};
use crate::section::Section;
use htmldeck_markup::NodeRef;
use htmldeck_pptx::BoundingBox;

const TOP: f64 = 1.3;
const ROW_HEIGHT: f64 = 0.4;
const COLUMN_WIDTHS: [f64; 3] = [2.2, 1.1, 1.1];
const MAX_ROWS: usize = 4;
const IMAGE_LEFT: f64 = 5.5;
const IMAGE_BOX: (f64, f64) = (4.0, 4.5);
const HIGHLIGHT_CLASS: &str = "text-success";

pub struct TableWithImage;

/// A body cell and whether it is highlighted.
#[derive(Debug, Clone, PartialEq)]
struct Cell {
    text: String,
    highlighted: bool,
}

impl Cell {
    fn from_node(td: NodeRef<'_>) -> Self {
        Self {
            text: node_text(td),
            highlighted: td.has_class(HIGHLIGHT_CLASS) || td.find_by_class(HIGHLIGHT_CLASS).is_some(),
        }
    }

    fn plain(text: &str) -> Self {
        Self {
            text: text.to_string(),
            highlighted: false,
        }
    }
}

/// `thead th`, else the cells of the first row.
fn header_cells(table: NodeRef<'_>) -> Vec<String> {
    match table.find("thead") {
        Some(thead) => thead.find_all("th").into_iter().map(node_text).collect(),
        None => table
            .find("tr")
            .map(|row| row.find_all_any(&["th", "td"]).into_iter().map(node_text).collect())
            .unwrap_or_default(),
    }
}

/// `tbody tr` rows, else every row after the first.
fn body_rows(table: NodeRef<'_>) -> Vec<Vec<Cell>> {
    let rows = match table.find("tbody") {
        Some(tbody) => tbody.find_all("tr"),
        None => table.find_all("tr").into_iter().skip(1).collect(),
    };
    rows.into_iter()
        .map(|tr| tr.find_all("td").into_iter().map(Cell::from_node).collect::<Vec<_>>())
        .filter(|row| !row.is_empty())
        .collect()
}

fn default_rows() -> Vec<Vec<Cell>> {
    (1..=MAX_ROWS)
        .map(|n| {
            defaults::list(TemplateId::TableWithImage, &format!("row{n}"))
                .iter()
                .map(|t| Cell::plain(t))
                .collect()
        })
        .collect()
}

impl SlideTemplate for TableWithImage {
    fn id(&self) -> TemplateId {
        TemplateId::TableWithImage
    }

    fn render(
        &self,
        section: &Section,
        ctx: &RenderContext<'_>,
        slide: &mut SlideBuilder,
    ) -> TemplateResult {
        common::place_title(section, slide)?;
        let root = section.root();

        let subtitle = extract_text(root)
            .structured(|r| r.find_tag_with_class("p", "subtitle").map(node_text))
            .keyword(&TextPredicate::keywords(&["p"], &["rigorous testing", "results are in"]))
            .found();
        common::place_subtitle(slide, subtitle, 0.8, 0.3, styled(12.0, palette::MUTED))?;

        if let Some(table) = root.find("table") {
            let headers = extract_list(root)
                .structured(|_| Some(header_cells(table)))
                .or_default(defaults::list(self.id(), "headers"));
            let mut rows = body_rows(table);
            if rows.is_empty() {
                rows = default_rows();
            }

            let mut y = TOP;
            let mut left = LEFT_MARGIN;
            for (header, width) in headers.iter().zip(COLUMN_WIDTHS) {
                slide.text(
                    BoundingBox::new(left, y, width, ROW_HEIGHT),
                    header,
                    styled(10.0, palette::PRIMARY).bold(),
                )?;
                left += width;
            }
            y += ROW_HEIGHT;

            for row in rows.iter().take(MAX_ROWS) {
                let mut left = LEFT_MARGIN;
                for (cell, width) in row.iter().zip(COLUMN_WIDTHS) {
                    let style = if cell.highlighted {
                        styled(9.0, palette::SUCCESS).bold()
                    } else {
                        styled(9.0, palette::BODY)
                    };
                    slide.text(BoundingBox::new(left, y, width, ROW_HEIGHT), &cell.text, style)?;
                    left += width;
                }
                y += ROW_HEIGHT;
            }
        }

        common::place_first_image(slide, ctx, section, IMAGE_LEFT, TOP, IMAGE_BOX.0, IMAGE_BOX.1)?;
        Ok(())
    }
}
