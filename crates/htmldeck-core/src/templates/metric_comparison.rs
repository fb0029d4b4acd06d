//! Two model cards with metric lines, plus a winner banner.

use super::common::{self, palette, styled};
use super::{SlideTemplate, TemplateId, TemplateResult};
use crate::defaults;
use crate::extract::{extract_text, node_text, TextPredicate};
use crate::layout::{LayoutContext, RenderContext, SlideBuilder};
use crate::section::Section;
use htmldeck_markup::NodeRef;
use htmldeck_pptx::{BoundingBox, Color};

const CARD_TOP: f64 = 1.0;
const WINNER_BOX: (f64, f64, f64, f64) = (0.6, 5.8, 8.8, 0.6);

/// Display names, in the order lines are drawn.
pub const METRIC_NAMES: [&str; 6] = [
    "Accuracy",
    "Sensitivity",
    "Specificity",
    "AUC-ROC",
    "Precision",
    "F1-Score",
];

/// Substrings that identify each metric in a list item, tried in order.
const METRIC_MARKERS: [&[&str]; 6] = [
    &["Accuracy"],
    &["Sensitivity"],
    &["Specificity"],
    &["AUC-ROC", "AUC"],
    &["Precision"],
    &["F1-Score", "F1"],
];

pub struct MetricComparison;

type Metrics = [Option<String>; 6];

/// Metric values found in a card's list items. A later item overrides an
/// earlier one for the same metric.
fn card_metrics(card: NodeRef<'_>) -> Metrics {
    let mut metrics: Metrics = Default::default();
    for li in card.find_all("li") {
        let text = node_text(li);
        let slot = METRIC_MARKERS
            .iter()
            .position(|markers| markers.iter().any(|m| text.contains(m)));
        if let Some(slot) = slot {
            let value = text.rsplit(':').next().unwrap_or_default().trim();
            metrics[slot] = Some(value.to_string());
        }
    }
    metrics
}

fn default_metrics(region: &str) -> Metrics {
    let values = defaults::list(TemplateId::MetricComparison, region);
    std::array::from_fn(|i| values.get(i).map(|v| v.to_string()))
}

/// One side of the comparison.
struct ModelCard<'a> {
    header: &'static str,
    header_color: Color,
    metric_color: Color,
    note_label: &'static str,
    metrics_region: &'static str,
    note_region: &'static str,
    node: Option<NodeRef<'a>>,
}

impl ModelCard<'_> {
    fn metrics(&self) -> Metrics {
        let found = self.node.map(card_metrics).unwrap_or_default();
        if found.iter().all(Option::is_none) {
            default_metrics(self.metrics_region)
        } else {
            found
        }
    }

    fn note(&self) -> String {
        self.node
            .and_then(|card| card.find_by_class("bg-light"))
            .and_then(|panel| common::first_text(panel, "p"))
            .unwrap_or_else(|| defaults::text(TemplateId::MetricComparison, self.note_region).to_string())
    }

    fn draw(&self, slide: &mut SlideBuilder, left: f64, width: f64) -> TemplateResult {
        let mut cursor = LayoutContext::new(left + 0.1, CARD_TOP, width - 0.2);
        slide.text(cursor.bbox(0.35), self.header, styled(14.0, self.header_color).bold())?;
        cursor = cursor.advance(0.45);

        let mut line = cursor.inset(0.05, 0.1);
        for (name, value) in METRIC_NAMES.iter().zip(self.metrics()) {
            if let Some(value) = value {
                slide.text(
                    line.bbox(0.3),
                    &format!("{name}: {value}"),
                    styled(9.0, self.metric_color),
                )?;
                line = line.advance(0.35);
            }
        }
        cursor = cursor.at(line.y).advance(0.1);

        slide.text(cursor.bbox(0.25), self.note_label, styled(9.0, palette::BODY).bold())?;
        cursor = cursor.advance(0.3);
        slide.text(cursor.bbox(0.5), &self.note(), styled(8.0, palette::BODY))?;
        Ok(())
    }
}

impl SlideTemplate for MetricComparison {
    fn id(&self) -> TemplateId {
        TemplateId::MetricComparison
    }

    fn render(
        &self,
        section: &Section,
        _ctx: &RenderContext<'_>,
        slide: &mut SlideBuilder,
    ) -> TemplateResult {
        common::place_title(section, slide)?;
        let root = section.root();
        let cards = common::cards(root);

        let lda = ModelCard {
            header: "LDA (Linear Discriminant Analysis)",
            header_color: palette::PRIMARY,
            metric_color: palette::SUCCESS,
            note_label: "Key Strength:",
            metrics_region: "lda.metrics",
            note_region: "lda.strength",
            node: cards.first().copied(),
        };
        let qda = ModelCard {
            header: "QDA (Quadratic Discriminant Analysis)",
            header_color: palette::ACCENT,
            metric_color: palette::BODY,
            note_label: "Limitation:",
            metrics_region: "qda.metrics",
            note_region: "qda.limitation",
            node: cards.get(1).copied(),
        };
        lda.draw(slide, common::LEFT_MARGIN, 4.5)?;
        qda.draw(slide, 5.5, 4.0)?;

        let winner = extract_text(root)
            .structured(|r| r.find_by_class("bg-warning").map(node_text))
            .keyword(&TextPredicate::matching(&["div"], |t| {
                t.contains("Winner") && t.contains("LDA")
            }))
            .or_default(defaults::text(self.id(), "winner"));
        let (left, top, width, height) = WINNER_BOX;
        slide.text(
            BoundingBox::new(left, top, width, height),
            &winner,
            styled(9.0, palette::WARNING).bold(),
        )?;
        Ok(())
    }
}
