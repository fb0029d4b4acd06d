//! Two boxes side by side, one per processing step.

use super::common::{self, palette, styled, LEFT_MARGIN};
use super::{SlideTemplate, TemplateId, TemplateResult};
use crate::extract::{extract_text, node_text, TextPredicate};
use crate::layout::{LayoutContext, RenderContext, SlideBuilder};
use crate::section::Section;
use htmldeck_markup::NodeRef;
use htmldeck_pptx::Color;

const BOX_WIDTH: f64 = 4.3;
const BOX_GAP: f64 = 0.4;
const BOX_TOP: f64 = 1.4;

pub struct TwoStepBoxes;

/// Matching rules for one step box.
struct Step {
    title: &'static str,
    color: Color,
    /// Description inside the step's own box
    describes: fn(&str) -> bool,
    /// Description anywhere in the section
    describes_loosely: fn(&str) -> bool,
    motto: fn(&str) -> bool,
}

const STEPS: [Step; 2] = [
    Step {
        title: "Step 1: Data Cleaning",
        color: palette::PRIMARY,
        describes: |t| {
            let lower = t.to_lowercase();
            t.chars().count() > 30
                && (lower.contains("impossible zero")
                    || lower.contains("median values")
                    || t.contains("NA"))
        },
        describes_loosely: |t| {
            let lower = t.to_lowercase();
            lower.contains("impossible zero") || lower.contains("median values")
        },
        motto: |t| t.contains("Quality data") || t.to_lowercase().contains("reliable results"),
    },
    Step {
        title: "Step 2: Train-Test Split",
        color: palette::ACCENT,
        describes: |t| {
            t.chars().count() > 20
                && (t.contains("70%")
                    || t.contains("Training")
                    || t.contains("Testing")
                    || t.to_lowercase().contains("stratified"))
        },
        describes_loosely: |t| t.contains("70%") || (t.contains("Training") && t.contains("Testing")),
        motto: |t| t.contains("Fair evaluation") || t.to_lowercase().contains("fair splits"),
    },
];

fn first_paragraph(node: Option<NodeRef<'_>>, accept: fn(&str) -> bool) -> Option<String> {
    node?
        .find_all("p")
        .into_iter()
        .map(node_text)
        .find(|t| accept(t))
}

impl SlideTemplate for TwoStepBoxes {
    fn id(&self) -> TemplateId {
        TemplateId::TwoStepBoxes
    }

    fn render(
        &self,
        section: &Section,
        _ctx: &RenderContext<'_>,
        slide: &mut SlideBuilder,
    ) -> TemplateResult {
        common::place_title(section, slide)?;
        let root = section.root();

        let subtitle = common::paragraph_containing(root, &["clean our data"]);
        common::place_subtitle(slide, subtitle, 0.9, 0.3, styled(11.0, palette::MUTED))?;

        let boxes = root.find_all_by_class("bg-light");
        let boxes = if boxes.len() >= 2 { boxes } else { Vec::new() };

        for (i, step) in STEPS.iter().enumerate() {
            let step_box = boxes.get(i).copied();
            let description = extract_text(root)
                .structured(|_| first_paragraph(step_box, step.describes))
                .keyword(&TextPredicate::matching(&["p"], step.describes_loosely))
                .or_empty();
            if description.is_empty() {
                continue;
            }
            let motto = extract_text(root)
                .structured(|_| first_paragraph(step_box, step.motto))
                .keyword(&TextPredicate::matching(&["p"], step.motto))
                .or_empty();

            let left = LEFT_MARGIN + i as f64 * (BOX_WIDTH + BOX_GAP);
            let inner = LayoutContext::new(left, BOX_TOP, BOX_WIDTH).inset(0.2, 0.4);
            slide.text(inner.bbox(0.4), step.title, styled(16.0, step.color).bold())?;
            slide.text(
                inner.advance(0.5).bbox(1.2),
                &description,
                styled(10.0, palette::BODY),
            )?;
            slide.text(inner.advance(1.8).bbox(0.3), &motto, styled(9.0, palette::MUTED))?;
        }
        Ok(())
    }
}
