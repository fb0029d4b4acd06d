//! Two columns: challenge and quest text on the left, image on the right.

use super::common::{self, palette, styled, LEFT_MARGIN};
use super::{SlideTemplate, TemplateId, TemplateResult};
use crate::error::TemplateError;
use crate::extract::{extract_text, node_text, TextPredicate};
use crate::layout::{LayoutContext, RenderContext, SlideBuilder};
use crate::section::Section;
use htmldeck_markup::NodeRef;
use htmldeck_pptx::Color;

const TEXT_COLUMN_WIDTH: f64 = 4.5;
const IMAGE_LEFT: f64 = 5.5;
const IMAGE_TOP: f64 = 1.2;
const IMAGE_BOX: (f64, f64) = (4.0, 5.5);

pub struct Mission;

/// Paragraph following a marker heading, else the first paragraph of the
/// heading's parent.
fn text_after_heading(root: NodeRef<'_>, marker_class: &str) -> Option<String> {
    let heading = root.find_tag_with_class("h4", marker_class)?;
    heading
        .next_sibling_element("p")
        .or_else(|| heading.parent().and_then(|p| p.find("p")))
        .map(node_text)
}

fn place_block(
    slide: &mut SlideBuilder,
    ctx: LayoutContext,
    heading: &str,
    heading_color: Color,
    text: &str,
) -> Result<LayoutContext, TemplateError> {
    slide.text(ctx.bbox(0.4), heading, styled(18.0, heading_color).bold())?;
    let ctx = ctx.advance(0.5);
    slide.text(ctx.bbox(1.0), text, styled(11.0, palette::BODY))?;
    Ok(ctx.advance(1.2))
}

impl SlideTemplate for Mission {
    fn id(&self) -> TemplateId {
        TemplateId::Mission
    }

    fn render(
        &self,
        section: &Section,
        ctx: &RenderContext<'_>,
        slide: &mut SlideBuilder,
    ) -> TemplateResult {
        let y = common::place_title(section, slide)?;
        let root = section.root();

        let challenge = extract_text(root)
            .structured(|r| text_after_heading(r, "text-primary"))
            .keyword(&TextPredicate::keywords(
                &["p"],
                &["silent killer", "irreversible damage"],
            ))
            .or_empty();
        let quest = extract_text(root)
            .structured(|r| text_after_heading(r, "text-accent"))
            .keyword(&TextPredicate::matching(&["p"], |t| {
                let lower = t.to_lowercase();
                lower.contains("model") && (lower.contains("lda") || lower.contains("qda"))
            }))
            .or_empty();

        let mut column = LayoutContext::new(LEFT_MARGIN, y, TEXT_COLUMN_WIDTH);
        if !challenge.is_empty() {
            column = place_block(slide, column, "The Challenge", palette::PRIMARY, &challenge)?;
        }
        if !quest.is_empty() {
            place_block(slide, column, "Our Quest", palette::ACCENT, &quest)?;
        }

        let placed = common::place_first_image(
            slide,
            ctx,
            section,
            IMAGE_LEFT,
            IMAGE_TOP,
            IMAGE_BOX.0,
            IMAGE_BOX.1,
        )?;
        match placed {
            Some(_) => Ok(()),
            None => Err(TemplateError::missing_region("image")),
        }
    }
}
