//! Closing slide: large centered title over the primary color and a
//! numbered reference list.

use super::common::{self, palette, styled, CONTENT_WIDTH, LEFT_MARGIN};
use super::{SlideTemplate, TemplateId, TemplateResult};
use crate::defaults;
use crate::extract::{node_text, TextPredicate};
use crate::layout::{LayoutContext, RenderContext, SlideBuilder};
use crate::section::Section;
use htmldeck_markup::NodeRef;
use htmldeck_pptx::{BoundingBox, Color};
use regex::Regex;
use std::sync::OnceLock;

const REFERENCE_WIDTH: f64 = 8.5;
const REFERENCE_TOP: f64 = 2.0;
const REFERENCE_FLOOR: f64 = 6.5;
const MAX_REFERENCES: usize = 6;

/// Entries shorter than this are treated as labels, not references.
const MIN_REFERENCE_CHARS: usize = 20;

pub struct ClosingReferences;

/// Leading list number such as `3.` or `3)`.
fn numbered() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*\d+[.)]").unwrap())
}

/// References under the first container that mentions them.
fn collect_references(root: NodeRef<'_>) -> Vec<String> {
    let Some(container) = TextPredicate::keywords(&["div"], &["references"]).first_node(root) else {
        return Vec::new();
    };
    let mut refs: Vec<String> = common::texts_longer_than(container, "p", MIN_REFERENCE_CHARS)
        .into_iter()
        .filter(|t| !t.contains("References"))
        .collect();
    refs.extend(common::texts_longer_than(container, "li", MIN_REFERENCE_CHARS));
    refs
}

/// Prefix `position` (1-based) unless the entry already carries a number.
fn with_number(reference: &str, position: usize) -> String {
    if numbered().is_match(reference) {
        reference.to_string()
    } else {
        format!("{position}. {reference}")
    }
}

impl SlideTemplate for ClosingReferences {
    fn id(&self) -> TemplateId {
        TemplateId::ClosingReferences
    }

    fn render(
        &self,
        section: &Section,
        _ctx: &RenderContext<'_>,
        slide: &mut SlideBuilder,
    ) -> TemplateResult {
        slide.set_background(palette::PRIMARY);
        common::place_title_with(
            section,
            slide,
            BoundingBox::new(LEFT_MARGIN, 0.5, CONTENT_WIDTH, 1.0),
            styled(48.0, Color::WHITE).bold().centered(),
        )?;

        let mut references = collect_references(section.root());
        if references.is_empty() {
            references = common::owned(defaults::list(self.id(), "references"));
        }

        let left = LEFT_MARGIN + (CONTENT_WIDTH - REFERENCE_WIDTH) / 2.0;
        let mut cursor = LayoutContext::new(left + 0.1, REFERENCE_TOP, REFERENCE_WIDTH - 0.2)
            .with_floor(REFERENCE_FLOOR);
        slide.text(cursor.bbox(0.35), "References:", styled(14.0, Color::WHITE).bold())?;
        cursor = cursor.advance(0.4);

        for (i, reference) in references.iter().take(MAX_REFERENCES).enumerate() {
            if !cursor.has_room() {
                break;
            }
            slide.text(
                cursor.bbox(0.4),
                &with_number(reference, i + 1),
                styled(9.0, palette::PALE_BLUE),
            )?;
            cursor = cursor.advance(0.45);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::test_support::*;

    #[test]
    fn test_references_from_markup() {
        let slide = render(
            &ClosingReferences,
            &section(
                r#"<section><h2>Questions?</h2><div class="refs">
                   <p>References</p>
                   <p>Hastie, T. An Introduction to Statistical Learning.</p>
                   <ol><li>2. Venables, W. N. Modern Applied Statistics.</li></ol>
                   </div></section>"#,
            ),
        );
        assert_eq!(slide.background, Some(palette::PRIMARY));

        let (bbox, style) = text_element(&slide, "Questions?").unwrap();
        assert_eq!(bbox.top, 0.5);
        assert_eq!(style.color, Some(Color::WHITE));
        assert_eq!(style.font_size_pt, 48.0);

        let (bbox, _) = text_element(&slide, "References:").unwrap();
        assert!((bbox.left - 0.85).abs() < 1e-9);
        assert!((bbox.width - 8.3).abs() < 1e-9);

        let (bbox, style) =
            text_element(&slide, "1. Hastie, T. An Introduction to Statistical Learning.").unwrap();
        assert!((bbox.top - 2.4).abs() < 1e-9);
        assert_eq!(style.color, Some(palette::PALE_BLUE));
        assert!(text_element(&slide, "2. Venables, W. N. Modern Applied Statistics.").is_some());
        assert_eq!(slide.len(), 4);
    }

    #[test]
    fn test_default_references() {
        let slide = render(&ClosingReferences, &section("<section><h2>Questions?</h2></section>"));
        // title, header, six references
        assert_eq!(slide.len(), 8);
        assert!(has_text(&slide, "6. Chawla, N. V."));
    }

    #[test]
    fn test_numbering() {
        assert_eq!(
            with_number("Smith, J. Something long enough", 2),
            "2. Smith, J. Something long enough"
        );
        assert_eq!(with_number("Smith (2020).", 3), "3. Smith (2020).");
        assert_eq!(with_number("4. Smith", 1), "4. Smith");
        assert_eq!(with_number(" 12) Smith", 1), " 12) Smith");
        // numbers later in the entry are citation details, not list numbers
        assert_eq!(
            with_number("Hastie, T. Elements, Vol. 2. Springer", 5),
            "5. Hastie, T. Elements, Vol. 2. Springer"
        );
        assert_eq!(with_number("2019 WHO report on diabetes", 1), "1. 2019 WHO report on diabetes");
    }
}
