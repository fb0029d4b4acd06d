//! A single headline statistic with supporting lines, all centered.

use super::common::{palette, styled};
use super::{SlideTemplate, TemplateId, TemplateResult};
use crate::extract::node_text;
use crate::layout::{LayoutContext, RenderContext, SlideBuilder};
use crate::section::Section;
use htmldeck_pptx::BoundingBox;

const HEADLINE: &str = "537 Million";
const CENTER_LEFT: f64 = 1.0;
const CENTER_WIDTH: f64 = 8.0;

pub struct StatisticHook;

/// How a supporting paragraph is rendered.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Line {
    Reach,
    Problem,
    Consequence,
}

impl Line {
    fn classify(text: &str) -> Option<Self> {
        let lower = text.to_lowercase();
        if lower.contains("worldwide") {
            Some(Self::Reach)
        } else if lower.contains("problem") && text.contains("But") {
            Some(Self::Problem)
        } else if lower.contains("undetected") || lower.contains("complications") {
            Some(Self::Consequence)
        } else {
            None
        }
    }
}

impl SlideTemplate for StatisticHook {
    fn id(&self) -> TemplateId {
        TemplateId::StatisticHook
    }

    fn render(
        &self,
        section: &Section,
        _ctx: &RenderContext<'_>,
        slide: &mut SlideBuilder,
    ) -> TemplateResult {
        let root = section.root();
        let mut cursor = LayoutContext::new(CENTER_LEFT, 1.2, CENTER_WIDTH);

        let headline_source = root
            .find("h1")
            .map(node_text)
            .unwrap_or_else(|| section.title.clone());
        if headline_source.contains("537") {
            slide.text(
                BoundingBox::new(CENTER_LEFT, 1.8, CENTER_WIDTH, 1.5),
                HEADLINE,
                styled(80.0, palette::DANGER).bold().centered(),
            )?;
            cursor = cursor.at(3.6);
        }

        let paragraphs: Vec<String> = root
            .find_all("p")
            .into_iter()
            .map(node_text)
            .filter(|t| !t.is_empty())
            .collect();

        for text in paragraphs.iter().filter(|t| !t.contains("Source")) {
            match Line::classify(text) {
                Some(Line::Reach) => {
                    slide.text(cursor.bbox(0.4), text, styled(14.0, palette::BODY).centered())?;
                    cursor = cursor.advance(0.6);
                }
                Some(Line::Problem) => {
                    slide.text(
                        cursor.bbox(0.4),
                        text,
                        styled(16.0, palette::PRIMARY).bold().centered(),
                    )?;
                    cursor = cursor.advance(0.5);
                }
                Some(Line::Consequence) => {
                    slide.text(cursor.bbox(0.4), text, styled(13.0, palette::MUTED).centered())?;
                    cursor = cursor.advance(0.5);
                }
                None => {}
            }
        }

        if let Some(source) = paragraphs.iter().find(|t| t.contains("Source")) {
            slide.text(cursor.bbox(0.3), source, styled(10.0, palette::MUTED).centered())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::test_support::*;
    use htmldeck_pptx::Alignment;

    const HOOK: &str = r#"
        <section>
          <h1>537 Million</h1>
          <p>People worldwide live with diabetes</p>
          <p>But here's the problem...</p>
          <p>Many cases go undetected until complications arise.</p>
          <p>Source: IDF Diabetes Atlas 2021</p>
          <p>Unrelated aside</p>
        </section>
    "#;

    #[test]
    fn test_headline_and_lines() {
        let slide = render(&StatisticHook, &section(HOOK));

        let (bbox, style) = text_element(&slide, "537 Million").unwrap();
        assert_eq!(*bbox, BoundingBox::new(1.0, 1.8, 8.0, 1.5));
        assert_eq!(style.font_size_pt, 80.0);
        assert!(style.bold);
        assert_eq!(style.alignment, Alignment::Center);
        assert_eq!(style.color, Some(palette::DANGER));

        let (bbox, _) = text_element(&slide, "People worldwide live with diabetes").unwrap();
        assert_eq!(bbox.top, 3.6);
        let (bbox, style) = text_element(&slide, "But here's the problem...").unwrap();
        assert!((bbox.top - 4.2).abs() < 1e-9);
        assert!(style.bold);
        let (bbox, _) = text_element(&slide, "Many cases go undetected until complications arise.").unwrap();
        assert!((bbox.top - 4.7).abs() < 1e-9);
        let (bbox, style) = text_element(&slide, "Source: IDF Diabetes Atlas 2021").unwrap();
        assert!((bbox.top - 5.2).abs() < 1e-9);
        assert_eq!(style.font_size_pt, 10.0);

        assert!(!has_text(&slide, "Unrelated"));
        assert_eq!(slide.len(), 5);
    }

    #[test]
    fn test_headline_from_title_without_h1() {
        let slide = render(
            &StatisticHook,
            &section("<section><h2>537 Million adults</h2><p>Worldwide, today.</p></section>"),
        );
        assert!(text_element(&slide, "537 Million").is_some());
        assert!(has_text(&slide, "Worldwide"));
        // the title itself is not repeated
        assert!(!has_text(&slide, "adults"));
    }

    #[test]
    fn test_problem_line_is_case_sensitive() {
        assert_eq!(Line::classify("But a problem"), Some(Line::Problem));
        assert_eq!(Line::classify("but a problem"), None);
    }
}
