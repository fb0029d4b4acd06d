//! One large centered image with a caption and a key-insights list.

use super::common::{self, palette, styled, BULLET, CONTENT_WIDTH, LEFT_MARGIN};
use super::{SlideTemplate, TemplateId, TemplateResult};
use crate::defaults;
use crate::extract::{extract_list, node_text};
use crate::layout::{LayoutContext, RenderContext, SlideBuilder};
use crate::section::Section;
use htmldeck_markup::NodeRef;
use htmldeck_pptx::BoundingBox;

const IMAGE_TOP: f64 = 0.7;
const IMAGE_BOX: (f64, f64) = (7.5, 3.5);
/// Insights below this line are moved up to [`INSIGHTS_FALLBACK_TOP`].
const INSIGHTS_LIMIT: f64 = 5.2;
const INSIGHTS_FALLBACK_TOP: f64 = 4.8;

pub struct FeaturedImage;

/// Container of the insights list: a light-gray styled `div`, else a
/// `div` mentioning "Key Insights".
fn insights_container(root: NodeRef<'_>) -> Option<NodeRef<'_>> {
    let divs = root.find_all("div");
    divs.iter()
        .copied()
        .find(|div| {
            let style = div.style().to_lowercase();
            style.contains("f8fafc") || (style.contains("background-color") && style.contains("f8"))
        })
        .or_else(|| divs.iter().copied().find(|div| div.text().contains("Key Insights")))
}

impl SlideTemplate for FeaturedImage {
    fn id(&self) -> TemplateId {
        TemplateId::FeaturedImage
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
            BoundingBox::new(LEFT_MARGIN, 0.15, CONTENT_WIDTH, 0.5),
            styled(26.0, palette::PRIMARY).bold(),
        )?;
        let root = section.root();

        let mut image_height = IMAGE_BOX.1;
        let mut caption_bottom = None;
        if let Some(image) = section.first_image() {
            if let Some(path) = image.resolved_path.as_deref() {
                let (width, height) = ctx.geometry.fit(path, IMAGE_BOX.0, IMAGE_BOX.1);
                let left = ctx.canvas.centered_left(width);
                slide.image(BoundingBox::new(left, IMAGE_TOP, width, height), path)?;
                image_height = height;

                let mut caption_y = IMAGE_TOP + height + 0.12;
                if let Some(caption) = root.find_by_class("image-caption") {
                    slide.text(
                        BoundingBox::new(LEFT_MARGIN, caption_y, CONTENT_WIDTH, 0.25),
                        &node_text(caption),
                        styled(9.0, palette::MUTED).centered(),
                    )?;
                    caption_y += 0.4;
                }
                caption_bottom = Some(caption_y);
            }
        }

        let mut top = match caption_bottom {
            Some(y) => y + 0.1,
            None => IMAGE_TOP + image_height + 0.35,
        };
        if top > INSIGHTS_LIMIT {
            top = INSIGHTS_FALLBACK_TOP;
        }

        let insights = extract_list(root)
            .structured(|r| {
                insights_container(r).map(|div| common::texts_longer_than(div, "li", 10))
            })
            .or_default(defaults::list(self.id(), "insights"));

        let mut cursor = LayoutContext::new(LEFT_MARGIN, top, CONTENT_WIDTH);
        slide.text(
            cursor.bbox(0.25),
            "Key Insights:",
            styled(10.0, palette::PRIMARY).bold(),
        )?;
        cursor = cursor.advance(0.3);
        for insight in insights.iter().take(3) {
            if !cursor.has_room() {
                break;
            }
            slide.text(
                cursor.inset(0.2, 0.2).bbox(0.4),
                &format!("{BULLET}{insight}"),
                styled(9.0, palette::BODY),
            )?;
            cursor = cursor.advance(0.4);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::test_support::*;

    #[test]
    fn test_image_caption_and_insights() {
        let dir = tempfile::tempdir().unwrap();
        write_png(dir.path(), "pairs.png", 1440, 960);
        let section = section_with_assets(
            r#"<section><h2>Data Visualization</h2>
               <img src="images/pairs.png">
               <p class="image-caption">Pairwise scatter plots</p>
               <div style="background-color: #f8fafc"><ul>
                 <li>Glucose separates the classes best</li>
                 <li>short</li>
               </ul></div></section>"#,
            dir.path(),
        );
        let slide = render(&FeaturedImage, &section);

        let image = slide.elements.iter().find(|e| e.is_image()).unwrap().bbox();
        // 15" x 10" fitted into 7.5" x 3.5"
        assert!((image.height - 3.5).abs() < 1e-9);
        assert!((image.width - 5.25).abs() < 1e-9);
        assert!((image.left - 2.375).abs() < 1e-9);

        let (bbox, style) = text_element(&slide, "Pairwise scatter plots").unwrap();
        assert!((bbox.top - 4.32).abs() < 1e-9);
        assert_eq!(style.alignment, htmldeck_pptx::Alignment::Center);

        let (bbox, _) = text_element(&slide, "Key Insights:").unwrap();
        assert!((bbox.top - 4.82).abs() < 1e-9);
        assert!(text_element(&slide, "\u{2022} Glucose separates the classes best").is_some());
        assert!(!has_text(&slide, "short"));
    }

    #[test]
    fn test_default_insights_without_image() {
        let slide = render(&FeaturedImage, &section("<section><h2>Data Visualization</h2></section>"));
        let (bbox, _) = text_element(&slide, "Key Insights:").unwrap();
        assert!((bbox.top - 4.55).abs() < 1e-9);
        assert!(has_text(&slide, "Glucose appears to be the strongest distinguishing factor"));
        assert_eq!(slide.texts().filter(|t| t.starts_with('\u{2022}')).count(), 3);
    }
}
