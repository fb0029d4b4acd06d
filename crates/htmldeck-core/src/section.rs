//! Slide sections.
//!
//! Each `<section>` element of the input document becomes one immutable
//! [`Section`]: its title, a standalone copy of its subtree, the background
//! attribute and the image references that resolved to files.

use crate::assets::{AssetResolver, ResolveStrategy};
use crate::extract::node_text;
use htmldeck_markup::{MarkupTree, NodeRef};
use htmldeck_pptx::Color;
use serde::Serialize;
use std::path::PathBuf;
use tracing::debug;

/// Attribute carrying a section's background color.
pub const BACKGROUND_ATTR: &str = "data-background-color";

/// An `<img>` reference
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageRef {
    /// `src` as written in the markup
    pub source_path: String,

    /// Absolute path of the file, once resolved
    pub resolved_path: Option<PathBuf>,

    /// Path convention that found the file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_by: Option<ResolveStrategy>,

    pub alt_text: String,

    pub inline_style: String,
}

impl ImageRef {
    fn from_node(node: NodeRef<'_>) -> Self {
        Self {
            source_path: node.attr("src").unwrap_or_default().to_string(),
            resolved_path: None,
            resolved_by: None,
            alt_text: node.attr("alt").unwrap_or_default().to_string(),
            inline_style: node.style().to_string(),
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved_path.is_some()
    }
}

/// One slide's source content
#[derive(Debug, Clone)]
pub struct Section {
    /// 1-based position in the document
    pub index: usize,

    /// Normalized text of the first `h1`/`h2`; empty when there is none
    pub title: String,

    /// Background color from the section attribute
    pub background: Option<Color>,

    /// Resolved images in document order
    pub images: Vec<ImageRef>,

    /// `src` values that could not be resolved
    pub unresolved: Vec<String>,

    tree: MarkupTree,
    html: String,
}

impl Section {
    /// Build a section from its `<section>` element.
    pub fn from_node(index: usize, node: NodeRef<'_>, resolver: &AssetResolver) -> Self {
        let title = node
            .find_any(&["h1", "h2"])
            .map(node_text)
            .unwrap_or_default();

        let background = node.attr(BACKGROUND_ATTR).map(Color::from_hex);

        let mut images = Vec::new();
        let mut unresolved = Vec::new();
        for img in node.find_all("img") {
            let mut image = ImageRef::from_node(img);
            if image.source_path.is_empty() {
                continue;
            }
            match resolver.resolve(&image.source_path) {
                Some((path, strategy)) => {
                    image.resolved_path = Some(path);
                    image.resolved_by = Some(strategy);
                    images.push(image);
                }
                None => unresolved.push(image.source_path),
            }
        }

        debug!(
            index,
            title = %title,
            images = images.len(),
            unresolved = unresolved.len(),
            "Parsed section"
        );

        Self {
            index,
            title,
            background,
            images,
            unresolved,
            tree: MarkupTree::subtree(node),
            html: node.outer_html(),
        }
    }

    /// The `<section>` element.
    pub fn root(&self) -> NodeRef<'_> {
        self.tree.root()
    }

    /// Serialized markup of the whole section.
    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn has_title(&self) -> bool {
        !self.title.is_empty()
    }

    /// Whether the title contains `needle`; never true for an empty title.
    pub fn title_contains(&self, needle: &str) -> bool {
        self.has_title() && self.title.contains(needle)
    }

    pub fn has_images(&self) -> bool {
        !self.images.is_empty()
    }

    /// First resolved image.
    pub fn first_image(&self) -> Option<&ImageRef> {
        self.images.first()
    }
}

/// Every `<section>` element of a document, in document order.
pub fn parse_sections(document: &MarkupTree, resolver: &AssetResolver) -> Vec<Section> {
    document
        .root()
        .find_all("section")
        .into_iter()
        .enumerate()
        .map(|(i, node)| Section::from_node(i + 1, node, resolver))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use htmldeck_markup::parse_html;

    const DECK: &str = r##"
        <div class="reveal"><div class="slides">
          <section data-background-color="#fef2f2">
            <h2>The   Critical Blind Spot</h2>
            <img src="images/missing.png" alt="none">
          </section>
          <section>
            <p>No heading here</p>
          </section>
          <section>
            <section><h1>Nested</h1></section>
          </section>
        </div></div>
    "##;

    #[test]
    fn test_sections_in_document_order() {
        let dir = tempfile::tempdir().unwrap();
        let tree = parse_html(DECK);
        let sections = parse_sections(&tree, &AssetResolver::new(dir.path()));

        assert_eq!(sections.len(), 4);
        assert_eq!(sections[0].index, 1);
        assert_eq!(sections[0].title, "The Critical Blind Spot");
        assert_eq!(
            sections[0].background,
            Some(Color::rgb(0xfe, 0xf2, 0xf2))
        );
        assert!(sections[1].title.is_empty());
        assert!(!sections[1].title_contains(""));
        assert_eq!(sections[2].title, "Nested");
        assert_eq!(sections[3].title, "Nested");
    }

    #[test]
    fn test_unresolved_images_are_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let tree = parse_html(DECK);
        let sections = parse_sections(&tree, &AssetResolver::new(dir.path()));

        assert!(sections[0].images.is_empty());
        assert_eq!(sections[0].unresolved, vec!["images/missing.png"]);
    }

    #[test]
    fn test_resolved_image_keeps_attributes() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("roc.png"), b"png").unwrap();
        let tree = parse_html(
            r#"<section><h2>ROC</h2><img src="images/roc.png" alt="ROC curve" style="width: 80%"></section>"#,
        );
        let sections = parse_sections(&tree, &AssetResolver::new(dir.path()));

        let image = sections[0].first_image().unwrap();
        assert!(image.is_resolved());
        assert_eq!(image.resolved_by, Some(ResolveStrategy::AssetPrefix));
        assert_eq!(image.alt_text, "ROC curve");
        assert_eq!(image.inline_style, "width: 80%");
        assert!(sections[0].html().contains("ROC curve"));
        assert!(sections[0].root().is("section"));
    }
}
