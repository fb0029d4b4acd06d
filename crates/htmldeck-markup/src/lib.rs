//! # htmldeck-markup
//!
//! A small, immutable DOM for slide markup.
//!
//! HTML is parsed with `html5ever` and copied into an arena-backed
//! [`MarkupTree`]. Nodes are addressed by index and read through the
//! borrowed [`NodeRef`] handle, which carries the query helpers the
//! synthesis engine relies on: find-by-tag, find-by-class, descendant
//! text and a deterministic outer-HTML serialization.
//!
//! ## Example
//!
//! ```rust
//! use htmldeck_markup::parse_html;
//!
//! let tree = parse_html("<section><h2>Hello</h2><p class=\"lead\">World</p></section>");
//! let section = tree.root().find("section").unwrap();
//! assert_eq!(section.find("h2").unwrap().text(), "Hello");
//! assert!(section.find_by_class("lead").is_some());
//! ```

pub mod error;
pub mod parse;
pub mod serialize;
pub mod tree;

// Re-exports
pub use error::{MarkupError, Result};
pub use parse::{parse_bytes, parse_file, parse_html};
pub use tree::{MarkupTree, NodeId, NodeKind, NodeRef};

/// Elements that never carry children or a closing tag.
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Whether a tag name is a void element.
pub fn is_void_element(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}
