//! HTML parsing into a [`MarkupTree`].
//!
//! `html5ever` builds an `RcDom`, which is then copied into the arena.
//! Comments, doctypes and processing instructions are dropped.

use crate::error::{MarkupError, Result};
use crate::tree::{MarkupTree, NodeId, NodeKind};
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use html5ever::ParseOpts;
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use std::path::Path;
use tracing::debug;

/// Parse an HTML document.
///
/// HTML parsing never fails: malformed markup is repaired the way a
/// browser would repair it.
pub fn parse_html(html: &str) -> MarkupTree {
    let dom = parse_document(RcDom::default(), ParseOpts::default())
        .from_utf8()
        .one(html.as_bytes());

    let mut tree = MarkupTree::new();
    for child in dom.document.children.borrow().iter() {
        copy_handle(&mut tree, NodeId(0), child);
    }
    debug!(nodes = tree.len(), "Parsed markup");
    tree
}

/// Parse HTML from raw bytes, which must be UTF-8.
pub fn parse_bytes(bytes: &[u8]) -> Result<MarkupTree> {
    let html = std::str::from_utf8(bytes).map_err(|e| MarkupError::encoding(e.to_string()))?;
    Ok(parse_html(html))
}

/// Read and parse an HTML file.
pub fn parse_file(path: impl AsRef<Path>) -> Result<MarkupTree> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(MarkupError::not_found(path));
    }
    let bytes = std::fs::read(path)?;
    parse_bytes(&bytes)
}

fn copy_handle(tree: &mut MarkupTree, parent: NodeId, handle: &Handle) {
    match handle.data {
        NodeData::Element {
            ref name,
            ref attrs,
            ..
        } => {
            let attrs = attrs
                .borrow()
                .iter()
                .map(|a| (a.name.local.to_string(), a.value.to_string()))
                .collect();
            let id = tree.append(
                parent,
                NodeKind::Element {
                    tag: name.local.to_string(),
                    attrs,
                },
            );
            for child in handle.children.borrow().iter() {
                copy_handle(tree, id, child);
            }
        }
        NodeData::Text { ref contents } => {
            tree.append(parent, NodeKind::Text(contents.borrow().to_string()));
        }
        _ => {}
    }
}
