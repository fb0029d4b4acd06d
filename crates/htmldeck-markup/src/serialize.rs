//! Deterministic outer-HTML serialization.
//!
//! Attributes are written in source order, so the same tree always yields
//! the same string.

use crate::is_void_element;
use crate::tree::{NodeKind, NodeRef};

/// Serialize a node and its descendants.
pub fn outer_html(node: NodeRef<'_>) -> String {
    let mut out = String::new();
    write_node(&mut out, node);
    out
}

/// Serialize only the children of a node.
pub fn inner_html(node: NodeRef<'_>) -> String {
    let mut out = String::new();
    for child in node.children() {
        write_node(&mut out, child);
    }
    out
}

fn write_node(out: &mut String, node: NodeRef<'_>) {
    match node.kind() {
        NodeKind::Document => {
            for child in node.children() {
                write_node(out, child);
            }
        }
        NodeKind::Text(text) => out.push_str(&escape_text(text)),
        NodeKind::Element { tag, attrs } => {
            out.push('<');
            out.push_str(tag);
            for (name, value) in attrs {
                out.push(' ');
                out.push_str(name);
                out.push_str("=\"");
                out.push_str(&escape_attr(value));
                out.push('"');
            }
            out.push('>');
            if is_void_element(tag) {
                return;
            }
            for child in node.children() {
                write_node(out, child);
            }
            out.push_str("</");
            out.push_str(tag);
            out.push('>');
        }
    }
}

fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(s: &str) -> String {
    s.replace('&', "&amp;").replace('"', "&quot;")
}
