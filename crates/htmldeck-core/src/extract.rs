//! Text extraction with fallback.
//!
//! Every region a template fills is looked up in up to three tiers:
//! a structured lookup (navigating from a marker element), a keyword scan
//! over text-bearing elements, and finally a literal default. The first
//! tier producing non-empty text wins.
//!
//! ```
//! use htmldeck_core::extract::{extract_text, TextPredicate};
//! use htmldeck_markup::parse_html;
//!
//! let tree = parse_html("<section><p>Diabetes is a silent killer.</p></section>");
//! let text = extract_text(tree.root())
//!     .structured(|root| root.find("blockquote").map(|n| n.text()))
//!     .keyword(&TextPredicate::keywords(&["p"], &["SILENT KILLER"]))
//!     .or_default("fallback");
//! assert_eq!(text, "Diabetes is a silent killer.");
//! ```

use htmldeck_markup::NodeRef;

/// Decorative symbols removed from extracted text.
pub const SYMBOL_DENYLIST: &[char] = &[
    '\u{1F3C6}', // trophy
    '\u{26A0}',  // warning sign
    '\u{FE0F}',  // variation selector
    '\u{1F50D}', // magnifying glass
    '\u{1F4A1}', // light bulb
    '\u{1F30D}', // globe
    '\u{1F4CA}', // bar chart
    '\u{1F6E0}', // hammer and wrench
    '\u{2699}',  // gear
    '\u{1F680}', // rocket
    '\u{1F52E}', // crystal ball
];

/// Strip denylisted symbols, collapse whitespace runs and trim.
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| !SYMBOL_DENYLIST.contains(c))
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalized text of a node and its descendants.
pub fn node_text(node: NodeRef<'_>) -> String {
    normalize(&node.text())
}

/// Number of characters (not bytes).
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Cut `text` to `keep` characters followed by `...` when it is longer
/// than `limit` characters. Word boundaries are ignored.
pub fn truncate_chars(text: &str, limit: usize, keep: usize) -> String {
    if char_len(text) > limit {
        let mut cut: String = text.chars().take(keep).collect();
        cut.push_str("...");
        cut
    } else {
        text.to_string()
    }
}

enum Rule {
    /// Case-insensitive substring match against any keyword
    AnyKeyword(Vec<String>),
    /// Arbitrary test over the normalized text
    Custom(Box<dyn Fn(&str) -> bool>),
}

/// Keyword-tier predicate: which elements to scan and what to accept.
pub struct TextPredicate {
    tags: Vec<String>,
    rule: Rule,
    min_chars: usize,
}

impl TextPredicate {
    /// Accept elements whose text contains any of `keywords`, ignoring case.
    pub fn keywords(tags: &[&str], keywords: &[&str]) -> Self {
        Self {
            tags: tags.iter().map(|t| t.to_string()).collect(),
            rule: Rule::AnyKeyword(keywords.iter().map(|k| k.to_lowercase()).collect()),
            min_chars: 0,
        }
    }

    /// Accept elements whose normalized text satisfies `test`.
    pub fn matching(tags: &[&str], test: impl Fn(&str) -> bool + 'static) -> Self {
        Self {
            tags: tags.iter().map(|t| t.to_string()).collect(),
            rule: Rule::Custom(Box::new(test)),
            min_chars: 0,
        }
    }

    /// Accept any non-empty text of the given tags.
    pub fn any(tags: &[&str]) -> Self {
        Self::matching(tags, |_| true)
    }

    /// Additionally require more than `n` characters.
    pub fn longer_than(mut self, n: usize) -> Self {
        self.min_chars = n;
        self
    }

    /// Whether normalized `text` is accepted.
    pub fn matches(&self, text: &str) -> bool {
        if text.is_empty() || char_len(text) <= self.min_chars {
            return false;
        }
        match &self.rule {
            Rule::AnyKeyword(keywords) => {
                let lower = text.to_lowercase();
                keywords.iter().any(|k| lower.contains(k.as_str()))
            }
            Rule::Custom(test) => test(text),
        }
    }

    fn scans(&self, node: NodeRef<'_>) -> bool {
        node.tag()
            .is_some_and(|tag| self.tags.iter().any(|t| t == tag))
    }

    /// First accepted text under `root`, in document order.
    pub fn first_match(&self, root: NodeRef<'_>) -> Option<String> {
        self.first_node(root).map(node_text)
    }

    /// First element under `root` whose text is accepted.
    pub fn first_node<'a>(&self, root: NodeRef<'a>) -> Option<NodeRef<'a>> {
        root.descendant_elements()
            .filter(|n| self.scans(*n))
            .find(|n| self.matches(&node_text(*n)))
    }

    /// Every accepted text under `root`, in document order.
    pub fn all_matches(&self, root: NodeRef<'_>) -> Vec<String> {
        root.descendant_elements()
            .filter(|n| self.scans(*n))
            .map(node_text)
            .filter(|text| self.matches(text))
            .collect()
    }
}

impl std::fmt::Debug for TextPredicate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rule = match &self.rule {
            Rule::AnyKeyword(keywords) => format!("any of {:?}", keywords),
            Rule::Custom(_) => "custom".to_string(),
        };
        f.debug_struct("TextPredicate")
            .field("tags", &self.tags)
            .field("rule", &rule)
            .field("min_chars", &self.min_chars)
            .finish()
    }
}

/// Values a fallback chain can produce.
pub trait Extracted {
    /// Whether the value counts as a miss.
    fn is_blank(&self) -> bool;
}

impl Extracted for String {
    fn is_blank(&self) -> bool {
        self.trim().is_empty()
    }
}

impl Extracted for Vec<String> {
    fn is_blank(&self) -> bool {
        self.iter().all(|s| s.trim().is_empty())
    }
}

/// A fallback chain in progress.
#[derive(Debug)]
pub struct Fallback<'a, T> {
    root: NodeRef<'a>,
    found: Option<T>,
}

/// Start a chain producing a single string.
pub fn extract_text(root: NodeRef<'_>) -> Fallback<'_, String> {
    Fallback { root, found: None }
}

/// Start a chain producing a list of strings.
pub fn extract_list(root: NodeRef<'_>) -> Fallback<'_, Vec<String>> {
    Fallback { root, found: None }
}

impl<'a, T: Extracted> Fallback<'a, T> {
    /// Structured tier: run `lookup` unless an earlier tier succeeded.
    pub fn structured(mut self, lookup: impl FnOnce(NodeRef<'a>) -> Option<T>) -> Self {
        if self.found.is_none() {
            self.found = lookup(self.root).filter(|v| !v.is_blank());
        }
        self
    }

    /// Result so far, without a default.
    pub fn found(self) -> Option<T> {
        self.found
    }
}

impl<'a> Fallback<'a, String> {
    /// Keyword tier: first element text accepted by `predicate`.
    pub fn keyword(mut self, predicate: &TextPredicate) -> Self {
        if self.found.is_none() {
            self.found = predicate.first_match(self.root);
        }
        self
    }

    /// Default tier.
    pub fn or_default(self, default: &str) -> String {
        self.found.unwrap_or_else(|| default.to_string())
    }

    /// Empty string when every tier missed.
    pub fn or_empty(self) -> String {
        self.found.unwrap_or_default()
    }
}

impl<'a> Fallback<'a, Vec<String>> {
    /// Keyword tier: every element text accepted by `predicate`.
    pub fn keyword(mut self, predicate: &TextPredicate) -> Self {
        if self.found.is_none() {
            let matches = predicate.all_matches(self.root);
            if !matches.is_blank() {
                self.found = Some(matches);
            }
        }
        self
    }

    /// Default tier.
    pub fn or_default(self, default: &[&str]) -> Vec<String> {
        self.found
            .unwrap_or_else(|| default.iter().map(|s| s.to_string()).collect())
    }
}
