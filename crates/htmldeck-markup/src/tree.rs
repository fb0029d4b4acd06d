//! Arena-backed markup tree.
//!
//! Nodes live in a contiguous vector and reference each other by index.
//! The tree is built once by the parser (or copied out of another tree with
//! [`MarkupTree::subtree`]) and never mutated afterwards.

/// Index of a node in a [`MarkupTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Node payload.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Document root.
    Document,
    /// Element with a lowercase tag name and attributes in source order.
    Element {
        tag: String,
        attrs: Vec<(String, String)>,
    },
    /// Text content.
    Text(String),
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Immutable markup tree. Node 0 is always the root.
#[derive(Debug, Clone)]
pub struct MarkupTree {
    nodes: Vec<Node>,
}

impl Default for MarkupTree {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkupTree {
    /// Create a tree holding only a document root.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                kind: NodeKind::Document,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    /// Append a node under `parent` and return its id.
    ///
    /// Only the parser and [`MarkupTree::subtree`] build trees.
    pub(crate) fn append(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            kind,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.index()].children.push(id);
        id
    }

    /// Root node handle.
    pub fn root(&self) -> NodeRef<'_> {
        NodeRef {
            tree: self,
            id: NodeId(0),
        }
    }

    /// Handle for a node id, if it belongs to this tree.
    pub fn get(&self, id: NodeId) -> Option<NodeRef<'_>> {
        (id.index() < self.nodes.len()).then_some(NodeRef { tree: self, id })
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree holds nothing but its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Copy the subtree rooted at `node` into a standalone tree whose root
    /// is the copied node itself.
    pub fn subtree(node: NodeRef<'_>) -> MarkupTree {
        let mut tree = MarkupTree {
            nodes: vec![Node {
                kind: node.kind().clone(),
                parent: None,
                children: Vec::new(),
            }],
        };
        for child in node.children() {
            copy_into(&mut tree, NodeId(0), child);
        }
        tree
    }
}

fn copy_into(tree: &mut MarkupTree, parent: NodeId, node: NodeRef<'_>) {
    let id = tree.append(parent, node.kind().clone());
    for child in node.children() {
        copy_into(tree, id, child);
    }
}

/// Borrowed handle to a node, carrying the query helpers.
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    tree: &'a MarkupTree,
    id: NodeId,
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl std::fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind() {
            NodeKind::Document => write!(f, "#document"),
            NodeKind::Element { tag, .. } => write!(f, "<{}>#{}", tag, self.id.0),
            NodeKind::Text(text) => write!(f, "{:?}", text),
        }
    }
}

impl<'a> NodeRef<'a> {
    fn node(&self) -> &'a Node {
        &self.tree.nodes[self.id.index()]
    }

    fn at(&self, id: NodeId) -> NodeRef<'a> {
        NodeRef {
            tree: self.tree,
            id,
        }
    }

    /// Node id within its tree.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Node payload.
    pub fn kind(&self) -> &'a NodeKind {
        &self.node().kind
    }

    /// Tag name for elements.
    pub fn tag(&self) -> Option<&'a str> {
        match &self.node().kind {
            NodeKind::Element { tag, .. } => Some(tag.as_str()),
            _ => None,
        }
    }

    pub fn is_element(&self) -> bool {
        self.tag().is_some()
    }

    /// Whether this is an element with the given tag.
    pub fn is(&self, tag: &str) -> bool {
        self.tag() == Some(tag)
    }

    /// Attribute value by name.
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        match &self.node().kind {
            NodeKind::Element { attrs, .. } => attrs
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.as_str()),
            _ => None,
        }
    }

    /// All attributes in source order.
    pub fn attrs(&self) -> &'a [(String, String)] {
        match &self.node().kind {
            NodeKind::Element { attrs, .. } => attrs,
            _ => &[],
        }
    }

    /// Whitespace-separated class tokens.
    pub fn classes(&self) -> impl Iterator<Item = &'a str> {
        self.attr("class").unwrap_or("").split_whitespace()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }

    /// Inline `style` attribute, or an empty string.
    pub fn style(&self) -> &'a str {
        self.attr("style").unwrap_or("")
    }

    pub fn parent(&self) -> Option<NodeRef<'a>> {
        self.node().parent.map(|id| self.at(id))
    }

    /// Direct children, text included.
    pub fn children(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        let tree = self.tree;
        self.node()
            .children
            .iter()
            .map(move |&id| NodeRef { tree, id })
    }

    /// Direct element children.
    pub fn element_children(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        self.children().filter(|n| n.is_element())
    }

    /// Direct element children with the given tag.
    pub fn children_by_tag(&self, tag: &'a str) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        self.children().filter(move |n| n.is(tag))
    }

    /// Direct element children carrying `class`, optionally restricted to `tag`.
    pub fn child_elements_with_class(
        &self,
        tag: Option<&str>,
        class: &str,
    ) -> Vec<NodeRef<'a>> {
        self.element_children()
            .filter(|n| tag.map_or(true, |t| n.is(t)) && n.has_class(class))
            .collect()
    }

    /// All descendants in document order (preorder), excluding `self`.
    pub fn descendants(&self) -> Descendants<'a> {
        let mut stack: Vec<NodeId> = self.node().children.clone();
        stack.reverse();
        Descendants {
            tree: self.tree,
            stack,
        }
    }

    /// Descendant elements in document order.
    pub fn descendant_elements(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        self.descendants().filter(|n| n.is_element())
    }

    /// First descendant element with the given tag.
    pub fn find(&self, tag: &str) -> Option<NodeRef<'a>> {
        self.descendants().find(|n| n.is(tag))
    }

    /// First descendant element whose tag is any of `tags`.
    pub fn find_any(&self, tags: &[&str]) -> Option<NodeRef<'a>> {
        self.descendants()
            .find(|n| n.tag().is_some_and(|t| tags.contains(&t)))
    }

    /// All descendant elements with the given tag.
    pub fn find_all(&self, tag: &str) -> Vec<NodeRef<'a>> {
        self.descendants().filter(|n| n.is(tag)).collect()
    }

    /// All descendant elements whose tag is any of `tags`, in document order.
    pub fn find_all_any(&self, tags: &[&str]) -> Vec<NodeRef<'a>> {
        self.descendants()
            .filter(|n| n.tag().is_some_and(|t| tags.contains(&t)))
            .collect()
    }

    /// First descendant element carrying `class`.
    pub fn find_by_class(&self, class: &str) -> Option<NodeRef<'a>> {
        self.descendants().find(|n| n.has_class(class))
    }

    /// All descendant elements carrying `class`.
    pub fn find_all_by_class(&self, class: &str) -> Vec<NodeRef<'a>> {
        self.descendants().filter(|n| n.has_class(class)).collect()
    }

    /// All descendant elements carrying any of `classes`.
    pub fn find_all_by_class_any(&self, classes: &[&str]) -> Vec<NodeRef<'a>> {
        self.descendants()
            .filter(|n| n.classes().any(|c| classes.contains(&c)))
            .collect()
    }

    /// First descendant `tag` element carrying `class`.
    pub fn find_tag_with_class(&self, tag: &str, class: &str) -> Option<NodeRef<'a>> {
        self.descendants().find(|n| n.is(tag) && n.has_class(class))
    }

    /// Next sibling element with the given tag.
    pub fn next_sibling_element(&self, tag: &str) -> Option<NodeRef<'a>> {
        let parent = self.parent()?;
        parent
            .children()
            .skip_while(|n| n.id != self.id)
            .skip(1)
            .find(|n| n.is(tag))
    }

    /// Concatenated text of this node and all descendants, unnormalized.
    pub fn text(&self) -> String {
        let mut out = String::new();
        if let NodeKind::Text(text) = self.kind() {
            out.push_str(text);
        }
        for node in self.descendants() {
            if let NodeKind::Text(text) = node.kind() {
                out.push_str(text);
            }
        }
        out
    }

    /// Serialized markup of this node, including its own tag.
    pub fn outer_html(&self) -> String {
        crate::serialize::outer_html(*self)
    }
}

/// Preorder descendant iterator.
pub struct Descendants<'a> {
    tree: &'a MarkupTree,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = NodeRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let node = &self.tree.nodes[id.index()];
        self.stack.extend(node.children.iter().rev());
        Some(NodeRef {
            tree: self.tree,
            id,
        })
    }
}
