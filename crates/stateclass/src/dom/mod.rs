//! In-memory HTML document
//!
//! The toggler operates on an explicit document rather than an ambient
//! global one. Nodes live in a flat arena indexed by [`NodeId`]; parent and
//! child links are stored as ids, so traversal never borrows across nodes.
//!
//! # Example
//!
//! ```
//! use stateclass::Document;
//!
//! let doc = Document::parse(r#"<div class="panel"><p id="x">hi</p></div>"#).unwrap();
//! let p = doc.element_by_id("x").unwrap();
//! let panel = doc.ancestors(p).next().unwrap();
//!
//! assert_eq!(doc.tag_name(p), Some("p"));
//! assert!(doc.has_class(panel, "panel"));
//! ```

pub mod class_list;
pub mod parse;
pub mod serialize;

use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

use crate::error::{Result, StateclassError};

/// Attribute map preserving source order.
pub type Attributes = IndexMap<String, String>;

/// Index of a node in a [`Document`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of this node in the arena.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An element's tag name and attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Lowercased tag name
    pub tag_name: String,

    /// Attributes in source order
    pub attrs: Attributes,
}

impl Element {
    /// Create an element, lowercasing the tag name.
    pub fn new(tag_name: impl Into<String>, attrs: Attributes) -> Self {
        Self {
            tag_name: tag_name.into().to_ascii_lowercase(),
            attrs,
        }
    }

    /// Look up an attribute value.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// Whether the element's class set contains `class_name`.
    pub fn has_class(&self, class_name: &str) -> bool {
        class_list::tokens(self.attr("class")).any(|token| token == class_name)
    }
}

/// What a node holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// The document root
    Document,
    /// An element
    Element(Element),
    /// Character data
    Text(String),
    /// `<!-- ... -->`
    Comment(String),
    /// `<!DOCTYPE ...>`, holding everything after the keyword
    Doctype(String),
}

/// A node in the arena.
#[derive(Debug, Clone)]
pub struct Node {
    /// Parent link; `None` only for the document root
    pub parent: Option<NodeId>,

    /// Children in document order
    pub children: Vec<NodeId>,

    /// Payload
    pub kind: NodeKind,
}

/// An HTML document tree.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document holding only the root node.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                parent: None,
                children: Vec::new(),
                kind: NodeKind::Document,
            }],
            root: NodeId(0),
        }
    }

    /// Parse markup into a document.
    pub fn parse(html: &str) -> Result<Self> {
        parse::parse_html(html)
    }

    /// Serialize the document back to markup.
    pub fn to_html(&self) -> String {
        serialize::to_html(self)
    }

    /// The document root.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of nodes, including the root.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the document holds nothing but its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    // ═══════════════════════════════════════════════════════════════════
    // Construction
    // ═══════════════════════════════════════════════════════════════════

    /// Panics before touching the arena when `parent` is not a node of this
    /// document, so a failed call never leaves an unreachable node behind.
    fn create_node(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        let Some(siblings) = self.nodes.get_mut(parent.0).map(|p| &mut p.children) else {
            panic!("parent {} is not a node of this document ({} nodes)", parent, id.0);
        };
        siblings.push(id);
        self.nodes.push(Node {
            parent: Some(parent),
            children: Vec::new(),
            kind,
        });
        id
    }

    /// Append a new element under `parent`.
    ///
    /// # Panics
    ///
    /// Panics if `parent` was not created by this document. The same holds
    /// for the other `create_*` methods.
    pub fn create_element(
        &mut self,
        parent: NodeId,
        tag_name: impl Into<String>,
        attrs: Attributes,
    ) -> NodeId {
        self.create_node(parent, NodeKind::Element(Element::new(tag_name, attrs)))
    }

    /// Append a text node under `parent`.
    pub fn create_text(&mut self, parent: NodeId, text: impl Into<String>) -> NodeId {
        self.create_node(parent, NodeKind::Text(text.into()))
    }

    /// Append a comment under `parent`.
    pub fn create_comment(&mut self, parent: NodeId, text: impl Into<String>) -> NodeId {
        self.create_node(parent, NodeKind::Comment(text.into()))
    }

    /// Append a doctype under `parent`.
    pub fn create_doctype(&mut self, parent: NodeId, body: impl Into<String>) -> NodeId {
        self.create_node(parent, NodeKind::Doctype(body.into()))
    }

    // ═══════════════════════════════════════════════════════════════════
    // Node Access
    // ═══════════════════════════════════════════════════════════════════

    /// Get a node by id.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get an element by id, `None` for other node kinds.
    pub fn element(&self, id: NodeId) -> Option<&Element> {
        match self.nodes.get(id.0).map(|n| &n.kind) {
            Some(NodeKind::Element(element)) => Some(element),
            _ => None,
        }
    }

    /// Mutable access to an element.
    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        match self.nodes.get_mut(id.0).map(|n| &mut n.kind) {
            Some(NodeKind::Element(element)) => Some(element),
            _ => None,
        }
    }

    /// Parent of a node.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.0).and_then(|n| n.parent)
    }

    /// Children of a node, in document order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id.0)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// Walk up from `id`, excluding `id` itself and ending at the root.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            doc: self,
            next: self.parent(id),
        }
    }

    /// Pre-order walk of the subtree below `id`, excluding `id` itself.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        let mut stack: Vec<NodeId> = self.children(id).to_vec();
        stack.reverse();
        Descendants { doc: self, stack }
    }

    /// All elements in document order.
    pub fn elements(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.descendants(self.root)
            .filter(move |id| self.element(*id).is_some())
    }

    // ═══════════════════════════════════════════════════════════════════
    // Element Queries
    // ═══════════════════════════════════════════════════════════════════

    /// Tag name of an element.
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|e| e.tag_name.as_str())
    }

    /// Attribute value of an element.
    pub fn get_attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id).and_then(|e| e.attr(name))
    }

    /// Whether an element carries the attribute.
    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.get_attribute(id, name).is_some()
    }

    /// Set an attribute, keeping its position if it already exists.
    pub fn set_attribute(
        &mut self,
        id: NodeId,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<()> {
        let element = self
            .element_mut(id)
            .ok_or(StateclassError::NotAnElement(id))?;
        element.attrs.insert(name.into(), value.into());
        Ok(())
    }

    /// Remove an attribute. Returns the old value.
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> Result<Option<String>> {
        let element = self
            .element_mut(id)
            .ok_or(StateclassError::NotAnElement(id))?;
        Ok(element.attrs.shift_remove(name))
    }

    /// First element in document order whose `id` attribute equals `id`.
    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.elements()
            .find(|node| self.get_attribute(*node, "id") == Some(id))
    }
}

/// Iterator over a node's ancestors, nearest first.
pub struct Ancestors<'a> {
    doc: &'a Document,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.doc.parent(current);
        Some(current)
    }
}

/// Pre-order iterator over a subtree.
pub struct Descendants<'a> {
    doc: &'a Document,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.stack.pop()?;
        self.stack
            .extend(self.doc.children(current).iter().rev().copied());
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Document, NodeId, NodeId, NodeId) {
        let mut doc = Document::new();
        let root = doc.root();
        let outer = doc.create_element(root, "DIV", Attributes::new());
        let inner = doc.create_element(outer, "span", Attributes::new());
        doc.create_text(inner, "x");
        let sibling = doc.create_element(outer, "p", Attributes::new());
        (doc, outer, inner, sibling)
    }

    #[test]
    fn test_create_element_lowercases_tag() {
        let (doc, outer, _, _) = sample();
        assert_eq!(doc.tag_name(outer), Some("div"));
    }

    #[test]
    #[should_panic(expected = "is not a node of this document")]
    fn test_create_under_foreign_parent_panics() {
        let mut doc = Document::new();
        doc.create_text(NodeId(7), "x");
    }

    #[test]
    fn test_failed_create_leaves_arena_unchanged() {
        let (mut doc, _, _, _) = sample();
        let before = doc.len();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            doc.create_element(NodeId(before + 3), "p", Attributes::new())
        }));
        assert!(result.is_err());
        assert_eq!(doc.len(), before);
        assert_eq!(doc.descendants(doc.root()).count(), before - 1);
    }

    #[test]
    fn test_ancestors_nearest_first() {
        let (doc, outer, inner, _) = sample();
        let chain: Vec<_> = doc.ancestors(inner).collect();
        assert_eq!(chain, vec![outer, doc.root()]);
    }

    #[test]
    fn test_descendants_preorder() {
        let (doc, outer, inner, sibling) = sample();
        let text = doc.children(inner)[0];
        let walk: Vec<_> = doc.descendants(outer).collect();
        assert_eq!(walk, vec![inner, text, sibling]);
    }

    #[test]
    fn test_elements_skips_text() {
        let (doc, outer, inner, sibling) = sample();
        let all: Vec<_> = doc.elements().collect();
        assert_eq!(all, vec![outer, inner, sibling]);
    }

    #[test]
    fn test_set_attribute_on_text_fails() {
        let (mut doc, _, inner, _) = sample();
        let text = doc.children(inner)[0];
        assert!(matches!(
            doc.set_attribute(text, "id", "t"),
            Err(StateclassError::NotAnElement(id)) if id == text
        ));
    }

    #[test]
    fn test_remove_attribute_keeps_order() {
        let (mut doc, outer, _, _) = sample();
        doc.set_attribute(outer, "a", "1").unwrap();
        doc.set_attribute(outer, "b", "2").unwrap();
        doc.set_attribute(outer, "c", "3").unwrap();
        assert_eq!(doc.remove_attribute(outer, "b").unwrap(), Some("2".into()));
        let keys: Vec<_> = doc.element(outer).unwrap().attrs.keys().cloned().collect();
        assert_eq!(keys, vec!["a", "c"]);
    }
}
