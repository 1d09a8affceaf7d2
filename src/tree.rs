//! Read-only document tree capabilities.
//!
//! The extraction engine never sees a concrete DOM. It is written against
//! [`ContentTree`], which any tree (a parsed static page, a browser snapshot,
//! a test fixture) can implement.

use std::fmt::Debug;
use std::hash::Hash;

/// What a node is, as far as extraction is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind<'a> {
    /// Element with its lower-case local name.
    Element(&'a str),
    /// Raw text run.
    Text(&'a str),
    /// Document, comment, doctype and anything else without content.
    Other,
}

/// A read-only, externally owned document tree.
///
/// Node handles are cheap identities: two handles compare equal exactly when
/// they denote the same node.
pub trait ContentTree {
    type Node: Copy + Eq + Hash + Debug;

    /// The document node (parent of the root element).
    fn document(&self) -> Self::Node;

    /// The `body` element, if the tree has one.
    fn body(&self) -> Option<Self::Node>;

    fn kind(&self, node: Self::Node) -> NodeKind<'_>;

    fn parent(&self, node: Self::Node) -> Option<Self::Node>;

    /// Children in document order, text and comments included.
    fn children(&self, node: Self::Node) -> impl Iterator<Item = Self::Node> + '_;

    /// Attribute lookup by (lower-case) name.
    fn attr(&self, node: Self::Node, name: &str) -> Option<&str>;

    /// Whether the node is rendered (not `display:none`, not hidden, has a box).
    fn is_visible(&self, node: Self::Node) -> bool;

    /// Element tag name, `None` for non-elements.
    fn tag_name(&self, node: Self::Node) -> Option<&str> {
        match self.kind(node) {
            NodeKind::Element(name) => Some(name),
            _ => None,
        }
    }

    fn is_element(&self, node: Self::Node) -> bool {
        matches!(self.kind(node), NodeKind::Element(_))
    }

    fn has_tag(&self, node: Self::Node, tag: &str) -> bool {
        self.tag_name(node) == Some(tag)
    }

    /// Child elements in document order.
    fn element_children(&self, node: Self::Node) -> impl Iterator<Item = Self::Node> + '_ {
        self.children(node).filter(move |&child| self.is_element(child))
    }

    /// The node itself followed by its ancestors, nearest first.
    fn ancestors(&self, node: Self::Node) -> impl Iterator<Item = Self::Node> + '_ {
        std::iter::successors(Some(node), move |&n| self.parent(n))
    }

    fn prev_sibling(&self, node: Self::Node) -> Option<Self::Node> {
        let parent = self.parent(node)?;
        let mut prev = None;
        for child in self.children(parent) {
            if child == node {
                return prev;
            }
            prev = Some(child);
        }
        None
    }

    fn next_sibling(&self, node: Self::Node) -> Option<Self::Node> {
        let parent = self.parent(node)?;
        let mut children = self.children(parent);
        children.find(|&child| child == node)?;
        children.next()
    }

    /// First descendant (pre-order, excluding `node`) matching `predicate`.
    fn find_descendant<F>(&self, node: Self::Node, predicate: F) -> Option<Self::Node>
    where
        F: Fn(Self::Node) -> bool,
    {
        let mut stack: Vec<Self::Node> = self.children(node).collect();
        stack.reverse();
        while let Some(id) = stack.pop() {
            if predicate(id) {
                return Some(id);
            }
            let mark = stack.len();
            stack.extend(self.children(id));
            stack[mark..].reverse();
        }
        None
    }
}
