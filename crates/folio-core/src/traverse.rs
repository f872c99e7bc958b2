#![forbid(unsafe_code)]

//! Iterative depth-first traversal over the node arena.
//!
//! Traversal keeps an explicit stack, so deep or wide trees never grow the
//! call stack.

use crate::id::NodeId;
use crate::node::{LeafNode, Node};
use crate::tree::TreeStore;

/// One node reached by a traversal.
#[derive(Debug, Clone, Copy)]
pub struct Visit<'a> {
    pub id: NodeId,
    /// Distance from the traversal start (start is depth 0).
    pub depth: usize,
    pub node: &'a Node,
}

/// Pre-order (document order) walk starting at one node.
#[derive(Debug)]
pub struct Preorder<'a> {
    tree: &'a TreeStore,
    stack: Vec<(NodeId, usize)>,
    skip_collapsed: bool,
}

impl<'a> Preorder<'a> {
    pub(crate) fn new(tree: &'a TreeStore, start: NodeId) -> Self {
        let stack = if tree.contains(start) {
            vec![(start, 0)]
        } else {
            Vec::new()
        };
        Self {
            tree,
            stack,
            skip_collapsed: false,
        }
    }

    /// Do not descend into collapsed groups.
    #[must_use]
    pub fn visible_only(mut self) -> Self {
        self.skip_collapsed = true;
        self
    }
}

impl<'a> Iterator for Preorder<'a> {
    type Item = Visit<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (id, depth) = self.stack.pop()?;
            let Some(node) = self.tree.node(id) else {
                continue;
            };
            match node {
                Node::Group(group) => {
                    if !self.skip_collapsed || group.expanded {
                        self.stack
                            .extend(group.children.iter().rev().map(|child| (*child, depth + 1)));
                    }
                }
                Node::Leaf(_) => {}
            }
            return Some(Visit { id, depth, node });
        }
    }
}

/// Leaves in document order.
#[derive(Debug)]
pub struct Leaves<'a> {
    inner: Preorder<'a>,
}

impl<'a> Leaves<'a> {
    pub(crate) fn new(inner: Preorder<'a>) -> Self {
        Self { inner }
    }
}

impl<'a> Iterator for Leaves<'a> {
    type Item = &'a LeafNode;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.by_ref().find_map(|visit| visit.node.as_leaf())
    }
}
