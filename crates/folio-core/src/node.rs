#![forbid(unsafe_code)]

//! Group and leaf node payloads.
//!
//! [`Node`] is a closed sum type; every traversal and mutation site matches it
//! exhaustively so a new node kind is a compile-time checked change.

use serde::{Deserialize, Serialize};

use crate::id::{NodeId, ResourceRef};

/// Ordered container of groups and leaves (a range or chapter).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupNode {
    pub id: NodeId,
    pub label: String,
    pub children: Vec<NodeId>,
    /// UI-only disclosure state.
    #[serde(default = "default_expanded")]
    pub expanded: bool,
    /// Set while the group is held in a cut clipboard.
    #[serde(default)]
    pub disabled: bool,
}

fn default_expanded() -> bool {
    true
}

impl GroupNode {
    /// Create an empty, expanded group.
    #[must_use]
    pub fn new(id: NodeId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            children: Vec::new(),
            expanded: true,
            disabled: false,
        }
    }
}

/// Ordered reference to one page/asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeafNode {
    pub id: NodeId,
    pub label: String,
    pub resource: ResourceRef,
    /// Set while the leaf is held in a cut clipboard.
    #[serde(default)]
    pub disabled: bool,
}

impl LeafNode {
    #[must_use]
    pub fn new(id: NodeId, resource: ResourceRef, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            resource,
            disabled: false,
        }
    }
}

/// A node in the structure tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    Group(GroupNode),
    Leaf(LeafNode),
}

/// Node discriminator used in logs and projections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Group,
    Leaf,
}

impl NodeKind {
    /// Stable lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Group => "group",
            Self::Leaf => "leaf",
        }
    }
}

impl Node {
    #[must_use]
    pub const fn id(&self) -> NodeId {
        match self {
            Self::Group(group) => group.id,
            Self::Leaf(leaf) => leaf.id,
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Group(group) => &group.label,
            Self::Leaf(leaf) => &leaf.label,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        match self {
            Self::Group(_) => NodeKind::Group,
            Self::Leaf(_) => NodeKind::Leaf,
        }
    }

    #[must_use]
    pub const fn is_group(&self) -> bool {
        matches!(self, Self::Group(_))
    }

    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf(_))
    }

    #[must_use]
    pub const fn as_group(&self) -> Option<&GroupNode> {
        match self {
            Self::Group(group) => Some(group),
            Self::Leaf(_) => None,
        }
    }

    #[must_use]
    pub const fn as_leaf(&self) -> Option<&LeafNode> {
        match self {
            Self::Leaf(leaf) => Some(leaf),
            Self::Group(_) => None,
        }
    }

    /// Children of a group; empty for a leaf.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        match self {
            Self::Group(group) => &group.children,
            Self::Leaf(_) => &[],
        }
    }

    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        match self {
            Self::Group(group) => group.disabled,
            Self::Leaf(leaf) => leaf.disabled,
        }
    }

    pub(crate) fn set_disabled(&mut self, disabled: bool) {
        match self {
            Self::Group(group) => group.disabled = disabled,
            Self::Leaf(leaf) => leaf.disabled = disabled,
        }
    }
}

/// Arena slot: a node plus its parent link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeRecord {
    pub(crate) parent: Option<NodeId>,
    pub(crate) node: Node,
}

impl NodeRecord {
    pub(crate) fn new(parent: Option<NodeId>, node: Node) -> Self {
        Self { parent, node }
    }

    /// Parent group, `None` only for the root.
    #[must_use]
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    #[must_use]
    pub const fn node(&self) -> &Node {
        &self.node
    }
}
