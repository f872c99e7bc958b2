#![forbid(unsafe_code)]

//! Structure operation errors.
//!
//! Every variant is raised before the tree is touched: operations run on a
//! working copy and only a fully validated copy replaces the live tree.

use std::fmt;

use crate::id::{NodeId, ResourceRef};

/// A request that is malformed for the current tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    UnknownNode { node: NodeId },
    /// The root may not be deleted, moved, cut, or used as a sibling anchor.
    RootImmutable { node: NodeId },
    NotAGroup { node: NodeId },
    NotALeaf { node: NodeId },
    /// Leaf labels only change through label application.
    LeafLabelReadOnly { node: NodeId },
    DuplicateResource { resource: ResourceRef },
    UnknownResource { resource: ResourceRef },
    EmptySelection,
    ClipboardEmpty,
    /// Nodes are not one contiguous run under a single parent.
    NotContiguous,
    IndexOutOfBounds { index: usize, len: usize },
    LabelCountMismatch { nodes: usize, labels: usize },
}

/// A relocation that would break the tree shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidMove {
    /// The target is a moved node or lies inside a moved subtree.
    Cycle { moved: NodeId, target: NodeId },
    /// Leaves cannot have children.
    TargetIsLeaf { target: NodeId },
}

/// Broken internal invariant detected by [`TreeStore::validate`](crate::TreeStore::validate).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    ZeroNodeId,
    IdOverflow { current: NodeId },
    MissingRoot { root: NodeId },
    RootNotGroup { root: NodeId },
    RootHasParent { root: NodeId, parent: NodeId },
    MissingChild { parent: NodeId, child: NodeId },
    ParentMismatch {
        node: NodeId,
        expected: Option<NodeId>,
        actual: Option<NodeId>,
    },
    MultipleParents { node: NodeId },
    Unreachable { node: NodeId },
    DuplicateResource { resource: ResourceRef },
    ResourceIndexMismatch { resource: ResourceRef },
    NextIdNotGreater { next: NodeId, max_existing: NodeId },
}

/// Any rejected structure operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructureError {
    Validation(ValidationError),
    InvalidMove(InvalidMove),
    Invariant(InvariantViolation),
}

impl StructureError {
    /// Error family label for logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::InvalidMove(_) => "invalid_move",
            Self::Invariant(_) => "invariant",
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownNode { node } => write!(f, "node {node} not found"),
            Self::RootImmutable { node } => {
                write!(f, "root node {node} cannot be removed, moved, or cut")
            }
            Self::NotAGroup { node } => write!(f, "node {node} is not a group"),
            Self::NotALeaf { node } => write!(f, "node {node} is not a leaf"),
            Self::LeafLabelReadOnly { node } => write!(
                f,
                "leaf {node} label is generated; apply a label scheme instead"
            ),
            Self::DuplicateResource { resource } => {
                write!(f, "resource '{resource}' is placed more than once")
            }
            Self::UnknownResource { resource } => {
                write!(f, "resource '{resource}' is not a member")
            }
            Self::EmptySelection => write!(f, "no nodes selected"),
            Self::ClipboardEmpty => write!(f, "clipboard is empty"),
            Self::NotContiguous => write!(f, "nodes are not a contiguous sibling run"),
            Self::IndexOutOfBounds { index, len } => {
                write!(f, "index {index} out of bounds (length {len})")
            }
            Self::LabelCountMismatch { nodes, labels } => {
                write!(f, "{labels} labels supplied for {nodes} leaves")
            }
        }
    }
}

impl fmt::Display for InvalidMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cycle { moved, target } => {
                write!(f, "cannot move {moved} into its own subtree at {target}")
            }
            Self::TargetIsLeaf { target } => {
                write!(f, "target {target} is a leaf and cannot hold children")
            }
        }
    }
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroNodeId => write!(f, "node id 0 is invalid"),
            Self::IdOverflow { current } => write!(f, "node id overflow after {current}"),
            Self::MissingRoot { root } => write!(f, "root {root} missing"),
            Self::RootNotGroup { root } => write!(f, "root {root} is not a group"),
            Self::RootHasParent { root, parent } => {
                write!(f, "root {root} has parent {parent}")
            }
            Self::MissingChild { parent, child } => {
                write!(f, "group {parent} references missing child {child}")
            }
            Self::ParentMismatch {
                node,
                expected,
                actual,
            } => write!(
                f,
                "node {node} parent mismatch: expected {expected:?}, found {actual:?}"
            ),
            Self::MultipleParents { node } => write!(f, "node {node} has several parents"),
            Self::Unreachable { node } => write!(f, "node {node} unreachable from root"),
            Self::DuplicateResource { resource } => {
                write!(f, "resource '{resource}' appears more than once")
            }
            Self::ResourceIndexMismatch { resource } => {
                write!(f, "resource index out of sync for '{resource}'")
            }
            Self::NextIdNotGreater { next, max_existing } => {
                write!(f, "next id {next} not greater than {max_existing}")
            }
        }
    }
}

impl fmt::Display for StructureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::InvalidMove(err) => write!(f, "invalid move: {err}"),
            Self::Invariant(err) => write!(f, "invariant violated: {err}"),
        }
    }
}

impl std::error::Error for ValidationError {}
impl std::error::Error for InvalidMove {}
impl std::error::Error for InvariantViolation {}

impl std::error::Error for StructureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::InvalidMove(err) => Some(err),
            Self::Invariant(err) => Some(err),
        }
    }
}

impl From<ValidationError> for StructureError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err)
    }
}

impl From<InvalidMove> for StructureError {
    fn from(err: InvalidMove) -> Self {
        Self::InvalidMove(err)
    }
}

impl From<InvariantViolation> for StructureError {
    fn from(err: InvariantViolation) -> Self {
        Self::Invariant(err)
    }
}
