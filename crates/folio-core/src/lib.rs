#![forbid(unsafe_code)]

//! Core: the structure tree, node model, and tree invariants.
//!
//! # Role in Folio
//! `folio-core` is the bottom layer. It owns the ordered hierarchy of groups
//! (ranges, chapters) and leaves (references to page-like resources) and the
//! rules that keep it well formed. Every other crate reads or edits the tree
//! only through [`TreeStore`].
//!
//! # Primary responsibilities
//! - **TreeStore**: arena of [`NodeRecord`]s with atomic, validated mutations.
//! - **Node**: closed [`Node`] sum type over [`GroupNode`] and [`LeafNode`].
//! - **Seeds**: session-start input ([`LeafSeed`], [`GroupSeed`]).
//! - **Errors**: [`ValidationError`], [`InvalidMove`], [`InvariantViolation`].

pub mod error;
pub mod fingerprint;
pub mod id;
pub mod node;
pub mod seed;
pub mod traverse;
pub mod tree;

pub use error::{InvalidMove, InvariantViolation, StructureError, ValidationError};
pub use fingerprint::Fingerprint;
pub use id::{NodeId, NodeIdAllocator, ResourceRef};
pub use node::{GroupNode, LeafNode, Node, NodeKind, NodeRecord};
pub use seed::{GroupSeed, LeafSeed, SeedEntry};
pub use traverse::{Leaves, Preorder, Visit};
pub use tree::{DEFAULT_ROOT_LABEL, TreeStore, UNTITLED_GROUP_LABEL};
