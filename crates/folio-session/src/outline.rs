#![forbid(unsafe_code)]

//! Structure-panel outline: indented rows for groups and leaves.
//!
//! Children of collapsed groups are omitted; the collapsed group itself is
//! still listed.

use folio_core::{NodeId, NodeKind, TreeStore};

use crate::selection::Selection;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineRow {
    pub node: NodeId,
    /// Root is depth 0.
    pub depth: usize,
    pub label: String,
    pub kind: NodeKind,
    /// Always `false` for leaves.
    pub expanded: bool,
    pub selected: bool,
    /// Cut, directly or through an ancestor.
    pub disabled: bool,
}

#[must_use]
pub fn outline(tree: &TreeStore, selection: &Selection) -> Vec<OutlineRow> {
    let mut rows = Vec::new();
    let mut disabled: Vec<bool> = Vec::new();
    for visit in tree.preorder().visible_only() {
        disabled.truncate(visit.depth);
        let here = disabled.last().copied().unwrap_or(false) || visit.node.is_disabled();
        disabled.push(here);
        rows.push(OutlineRow {
            node: visit.id,
            depth: visit.depth,
            label: visit.node.label().to_string(),
            kind: visit.node.kind(),
            expanded: visit.node.as_group().is_some_and(|group| group.expanded),
            selected: selection.contains(visit.id),
            disabled: here,
        });
    }
    rows
}
