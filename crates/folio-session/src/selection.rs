#![forbid(unsafe_code)]

//! Node selection with a range anchor.
//!
//! Membership is a set; order only matters when a selection is consumed, and
//! then it is always tree order.

use std::collections::BTreeSet;

use folio_core::{NodeId, TreeStore};

/// Selected node ids plus the anchor used for range selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: BTreeSet<NodeId>,
    anchor: Option<NodeId>,
}

impl Selection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `id`. Without `additive` the previous selection is replaced;
    /// with it, `id` is toggled. Either way `id` becomes the range anchor.
    pub fn select(&mut self, id: NodeId, additive: bool) {
        if additive {
            if !self.ids.remove(&id) {
                self.ids.insert(id);
            }
        } else {
            self.ids.clear();
            self.ids.insert(id);
        }
        self.anchor = Some(id);
    }

    /// Select everything between the anchor and `id` in `order`, inclusive.
    ///
    /// Falls back to a plain select when there is no anchor or either end is
    /// missing from `order`. The anchor is kept so repeated range clicks pivot
    /// around the same item.
    pub fn select_range(&mut self, id: NodeId, order: &[NodeId]) {
        let Some(anchor) = self.anchor else {
            self.select(id, false);
            return;
        };
        let from = order.iter().position(|candidate| *candidate == anchor);
        let to = order.iter().position(|candidate| *candidate == id);
        let (Some(from), Some(to)) = (from, to) else {
            self.select(id, false);
            return;
        };
        let (lo, hi) = if from <= to { (from, to) } else { (to, from) };
        self.ids = order[lo..=hi].iter().copied().collect();
    }

    /// Select `start` and every node below it.
    pub fn select_all(&mut self, tree: &TreeStore, start: NodeId) {
        self.ids = tree.preorder_from(start).map(|visit| visit.id).collect();
        self.anchor = Some(start);
    }

    pub fn clear(&mut self) {
        self.ids.clear();
        self.anchor = None;
    }

    /// Drop ids that no longer exist in `tree`.
    pub fn prune(&mut self, tree: &TreeStore) {
        self.ids.retain(|id| tree.contains(*id));
        if self.anchor.is_some_and(|anchor| !tree.contains(anchor)) {
            self.anchor = None;
        }
    }

    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.ids.contains(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    #[must_use]
    pub const fn anchor(&self) -> Option<NodeId> {
        self.anchor
    }

    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.ids.iter().copied()
    }

    /// Selected ids in tree order.
    #[must_use]
    pub fn in_tree_order(&self, tree: &TreeStore) -> Vec<NodeId> {
        tree.preorder()
            .map(|visit| visit.id)
            .filter(|id| self.ids.contains(id))
            .collect()
    }

    /// Selected leaf ids in tree order.
    #[must_use]
    pub fn leaves_in_tree_order(&self, tree: &TreeStore) -> Vec<NodeId> {
        tree.leaves()
            .map(|leaf| leaf.id)
            .filter(|id| self.ids.contains(id))
            .collect()
    }
}
