#![forbid(unsafe_code)]

//! Canonical in-memory structure tree.
//!
//! [`TreeStore`] owns every group and leaf in an arena keyed by [`NodeId`].
//! Each record carries its parent link; each group carries its ordered child
//! list.
//!
//! # Invariants
//!
//! 1. Exactly one root, which is a group and has no parent.
//! 2. Every non-root node is reachable from the root and appears in exactly
//!    one parent's child list, and its parent link names that parent.
//! 3. Each [`ResourceRef`] is placed at most once.
//! 4. The id allocator is ahead of every existing id.
//!
//! # Failure semantics
//!
//! Mutations run on a cloned working tree, which is validated and swapped in
//! only on success. A rejected operation leaves `self` untouched.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{InvalidMove, InvariantViolation, StructureError, ValidationError};
use crate::fingerprint::Fingerprint;
use crate::id::{NodeId, NodeIdAllocator, ResourceRef};
use crate::node::{GroupNode, LeafNode, Node, NodeRecord};
use crate::seed::{GroupSeed, LeafSeed, SeedEntry};
use crate::traverse::{Leaves, Preorder};

/// Root label used by [`TreeStore::load`].
pub const DEFAULT_ROOT_LABEL: &str = "Structure";

/// Base label for newly created groups.
pub const UNTITLED_GROUP_LABEL: &str = "Untitled";

/// Direction for sibling-run swaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shift {
    Up,
    Down,
}

/// Arena-backed tree of groups and leaves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeStore {
    root: NodeId,
    ids: NodeIdAllocator,
    nodes: BTreeMap<NodeId, NodeRecord>,
    resources: BTreeMap<ResourceRef, NodeId>,
}

impl TreeStore {
    /// Empty tree containing only a root group.
    pub fn new(root_label: impl Into<String>) -> Result<Self, StructureError> {
        let mut ids = NodeIdAllocator::default();
        let root = ids.allocate()?;
        let mut nodes = BTreeMap::new();
        nodes.insert(
            root,
            NodeRecord::new(None, Node::Group(GroupNode::new(root, root_label))),
        );
        Ok(Self {
            root,
            ids,
            nodes,
            resources: BTreeMap::new(),
        })
    }

    /// Build the session tree from the member list and optional grouping.
    ///
    /// Seeded groups are placed first under the root, in seed order; members
    /// not referenced by any seed group follow in member order.
    pub fn load(leaves: Vec<LeafSeed>, groups: Option<Vec<GroupSeed>>) -> Result<Self, StructureError> {
        Self::load_titled(DEFAULT_ROOT_LABEL, leaves, groups)
    }

    /// [`load`](Self::load) with an explicit root label.
    pub fn load_titled(
        root_label: impl Into<String>,
        leaves: Vec<LeafSeed>,
        groups: Option<Vec<GroupSeed>>,
    ) -> Result<Self, StructureError> {
        let mut catalog: BTreeMap<ResourceRef, String> = BTreeMap::new();
        let mut member_order = Vec::with_capacity(leaves.len());
        for seed in leaves {
            if catalog.contains_key(&seed.resource) {
                return Err(ValidationError::DuplicateResource {
                    resource: seed.resource,
                }
                .into());
            }
            member_order.push(seed.resource.clone());
            catalog.insert(seed.resource, seed.label);
        }

        let mut tree = Self::new(root_label)?;
        let root = tree.root;

        let top: Vec<SeedEntry> = groups
            .unwrap_or_default()
            .into_iter()
            .map(SeedEntry::Group)
            .collect();
        let mut stack = vec![(root, top.into_iter())];
        while let Some((parent, mut entries)) = stack.pop() {
            let Some(entry) = entries.next() else {
                continue;
            };
            stack.push((parent, entries));
            match entry {
                SeedEntry::Leaf { proxy } => {
                    if tree.resources.contains_key(&proxy) {
                        return Err(ValidationError::DuplicateResource { resource: proxy }.into());
                    }
                    let Some(label) = catalog.get(&proxy) else {
                        return Err(ValidationError::UnknownResource { resource: proxy }.into());
                    };
                    let label = label.clone();
                    tree.push_leaf(parent, proxy, label)?;
                }
                SeedEntry::Group(group) => {
                    let id = tree.push_group(parent, group.label)?;
                    stack.push((id, group.children.into_iter()));
                }
            }
        }

        for resource in member_order {
            if tree.resources.contains_key(&resource) {
                continue;
            }
            let label = catalog.remove(&resource).unwrap_or_default();
            tree.push_leaf(root, resource, label)?;
        }

        tree.validate()?;
        tracing::debug!(
            target: "folio.tree",
            nodes = tree.len(),
            leaves = tree.leaf_count(),
            "structure loaded"
        );
        Ok(tree)
    }

    // ====================================================================
    // Read API
    // ====================================================================

    #[must_use]
    pub const fn root(&self) -> NodeId {
        self.root
    }

    /// Total node count, root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a tree has at least its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub fn leaf_count(&self) -> usize {
        self.resources.len()
    }

    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id).map(NodeRecord::node)
    }

    #[must_use]
    pub fn record(&self, id: NodeId) -> Option<&NodeRecord> {
        self.nodes.get(&id)
    }

    #[must_use]
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(&id).and_then(NodeRecord::parent)
    }

    /// Children of a group; empty for leaves and unknown ids.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map_or(&[], Node::children)
    }

    /// Position of a node inside its parent's child list.
    #[must_use]
    pub fn index_of(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent_of(id)?;
        self.children(parent).iter().position(|child| *child == id)
    }

    /// Leaf currently holding `resource`.
    #[must_use]
    pub fn leaf_for_resource(&self, resource: &ResourceRef) -> Option<NodeId> {
        self.resources.get(resource).copied()
    }

    /// Strict ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent_of(id), move |current| self.parent_of(*current))
    }

    /// Whether `ancestor` lies strictly above `id`.
    #[must_use]
    pub fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        self.ancestors(id).any(|candidate| candidate == ancestor)
    }

    /// Pre-order walk of the whole tree.
    #[must_use]
    pub fn preorder(&self) -> Preorder<'_> {
        Preorder::new(self, self.root)
    }

    /// Pre-order walk of one subtree, `start` included.
    #[must_use]
    pub fn preorder_from(&self, start: NodeId) -> Preorder<'_> {
        Preorder::new(self, start)
    }

    /// Leaves in tree order.
    #[must_use]
    pub fn leaves(&self) -> Leaves<'_> {
        Leaves::new(self.preorder())
    }

    /// Leaf ids in tree order.
    #[must_use]
    pub fn leaves_in_order(&self) -> Vec<NodeId> {
        self.leaves().map(|leaf| leaf.id).collect()
    }

    /// Position of every node in the whole-tree pre-order.
    #[must_use]
    pub fn tree_order_index(&self) -> BTreeMap<NodeId, usize> {
        self.preorder()
            .enumerate()
            .map(|(position, visit)| (visit.id, position))
            .collect()
    }

    /// Copy of the tree with transient cut markers cleared, suitable for
    /// history snapshots.
    #[must_use]
    pub fn to_snapshot(&self) -> Self {
        let mut snapshot = self.clone();
        snapshot.clear_disabled();
        snapshot
    }

    /// Sort ids into tree order; unknown ids sort last.
    pub fn sort_tree_order(&self, ids: &mut [NodeId]) {
        let order = self.tree_order_index();
        ids.sort_by_key(|id| order.get(id).copied().unwrap_or(usize::MAX));
    }

    // ====================================================================
    // Structural mutations
    // ====================================================================

    /// Insert a new empty group as the first child of `parent`.
    pub fn create_group(&mut self, parent: NodeId) -> Result<NodeId, StructureError> {
        self.create_group_at(parent, 0)
    }

    /// Insert a new empty, uniquely labelled group at `index` under `parent`.
    pub fn create_group_at(&mut self, parent: NodeId, index: usize) -> Result<NodeId, StructureError> {
        self.transact("create_group", |tree| {
            let len = tree.group(parent)?.children.len();
            if index > len {
                return Err(ValidationError::IndexOutOfBounds { index, len }.into());
            }
            let label = tree.unique_group_label();
            let id = tree.ids.allocate()?;
            tree.nodes.insert(
                id,
                NodeRecord::new(Some(parent), Node::Group(GroupNode::new(id, label))),
            );
            tree.group_mut(parent)?.children.insert(index, id);
            Ok(id)
        })
    }

    /// Remove a group and everything below it. Returns the removed ids in
    /// pre-order.
    pub fn delete_group(&mut self, id: NodeId) -> Result<Vec<NodeId>, StructureError> {
        self.transact("delete_group", |tree| {
            if id == tree.root {
                return Err(ValidationError::RootImmutable { node: id }.into());
            }
            tree.group(id)?;
            let removed: Vec<NodeId> = tree.preorder_from(id).map(|visit| visit.id).collect();
            tree.detach(id)?;
            for node_id in &removed {
                if let Some(record) = tree.nodes.remove(node_id) {
                    match record.node {
                        Node::Leaf(leaf) => {
                            tree.resources.remove(&leaf.resource);
                        }
                        Node::Group(_) => {}
                    }
                }
            }
            Ok(removed)
        })
    }

    /// Relocate nodes under `target_parent` at `target_index`.
    ///
    /// `target_index` addresses the target's child list as it is before the
    /// move. Moved nodes keep their relative tree order; a node nested under
    /// another moved node travels with its ancestor.
    pub fn move_nodes(
        &mut self,
        ids: &[NodeId],
        target_parent: NodeId,
        target_index: usize,
    ) -> Result<(), StructureError> {
        self.transact("move_nodes", |tree| {
            let moving = tree.selection_roots(ids)?;
            let children = match tree.node(target_parent) {
                None => {
                    return Err(ValidationError::UnknownNode {
                        node: target_parent,
                    }
                    .into());
                }
                Some(Node::Leaf(_)) => {
                    return Err(InvalidMove::TargetIsLeaf {
                        target: target_parent,
                    }
                    .into());
                }
                Some(Node::Group(group)) => &group.children,
            };
            if target_index > children.len() {
                return Err(ValidationError::IndexOutOfBounds {
                    index: target_index,
                    len: children.len(),
                }
                .into());
            }
            for moved in &moving {
                if *moved == target_parent || tree.is_ancestor(*moved, target_parent) {
                    return Err(InvalidMove::Cycle {
                        moved: *moved,
                        target: target_parent,
                    }
                    .into());
                }
            }
            let moving_set: BTreeSet<NodeId> = moving.iter().copied().collect();
            let shift = children[..target_index]
                .iter()
                .filter(|child| moving_set.contains(child))
                .count();
            let insert_at = target_index - shift;

            for moved in &moving {
                tree.detach(*moved)?;
            }
            tree.attach_all(target_parent, insert_at, &moving)?;
            Ok(())
        })
    }

    /// Swap a contiguous sibling run with its previous sibling.
    ///
    /// Returns `false` without changing anything when the run is already
    /// first.
    pub fn move_up(&mut self, ids: &[NodeId]) -> Result<bool, StructureError> {
        self.shift_run(ids, Shift::Up)
    }

    /// Swap a contiguous sibling run with its next sibling.
    ///
    /// Returns `false` without changing anything when the run is already
    /// last.
    pub fn move_down(&mut self, ids: &[NodeId]) -> Result<bool, StructureError> {
        self.shift_run(ids, Shift::Down)
    }

    /// Rename a group. Leaf labels are not editable here.
    pub fn rename_group(&mut self, id: NodeId, label: impl Into<String>) -> Result<(), StructureError> {
        let label = label.into();
        match self.node(id) {
            None => Err(ValidationError::UnknownNode { node: id }.into()),
            Some(Node::Leaf(_)) => Err(ValidationError::LeafLabelReadOnly { node: id }.into()),
            Some(Node::Group(_)) => {
                self.group_mut(id)?.label = label;
                tracing::debug!(target: "folio.tree", node = %id, "group renamed");
                Ok(())
            }
        }
    }

    /// Write generated labels onto leaves, pairwise.
    pub fn apply_labels(&mut self, leaf_ids: &[NodeId], labels: &[String]) -> Result<(), StructureError> {
        if leaf_ids.len() != labels.len() {
            return Err(ValidationError::LabelCountMismatch {
                nodes: leaf_ids.len(),
                labels: labels.len(),
            }
            .into());
        }
        for id in leaf_ids {
            match self.node(*id) {
                None => return Err(ValidationError::UnknownNode { node: *id }.into()),
                Some(Node::Group(_)) => return Err(ValidationError::NotALeaf { node: *id }.into()),
                Some(Node::Leaf(_)) => {}
            }
        }
        for (id, label) in leaf_ids.iter().zip(labels) {
            if let Some(record) = self.nodes.get_mut(id) {
                match &mut record.node {
                    Node::Leaf(leaf) => leaf.label.clone_from(label),
                    Node::Group(_) => {}
                }
            }
        }
        tracing::debug!(target: "folio.tree", leaves = leaf_ids.len(), "labels applied");
        Ok(())
    }

    // ====================================================================
    // UI-only and clipboard state
    // ====================================================================

    pub fn expand(&mut self, id: NodeId) -> Result<(), StructureError> {
        self.group_mut(id)?.expanded = true;
        Ok(())
    }

    pub fn collapse(&mut self, id: NodeId) -> Result<(), StructureError> {
        self.group_mut(id)?.expanded = false;
        Ok(())
    }

    /// Flip disclosure state; returns the new `expanded` value.
    pub fn toggle_expanded(&mut self, id: NodeId) -> Result<bool, StructureError> {
        let group = self.group_mut(id)?;
        group.expanded = !group.expanded;
        Ok(group.expanded)
    }

    /// Set or clear the cut marker on each node. All ids must exist.
    pub fn set_disabled(&mut self, ids: &[NodeId], disabled: bool) -> Result<(), StructureError> {
        if let Some(missing) = ids.iter().find(|id| !self.contains(**id)) {
            return Err(ValidationError::UnknownNode { node: *missing }.into());
        }
        for id in ids {
            if let Some(record) = self.nodes.get_mut(id) {
                record.node.set_disabled(disabled);
            }
        }
        Ok(())
    }

    /// Clear every cut marker in the tree.
    pub fn clear_disabled(&mut self) {
        for record in self.nodes.values_mut() {
            record.node.set_disabled(false);
        }
    }

    // ====================================================================
    // Validation and hashing
    // ====================================================================

    /// Check every structural invariant.
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        let root = self.root;
        let Some(root_record) = self.nodes.get(&root) else {
            return Err(InvariantViolation::MissingRoot { root });
        };
        if let Some(parent) = root_record.parent {
            return Err(InvariantViolation::RootHasParent { root, parent });
        }
        if !root_record.node.is_group() {
            return Err(InvariantViolation::RootNotGroup { root });
        }

        let mut visited = BTreeSet::from([root]);
        let mut seen_resources = BTreeSet::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let Some(record) = self.nodes.get(&id) else {
                continue;
            };
            match &record.node {
                Node::Group(group) => {
                    for child in &group.children {
                        let Some(child_record) = self.nodes.get(child) else {
                            return Err(InvariantViolation::MissingChild {
                                parent: id,
                                child: *child,
                            });
                        };
                        if child_record.parent != Some(id) {
                            return Err(InvariantViolation::ParentMismatch {
                                node: *child,
                                expected: Some(id),
                                actual: child_record.parent,
                            });
                        }
                        if !visited.insert(*child) {
                            return Err(InvariantViolation::MultipleParents { node: *child });
                        }
                        stack.push(*child);
                    }
                }
                Node::Leaf(leaf) => {
                    if !seen_resources.insert(&leaf.resource) {
                        return Err(InvariantViolation::DuplicateResource {
                            resource: leaf.resource.clone(),
                        });
                    }
                    if self.resources.get(&leaf.resource) != Some(&id) {
                        return Err(InvariantViolation::ResourceIndexMismatch {
                            resource: leaf.resource.clone(),
                        });
                    }
                }
            }
        }

        if let Some(orphan) = self.nodes.keys().find(|id| !visited.contains(id)) {
            return Err(InvariantViolation::Unreachable { node: *orphan });
        }
        if seen_resources.len() != self.resources.len() {
            if let Some(stale) = self
                .resources
                .keys()
                .find(|resource| !seen_resources.contains(resource))
            {
                return Err(InvariantViolation::ResourceIndexMismatch {
                    resource: stale.clone(),
                });
            }
        }
        if let Some(max_existing) = self.nodes.keys().next_back() {
            if self.ids.peek() <= *max_existing {
                return Err(InvariantViolation::NextIdNotGreater {
                    next: self.ids.peek(),
                    max_existing: *max_existing,
                });
            }
        }
        Ok(())
    }

    /// Deterministic hash of structure and labels.
    ///
    /// Disclosure, cut markers and node ids are excluded, so the hash changes
    /// only when something that would be saved changes. Pre-order position,
    /// depth and child counts pin down the shape.
    #[must_use]
    pub fn state_hash(&self) -> u64 {
        let mut hash = Fingerprint::new();
        for visit in self.preorder() {
            hash.write_u64(visit.depth as u64);
            match visit.node {
                Node::Group(group) => {
                    hash.write_tag(0);
                    hash.write_str(&group.label);
                    hash.write_u64(group.children.len() as u64);
                }
                Node::Leaf(leaf) => {
                    hash.write_tag(1);
                    hash.write_str(&leaf.label);
                    hash.write_str(leaf.resource.as_str());
                }
            }
        }
        hash.finish()
    }

    // ====================================================================
    // Internals
    // ====================================================================

    fn transact<R>(
        &mut self,
        operation: &'static str,
        apply: impl FnOnce(&mut Self) -> Result<R, StructureError>,
    ) -> Result<R, StructureError> {
        let mut working = self.clone();
        let result = apply(&mut working).and_then(|value| {
            working.validate()?;
            Ok(value)
        });
        match result {
            Ok(value) => {
                *self = working;
                tracing::debug!(target: "folio.tree", operation, "structure operation applied");
                Ok(value)
            }
            Err(err) => {
                tracing::debug!(
                    target: "folio.tree",
                    operation,
                    error_kind = err.kind(),
                    error = %err,
                    "structure operation rejected"
                );
                Err(err)
            }
        }
    }

    fn group(&self, id: NodeId) -> Result<&GroupNode, StructureError> {
        match self.node(id) {
            None => Err(ValidationError::UnknownNode { node: id }.into()),
            Some(Node::Leaf(_)) => Err(ValidationError::NotAGroup { node: id }.into()),
            Some(Node::Group(group)) => Ok(group),
        }
    }

    fn group_mut(&mut self, id: NodeId) -> Result<&mut GroupNode, StructureError> {
        match self.nodes.get_mut(&id).map(|record| &mut record.node) {
            None => Err(ValidationError::UnknownNode { node: id }.into()),
            Some(Node::Leaf(_)) => Err(ValidationError::NotAGroup { node: id }.into()),
            Some(Node::Group(group)) => Ok(group),
        }
    }

    fn push_group(&mut self, parent: NodeId, label: String) -> Result<NodeId, StructureError> {
        let id = self.ids.allocate()?;
        self.nodes.insert(
            id,
            NodeRecord::new(Some(parent), Node::Group(GroupNode::new(id, label))),
        );
        self.group_mut(parent)?.children.push(id);
        Ok(id)
    }

    fn push_leaf(&mut self, parent: NodeId, resource: ResourceRef, label: String) -> Result<NodeId, StructureError> {
        let id = self.ids.allocate()?;
        self.resources.insert(resource.clone(), id);
        self.nodes.insert(
            id,
            NodeRecord::new(Some(parent), Node::Leaf(LeafNode::new(id, resource, label))),
        );
        self.group_mut(parent)?.children.push(id);
        Ok(id)
    }

    /// Unlink a node from its parent's child list. Returns its old index.
    fn detach(&mut self, id: NodeId) -> Result<usize, StructureError> {
        let Some(parent) = self.parent_of(id) else {
            return Err(ValidationError::RootImmutable { node: id }.into());
        };
        let children = &mut self.group_mut(parent)?.children;
        let Some(index) = children.iter().position(|child| *child == id) else {
            return Err(InvariantViolation::MissingChild { parent, child: id }.into());
        };
        children.remove(index);
        if let Some(record) = self.nodes.get_mut(&id) {
            record.parent = None;
        }
        Ok(index)
    }

    fn attach_all(&mut self, parent: NodeId, index: usize, ids: &[NodeId]) -> Result<(), StructureError> {
        let children = &mut self.group_mut(parent)?.children;
        let at = index.min(children.len());
        children.splice(at..at, ids.iter().copied());
        for id in ids {
            if let Some(record) = self.nodes.get_mut(id) {
                record.parent = Some(parent);
            }
        }
        Ok(())
    }

    /// Normalize a multi-node request: validate, drop ids nested under other
    /// requested ids, and sort into tree order.
    pub(crate) fn selection_roots(&self, ids: &[NodeId]) -> Result<Vec<NodeId>, StructureError> {
        if ids.is_empty() {
            return Err(ValidationError::EmptySelection.into());
        }
        let requested: BTreeSet<NodeId> = ids.iter().copied().collect();
        for id in &requested {
            if !self.contains(*id) {
                return Err(ValidationError::UnknownNode { node: *id }.into());
            }
            if *id == self.root {
                return Err(ValidationError::RootImmutable { node: *id }.into());
            }
        }
        let mut roots: Vec<NodeId> = requested
            .iter()
            .copied()
            .filter(|id| !self.ancestors(*id).any(|a| requested.contains(&a)))
            .collect();
        self.sort_tree_order(&mut roots);
        Ok(roots)
    }

    /// Validate that `ids` form one contiguous run of siblings and return
    /// `(parent, start, len)`.
    fn sibling_run(&self, ids: &[NodeId]) -> Result<(NodeId, usize, usize), StructureError> {
        if ids.is_empty() {
            return Err(ValidationError::EmptySelection.into());
        }
        let requested: BTreeSet<NodeId> = ids.iter().copied().collect();
        let mut parent = None;
        for id in &requested {
            if !self.contains(*id) {
                return Err(ValidationError::UnknownNode { node: *id }.into());
            }
            let Some(this_parent) = self.parent_of(*id) else {
                return Err(ValidationError::RootImmutable { node: *id }.into());
            };
            match parent {
                None => parent = Some(this_parent),
                Some(existing) if existing != this_parent => {
                    return Err(ValidationError::NotContiguous.into());
                }
                Some(_) => {}
            }
        }
        let Some(parent) = parent else {
            return Err(ValidationError::EmptySelection.into());
        };
        let children = self.children(parent);
        let mut positions: Vec<usize> = children
            .iter()
            .enumerate()
            .filter(|(_, child)| requested.contains(child))
            .map(|(position, _)| position)
            .collect();
        positions.sort_unstable();
        let start = positions[0];
        let len = positions.len();
        if positions[len - 1] - start + 1 != len {
            return Err(ValidationError::NotContiguous.into());
        }
        Ok((parent, start, len))
    }

    fn shift_run(&mut self, ids: &[NodeId], shift: Shift) -> Result<bool, StructureError> {
        let operation = match shift {
            Shift::Up => "move_up",
            Shift::Down => "move_down",
        };
        self.transact(operation, |tree| {
            let (parent, start, len) = tree.sibling_run(ids)?;
            let children = &mut tree.group_mut(parent)?.children;
            match shift {
                Shift::Up => {
                    if start == 0 {
                        return Ok(false);
                    }
                    children[start - 1..start + len].rotate_left(1);
                }
                Shift::Down => {
                    if start + len >= children.len() {
                        return Ok(false);
                    }
                    children[start..=start + len].rotate_right(1);
                }
            }
            Ok(true)
        })
    }

    fn unique_group_label(&self) -> String {
        let taken: BTreeSet<&str> = self
            .nodes
            .values()
            .filter_map(|record| record.node.as_group())
            .map(|group| group.label.as_str())
            .collect();
        if !taken.contains(UNTITLED_GROUP_LABEL) {
            return UNTITLED_GROUP_LABEL.to_string();
        }
        (2u64..)
            .map(|n| format!("{UNTITLED_GROUP_LABEL} {n}"))
            .find(|candidate| !taken.contains(candidate.as_str()))
            .unwrap_or_else(|| UNTITLED_GROUP_LABEL.to_string())
    }
}
