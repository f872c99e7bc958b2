#![forbid(unsafe_code)]

//! The editing session.
//!
//! [`EditorSession`] threads all per-session state explicitly: the tree, the
//! selection, the clipboard, resource settings, undo history, and the hash of
//! the last committed state. Every edit goes through one wrapper that runs it
//! inside a `folio.command` span, tidies dependent state, and records a
//! history snapshot when the saved state changed.

use folio_core::{
    GroupSeed, LeafSeed, NodeId, ResourceRef, StructureError, TreeStore, ValidationError,
};
use folio_label::{LabelScheme, label_sequence};

use crate::clipboard::{Clipboard, PastePosition};
use crate::command::{CommandOutcome, EditCommand};
use crate::config::SessionConfig;
use crate::error::SessionError;
use crate::history::{History, SessionSnapshot};
use crate::instrument::trace_command;
use crate::selection::Selection;
use crate::settings::{ResourceSettings, ViewingDirection, ViewingHint};

/// Labels generated for the current selection, not yet written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelPreview {
    leaves: Vec<NodeId>,
    labels: Vec<String>,
}

impl LabelPreview {
    #[must_use]
    pub fn leaves(&self) -> &[NodeId] {
        &self.leaves
    }

    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &str)> {
        self.leaves
            .iter()
            .copied()
            .zip(self.labels.iter().map(String::as_str))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }
}

/// One editing session over one structure.
#[derive(Debug)]
pub struct EditorSession {
    tree: TreeStore,
    selection: Selection,
    clipboard: Clipboard,
    settings: ResourceSettings,
    history: History<SessionSnapshot>,
    committed_hash: u64,
    config: SessionConfig,
}

impl EditorSession {
    /// Start a session on an existing tree. The starting state counts as
    /// committed.
    #[must_use]
    pub fn new(tree: TreeStore, settings: ResourceSettings, config: SessionConfig) -> Self {
        let mut tree = tree;
        tree.clear_disabled();
        let mut session = Self {
            tree,
            selection: Selection::new(),
            clipboard: Clipboard::new(),
            settings,
            history: History::new(config.history_depth),
            committed_hash: 0,
            config,
        };
        session.settings.retain_placed(&session.tree);
        session.committed_hash = session.state_hash();
        session.history.push(session.snapshot());
        session
    }

    /// Build the tree from seeds and start a session on it.
    pub fn load(
        leaves: Vec<LeafSeed>,
        groups: Option<Vec<GroupSeed>>,
        settings: ResourceSettings,
        config: SessionConfig,
    ) -> Result<Self, SessionError> {
        let tree = TreeStore::load_titled(config.root_label.clone(), leaves, groups)?;
        Ok(Self::new(tree, settings, config))
    }

    // ====================================================================
    // State access
    // ====================================================================

    #[must_use]
    pub const fn tree(&self) -> &TreeStore {
        &self.tree
    }

    #[must_use]
    pub const fn selection(&self) -> &Selection {
        &self.selection
    }

    #[must_use]
    pub const fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    #[must_use]
    pub const fn settings(&self) -> &ResourceSettings {
        &self.settings
    }

    #[must_use]
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Hash of everything a commit would save: structure, labels, settings.
    #[must_use]
    pub fn state_hash(&self) -> u64 {
        self.settings.state_hash(&self.tree)
    }

    #[must_use]
    pub const fn committed_hash(&self) -> u64 {
        self.committed_hash
    }

    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        self.state_hash() != self.committed_hash
    }

    /// Record that the state with `hash` has been saved.
    pub fn mark_committed(&mut self, hash: u64) {
        self.committed_hash = hash;
        tracing::debug!(
            target: "folio.session",
            committed_hash = hash,
            unsaved = self.has_unsaved_changes(),
            "session marked committed"
        );
    }

    // ====================================================================
    // Selection
    // ====================================================================

    pub fn select(&mut self, id: NodeId, additive: bool) -> Result<(), SessionError> {
        self.require(id)?;
        self.selection.select(id, additive);
        Ok(())
    }

    /// Range-select from the anchor to `id`. Between two leaves the range
    /// follows gallery (leaf) order; otherwise it follows the full tree order.
    pub fn select_range(&mut self, id: NodeId) -> Result<(), SessionError> {
        self.require(id)?;
        let is_leaf = |node: NodeId| self.tree.node(node).is_some_and(|n| n.is_leaf());
        let leaf_range = is_leaf(id) && self.selection.anchor().is_some_and(is_leaf);
        let order: Vec<NodeId> = if leaf_range {
            self.tree.leaves_in_order()
        } else {
            self.tree.preorder().map(|visit| visit.id).collect()
        };
        self.selection.select_range(id, &order);
        Ok(())
    }

    /// Select `start` (default: the root) and everything below it.
    pub fn select_all(&mut self, start: Option<NodeId>) -> Result<(), SessionError> {
        let start = start.unwrap_or(self.tree.root());
        self.require(start)?;
        self.selection.select_all(&self.tree, start);
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    // ====================================================================
    // Clipboard
    // ====================================================================

    /// Cut the current selection.
    pub fn cut(&mut self) -> Result<(), SessionError> {
        let ids = self.selection.in_tree_order(&self.tree);
        self.cut_nodes(&ids)
    }

    pub fn cut_nodes(&mut self, ids: &[NodeId]) -> Result<(), SessionError> {
        self.edit("cut", |s| s.clipboard.cut(&mut s.tree, ids))
    }

    /// Relocate the clipboard contents after or into `target`.
    ///
    /// Returns the pasted ids in tree order. A clipboard that references
    /// deleted nodes is cleared and reported as stale; any other rejection
    /// keeps the clipboard so the paste can be retried elsewhere.
    pub fn paste(&mut self, target: NodeId, position: PastePosition) -> Result<Vec<NodeId>, SessionError> {
        self.edit("paste", |s| {
            if s.clipboard.is_empty() {
                return Err(ValidationError::ClipboardEmpty.into());
            }
            let missing = s.clipboard.missing(&s.tree);
            if !missing.is_empty() {
                s.clipboard.reset(&mut s.tree);
                tracing::warn!(
                    target: "folio.session",
                    missing = missing.len(),
                    "stale clipboard discarded"
                );
                return Err(SessionError::ClipboardStale { missing });
            }
            s.require(target)?;
            let (parent, index) = match position {
                PastePosition::Into => (target, 0),
                PastePosition::After => {
                    let Some(parent) = s.tree.parent_of(target) else {
                        return Err(ValidationError::RootImmutable { node: target }.into());
                    };
                    (parent, s.tree.index_of(target).map_or(0, |index| index + 1))
                }
            };
            let ids = s.clipboard.ids().to_vec();
            s.tree.move_nodes(&ids, parent, index)?;
            s.clipboard.reset(&mut s.tree);
            Ok(ids)
        })
    }

    // ====================================================================
    // Structure
    // ====================================================================

    /// Wrap the selected leaves in a new group placed where the first of
    /// them (in tree order) was.
    pub fn group_selection(&mut self) -> Result<NodeId, SessionError> {
        self.edit("group_selection", |s| {
            let leaves = s.selection.in_tree_order(&s.tree);
            let Some(first) = leaves.first().copied() else {
                return Err(ValidationError::EmptySelection.into());
            };
            if let Some(group) = leaves
                .iter()
                .find(|id| s.tree.node(**id).is_some_and(|node| node.is_group()))
            {
                return Err(ValidationError::NotALeaf { node: *group }.into());
            }
            let (Some(parent), Some(index)) = (s.tree.parent_of(first), s.tree.index_of(first)) else {
                return Err(ValidationError::UnknownNode { node: first }.into());
            };

            let mut working = s.tree.clone();
            let group = working.create_group_at(parent, index)?;
            working.move_nodes(&leaves, group, 0)?;
            s.tree = working;
            s.selection.select(group, false);
            Ok(group)
        })
    }

    /// Insert a new group under `parent` at `index` (default: first).
    pub fn create_group(&mut self, parent: NodeId, index: Option<usize>) -> Result<NodeId, SessionError> {
        self.edit("create_group", |s| {
            Ok(s.tree.create_group_at(parent, index.unwrap_or(0))?)
        })
    }

    pub fn delete_group(&mut self, id: NodeId) -> Result<Vec<NodeId>, SessionError> {
        self.edit("delete_group", |s| Ok(s.tree.delete_group(id)?))
    }

    /// Move `ids` (default: the selection) under `target` at `index`.
    pub fn move_nodes(&mut self, ids: &[NodeId], target: NodeId, index: usize) -> Result<(), SessionError> {
        self.edit("move_nodes", |s| {
            let ids = s.resolve(ids);
            Ok(s.tree.move_nodes(&ids, target, index)?)
        })
    }

    pub fn move_up(&mut self, ids: &[NodeId]) -> Result<bool, SessionError> {
        self.edit("move_up", |s| {
            let ids = s.resolve(ids);
            Ok(s.tree.move_up(&ids)?)
        })
    }

    pub fn move_down(&mut self, ids: &[NodeId]) -> Result<bool, SessionError> {
        self.edit("move_down", |s| {
            let ids = s.resolve(ids);
            Ok(s.tree.move_down(&ids)?)
        })
    }

    pub fn rename_group(&mut self, id: NodeId, label: impl Into<String>) -> Result<(), SessionError> {
        let label = label.into();
        self.edit("rename_group", |s| Ok(s.tree.rename_group(id, label)?))
    }

    pub fn expand(&mut self, id: NodeId) -> Result<(), SessionError> {
        Ok(self.tree.expand(id)?)
    }

    pub fn collapse(&mut self, id: NodeId) -> Result<(), SessionError> {
        Ok(self.tree.collapse(id)?)
    }

    pub fn toggle_expanded(&mut self, id: NodeId) -> Result<bool, SessionError> {
        Ok(self.tree.toggle_expanded(id)?)
    }

    // ====================================================================
    // Labels
    // ====================================================================

    /// Generate labels for the selected leaves in tree order.
    ///
    /// Selected groups are ignored; only directly selected leaves are
    /// labelled.
    pub fn preview_labels(&self, scheme: &LabelScheme) -> Result<LabelPreview, SessionError> {
        let leaves = self.selection.leaves_in_tree_order(&self.tree);
        if leaves.is_empty() {
            return Err(ValidationError::EmptySelection.into());
        }
        let labels = label_sequence(&leaves, scheme);
        Ok(LabelPreview { leaves, labels })
    }

    /// Write a preview onto the tree. Leaves outside the preview keep their
    /// labels.
    pub fn apply_labels(&mut self, preview: &LabelPreview) -> Result<usize, SessionError> {
        self.edit("apply_labels", |s| {
            s.tree.apply_labels(&preview.leaves, &preview.labels)?;
            Ok(preview.len())
        })
    }

    // ====================================================================
    // Resource settings
    // ====================================================================

    pub fn set_viewing_direction(&mut self, direction: ViewingDirection) -> Result<(), SessionError> {
        self.edit("set_viewing_direction", |s| {
            s.settings.viewing_direction = direction;
            Ok(())
        })
    }

    pub fn set_viewing_hint(&mut self, hint: ViewingHint) -> Result<(), SessionError> {
        self.edit("set_viewing_hint", |s| {
            s.settings.viewing_hint = hint;
            Ok(())
        })
    }

    /// Point the viewer start at a leaf, or clear it.
    pub fn set_start_leaf(&mut self, leaf: Option<NodeId>) -> Result<(), SessionError> {
        let resource = self.leaf_resource(leaf)?;
        self.edit("set_start_leaf", |s| {
            s.settings.start_leaf = resource;
            Ok(())
        })
    }

    /// Use a leaf as the resource thumbnail, or clear it.
    pub fn set_thumbnail(&mut self, leaf: Option<NodeId>) -> Result<(), SessionError> {
        let resource = self.leaf_resource(leaf)?;
        self.edit("set_thumbnail", |s| {
            s.settings.thumbnail = resource;
            Ok(())
        })
    }

    // ====================================================================
    // History
    // ====================================================================

    /// Restore the previous snapshot. Clears the clipboard.
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history.undo() else {
            return false;
        };
        self.restore(&snapshot);
        tracing::debug!(target: "folio.session", depth = self.history.undo_depth(), "undo");
        true
    }

    /// Re-apply the last undone snapshot. Clears the clipboard.
    pub fn redo(&mut self) -> bool {
        let Some(snapshot) = self.history.redo() else {
            return false;
        };
        self.restore(&snapshot);
        tracing::debug!(target: "folio.session", depth = self.history.undo_depth(), "redo");
        true
    }

    // ====================================================================
    // Command dispatch
    // ====================================================================

    /// Execute one command.
    pub fn execute(&mut self, command: EditCommand) -> Result<CommandOutcome, SessionError> {
        let changed = |flag: bool| {
            if flag {
                CommandOutcome::Done
            } else {
                CommandOutcome::Unchanged
            }
        };
        match command {
            EditCommand::Select { node, additive } => self.select(node, additive).map(|()| CommandOutcome::Done),
            EditCommand::SelectRange { node } => self.select_range(node).map(|()| CommandOutcome::Done),
            EditCommand::SelectAll { root } => self.select_all(root).map(|()| CommandOutcome::Done),
            EditCommand::ClearSelection => {
                self.clear_selection();
                Ok(CommandOutcome::Done)
            }
            EditCommand::Cut { nodes } => {
                let nodes = self.resolve(&nodes);
                self.cut_nodes(&nodes).map(|()| CommandOutcome::Done)
            }
            EditCommand::Paste { target, position } => self.paste(target, position).map(CommandOutcome::Pasted),
            EditCommand::GroupSelection => self.group_selection().map(CommandOutcome::Created),
            EditCommand::CreateGroup { parent, index } => {
                self.create_group(parent, index).map(CommandOutcome::Created)
            }
            EditCommand::DeleteGroup { node } => self.delete_group(node).map(CommandOutcome::Removed),
            EditCommand::MoveNodes {
                nodes,
                target,
                index,
            } => self.move_nodes(&nodes, target, index).map(|()| CommandOutcome::Done),
            EditCommand::MoveUp { nodes } => self.move_up(&nodes).map(changed),
            EditCommand::MoveDown { nodes } => self.move_down(&nodes).map(changed),
            EditCommand::RenameGroup { node, label } => {
                self.rename_group(node, label).map(|()| CommandOutcome::Done)
            }
            EditCommand::Expand { node } => self.expand(node).map(|()| CommandOutcome::Done),
            EditCommand::Collapse { node } => self.collapse(node).map(|()| CommandOutcome::Done),
            EditCommand::ToggleExpanded { node } => self.toggle_expanded(node).map(|_| CommandOutcome::Done),
            EditCommand::ApplyLabels { scheme } => {
                let preview = self.preview_labels(&scheme)?;
                self.apply_labels(&preview).map(CommandOutcome::Labeled)
            }
            EditCommand::SetViewingDirection { direction } => {
                self.set_viewing_direction(direction).map(|()| CommandOutcome::Done)
            }
            EditCommand::SetViewingHint { hint } => self.set_viewing_hint(hint).map(|()| CommandOutcome::Done),
            EditCommand::SetStartLeaf { node } => self.set_start_leaf(node).map(|()| CommandOutcome::Done),
            EditCommand::SetThumbnail { node } => self.set_thumbnail(node).map(|()| CommandOutcome::Done),
            EditCommand::Undo => Ok(changed(self.undo())),
            EditCommand::Redo => Ok(changed(self.redo())),
        }
    }

    // ====================================================================
    // Internals
    // ====================================================================

    fn edit<T>(
        &mut self,
        command: &'static str,
        apply: impl FnOnce(&mut Self) -> Result<T, SessionError>,
    ) -> Result<T, SessionError> {
        trace_command(command, || {
            let before = self.state_hash();
            let value = apply(self)?;
            self.settle(before);
            Ok(value)
        })
    }

    /// Bring dependent state in line with the tree and record history when
    /// the saved state changed.
    fn settle(&mut self, before: u64) {
        self.settings.retain_placed(&self.tree);
        self.selection.prune(&self.tree);
        if self.state_hash() != before {
            self.history.push(self.snapshot());
        }
    }

    fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            tree: self.tree.to_snapshot(),
            settings: self.settings.clone(),
        }
    }

    fn restore(&mut self, snapshot: &SessionSnapshot) {
        self.tree = snapshot.tree.clone();
        self.settings = snapshot.settings.clone();
        self.clipboard.forget();
        self.selection.prune(&self.tree);
    }

    fn require(&self, id: NodeId) -> Result<(), SessionError> {
        if self.tree.contains(id) {
            Ok(())
        } else {
            Err(ValidationError::UnknownNode { node: id }.into())
        }
    }

    /// Explicit ids, or the selection in tree order when none are given.
    fn resolve(&self, ids: &[NodeId]) -> Vec<NodeId> {
        if ids.is_empty() {
            self.selection.in_tree_order(&self.tree)
        } else {
            ids.to_vec()
        }
    }

    fn leaf_resource(&self, leaf: Option<NodeId>) -> Result<Option<ResourceRef>, SessionError> {
        let Some(id) = leaf else {
            return Ok(None);
        };
        match self.tree.node(id) {
            None => Err(ValidationError::UnknownNode { node: id }.into()),
            Some(node) => match node.as_leaf() {
                Some(leaf) => Ok(Some(leaf.resource.clone())),
                None => Err(SessionError::Structure(StructureError::Validation(
                    ValidationError::NotALeaf { node: id },
                ))),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::ClipboardMode;

    fn session(resources: &[&str]) -> EditorSession {
        let leaves = resources.iter().map(|r| LeafSeed::new(*r, "")).collect();
        EditorSession::load(leaves, None, ResourceSettings::default(), SessionConfig::default()).unwrap()
    }

    fn leaf(session: &EditorSession, r: &str) -> NodeId {
        session.tree().leaf_for_resource(&ResourceRef::from(r)).unwrap()
    }

    fn order(session: &EditorSession) -> Vec<String> {
        session.tree().leaves().map(|l| l.resource.to_string()).collect()
    }

    #[test]
    fn fresh_session_has_no_unsaved_changes() {
        let s = session(&["a", "b"]);
        assert!(!s.has_unsaved_changes());
        assert!(!s.can_undo());
    }

    #[test]
    fn cut_paste_after_moves_and_clears_clipboard() {
        let mut s = session(&["a", "b", "c"]);
        let (a, c) = (leaf(&s, "a"), leaf(&s, "c"));
        s.cut_nodes(&[a]).unwrap();
        assert!(s.tree().node(a).unwrap().is_disabled());
        let pasted = s.paste(c, PastePosition::After).unwrap();
        assert_eq!(pasted, [a]);
        assert_eq!(order(&s), ["b", "c", "a"]);
        assert!(s.clipboard().is_empty());
        assert!(!s.tree().node(a).unwrap().is_disabled());
        assert!(s.has_unsaved_changes());
    }

    #[test]
    fn paste_into_places_first() {
        let mut s = session(&["a", "b"]);
        let root = s.tree().root();
        let g = s.create_group(root, Some(2)).unwrap();
        let (a, b) = (leaf(&s, "a"), leaf(&s, "b"));
        s.select(b, false).unwrap();
        s.select(a, true).unwrap();
        s.cut().unwrap();
        s.paste(g, PastePosition::Into).unwrap();
        assert_eq!(s.tree().children(g), [a, b]);
    }

    #[test]
    fn paste_after_root_is_rejected_and_keeps_clipboard() {
        let mut s = session(&["a", "b"]);
        let a = leaf(&s, "a");
        let root = s.tree().root();
        s.cut_nodes(&[a]).unwrap();
        let err = s.paste(root, PastePosition::After).unwrap_err();
        assert_eq!(err, SessionError::from(ValidationError::RootImmutable { node: root }));
        assert_eq!(s.clipboard().mode(), ClipboardMode::Cut);
        assert!(s.tree().node(a).unwrap().is_disabled());
    }

    #[test]
    fn paste_with_empty_clipboard_is_validation_error() {
        let mut s = session(&["a"]);
        let a = leaf(&s, "a");
        assert_eq!(
            s.paste(a, PastePosition::After),
            Err(SessionError::from(ValidationError::ClipboardEmpty))
        );
    }

    #[test]
    fn group_selection_replaces_first_leaf_position() {
        let mut s = session(&["a", "b", "c", "d"]);
        let (b, d) = (leaf(&s, "b"), leaf(&s, "d"));
        s.select(d, false).unwrap();
        s.select(b, true).unwrap();
        let g = s.group_selection().unwrap();
        let root = s.tree().root();
        assert_eq!(s.tree().children(root), [leaf(&s, "a"), g, leaf(&s, "c")]);
        assert_eq!(s.tree().children(g), [b, d]);
        assert!(s.selection().contains(g));
    }

    #[test]
    fn group_selection_rejects_groups() {
        let mut s = session(&["a"]);
        let root = s.tree().root();
        let g = s.create_group(root, None).unwrap();
        s.select(g, false).unwrap();
        let before = s.tree().clone();
        assert!(s.group_selection().is_err());
        assert_eq!(s.tree(), &before);
    }

    #[test]
    fn labels_apply_only_to_selection() {
        let mut s = session(&["a", "b", "c"]);
        let (a, b, c) = (leaf(&s, "a"), leaf(&s, "b"), leaf(&s, "c"));
        s.select(c, false).unwrap();
        s.select(b, true).unwrap();
        let preview = s.preview_labels(&LabelScheme::foliated(10)).unwrap();
        assert_eq!(preview.leaves(), [b, c]);
        assert_eq!(preview.labels(), ["f. 10r.", "f. 10v."]);
        assert_eq!(s.tree().node(b).unwrap().label(), "");

        s.apply_labels(&preview).unwrap();
        assert_eq!(s.tree().node(b).unwrap().label(), "f. 10r.");
        assert_eq!(s.tree().node(a).unwrap().label(), "");

        s.select(a, false).unwrap();
        let again = s.preview_labels(&LabelScheme::paginated("p. ", 1)).unwrap();
        s.apply_labels(&again).unwrap();
        assert_eq!(s.tree().node(c).unwrap().label(), "f. 10v.");
    }

    #[test]
    fn undo_redo_restore_state_and_clear_clipboard() {
        let mut s = session(&["a", "b"]);
        let initial = s.state_hash();
        let b = leaf(&s, "b");
        s.move_up(&[b]).unwrap();
        let moved = s.state_hash();
        let a = leaf(&s, "a");
        s.cut_nodes(&[a]).unwrap();

        assert!(s.undo());
        assert_eq!(s.state_hash(), initial);
        assert!(s.clipboard().is_empty());
        assert!(!s.tree().node(a).unwrap().is_disabled());
        assert!(!s.has_unsaved_changes());

        assert!(s.redo());
        assert_eq!(s.state_hash(), moved);
        assert!(!s.redo());
    }

    #[test]
    fn boundary_move_records_no_history() {
        let mut s = session(&["a", "b"]);
        let a = leaf(&s, "a");
        assert!(!s.move_up(&[a]).unwrap());
        assert!(!s.can_undo());
    }

    #[test]
    fn deleting_start_leaf_clears_setting() {
        let mut s = session(&["a", "b"]);
        let a = leaf(&s, "a");
        let root = s.tree().root();
        let g = s.create_group(root, None).unwrap();
        s.move_nodes(&[a], g, 0).unwrap();
        s.set_start_leaf(Some(a)).unwrap();
        assert_eq!(s.settings().start_leaf, Some(ResourceRef::from("a")));
        s.delete_group(g).unwrap();
        assert_eq!(s.settings().start_leaf, None);
    }

    #[test]
    fn thumbnail_must_be_leaf() {
        let mut s = session(&["a"]);
        let root = s.tree().root();
        assert!(s.set_thumbnail(Some(root)).is_err());
        assert_eq!(s.settings().thumbnail, None);
    }

    #[test]
    fn mark_committed_clears_unsaved_flag() {
        let mut s = session(&["a", "b"]);
        let b = leaf(&s, "b");
        s.move_up(&[b]).unwrap();
        assert!(s.has_unsaved_changes());
        let hash = s.state_hash();
        s.mark_committed(hash);
        assert!(!s.has_unsaved_changes());
    }

    #[test]
    fn execute_dispatches_commands() {
        let mut s = session(&["a", "b"]);
        let b = leaf(&s, "b");
        s.execute(EditCommand::Select { node: b, additive: false }).unwrap();
        assert_eq!(
            s.execute(EditCommand::MoveUp { nodes: Vec::new() }).unwrap(),
            CommandOutcome::Done
        );
        assert_eq!(order(&s), ["b", "a"]);
        assert_eq!(
            s.execute(EditCommand::MoveUp { nodes: Vec::new() }).unwrap(),
            CommandOutcome::Unchanged
        );
        assert_eq!(
            s.execute(EditCommand::ApplyLabels { scheme: LabelScheme::paginated("p. ", 5) }).unwrap(),
            CommandOutcome::Labeled(1)
        );
        assert_eq!(s.tree().node(b).unwrap().label(), "p. 5");
        assert_eq!(s.execute(EditCommand::Undo).unwrap(), CommandOutcome::Done);
        assert_eq!(s.tree().node(b).unwrap().label(), "");
    }
}
