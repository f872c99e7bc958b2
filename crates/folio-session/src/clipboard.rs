#![forbid(unsafe_code)]

//! Cut clipboard.
//!
//! While the clipboard holds a cut, every referenced node carries the tree's
//! `disabled` marker. The clipboard owns that marker: it sets it on cut and
//! clears it on paste, replacement, or reset.

use serde::{Deserialize, Serialize};

use folio_core::{NodeId, TreeStore, ValidationError};

use crate::error::SessionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClipboardMode {
    #[default]
    None,
    Cut,
}

/// Where pasted nodes land relative to the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PastePosition {
    /// As following siblings of the target.
    After,
    /// As the first children of the target group.
    Into,
}

/// Transient holder of cut node ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Clipboard {
    ids: Vec<NodeId>,
    mode: ClipboardMode,
}

impl Clipboard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn ids(&self) -> &[NodeId] {
        &self.ids
    }

    #[must_use]
    pub const fn mode(&self) -> ClipboardMode {
        self.mode
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mode == ClipboardMode::None || self.ids.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.mode == ClipboardMode::Cut && self.ids.contains(&id)
    }

    /// Replace the clipboard with a cut of `ids`.
    ///
    /// Ids are stored in tree order. The previous cut's markers are cleared
    /// first. Nothing changes if the request is rejected.
    pub fn cut(&mut self, tree: &mut TreeStore, ids: &[NodeId]) -> Result<(), SessionError> {
        if ids.is_empty() {
            return Err(ValidationError::EmptySelection.into());
        }
        let root = tree.root();
        if ids.contains(&root) {
            return Err(ValidationError::RootImmutable { node: root }.into());
        }
        if let Some(missing) = ids.iter().find(|id| !tree.contains(**id)) {
            return Err(ValidationError::UnknownNode { node: *missing }.into());
        }

        self.reset(tree);
        let mut ordered = ids.to_vec();
        ordered.sort_unstable();
        ordered.dedup();
        tree.sort_tree_order(&mut ordered);
        tree.set_disabled(&ordered, true)?;
        self.ids = ordered;
        self.mode = ClipboardMode::Cut;
        tracing::debug!(target: "folio.session", nodes = self.ids.len(), "clipboard cut");
        Ok(())
    }

    /// Ids that no longer exist in `tree`.
    #[must_use]
    pub fn missing(&self, tree: &TreeStore) -> Vec<NodeId> {
        self.ids.iter().copied().filter(|id| !tree.contains(*id)).collect()
    }

    /// Empty the clipboard and clear the cut markers of surviving nodes.
    pub fn reset(&mut self, tree: &mut TreeStore) {
        let survivors: Vec<NodeId> = self.ids.iter().copied().filter(|id| tree.contains(*id)).collect();
        // Every survivor exists, so this cannot fail.
        let _ = tree.set_disabled(&survivors, false);
        self.forget();
    }

    /// Empty the clipboard without touching the tree.
    ///
    /// Used when the tree has been replaced wholesale (undo, redo).
    pub fn forget(&mut self) {
        self.ids.clear();
        self.mode = ClipboardMode::None;
    }
}
