#![forbid(unsafe_code)]

//! Session commands as plain data.
//!
//! Adapters translate UI events into [`EditCommand`] values and hand them to
//! [`EditorSession::execute`](crate::EditorSession::execute). Commands are
//! serde-tagged so they can be logged, replayed, or sent across a boundary.

use serde::{Deserialize, Serialize};

use folio_core::NodeId;
use folio_label::LabelScheme;

use crate::clipboard::PastePosition;
use crate::settings::{ViewingDirection, ViewingHint};

/// Every operation a session accepts.
///
/// Commands that take a `nodes` list act on the current selection when the
/// list is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum EditCommand {
    Select {
        node: NodeId,
        #[serde(default)]
        additive: bool,
    },
    SelectRange {
        node: NodeId,
    },
    SelectAll {
        #[serde(default)]
        root: Option<NodeId>,
    },
    ClearSelection,
    Cut {
        #[serde(default)]
        nodes: Vec<NodeId>,
    },
    Paste {
        target: NodeId,
        position: PastePosition,
    },
    GroupSelection,
    CreateGroup {
        parent: NodeId,
        #[serde(default)]
        index: Option<usize>,
    },
    DeleteGroup {
        node: NodeId,
    },
    MoveNodes {
        #[serde(default)]
        nodes: Vec<NodeId>,
        target: NodeId,
        index: usize,
    },
    MoveUp {
        #[serde(default)]
        nodes: Vec<NodeId>,
    },
    MoveDown {
        #[serde(default)]
        nodes: Vec<NodeId>,
    },
    RenameGroup {
        node: NodeId,
        label: String,
    },
    Expand {
        node: NodeId,
    },
    Collapse {
        node: NodeId,
    },
    ToggleExpanded {
        node: NodeId,
    },
    /// Generate labels for the selected leaves and write them.
    ApplyLabels {
        scheme: LabelScheme,
    },
    SetViewingDirection {
        direction: ViewingDirection,
    },
    SetViewingHint {
        hint: ViewingHint,
    },
    SetStartLeaf {
        node: Option<NodeId>,
    },
    SetThumbnail {
        node: Option<NodeId>,
    },
    Undo,
    Redo,
}

impl EditCommand {
    /// Stable name used in spans and logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Select { .. } => "select",
            Self::SelectRange { .. } => "select_range",
            Self::SelectAll { .. } => "select_all",
            Self::ClearSelection => "clear_selection",
            Self::Cut { .. } => "cut",
            Self::Paste { .. } => "paste",
            Self::GroupSelection => "group_selection",
            Self::CreateGroup { .. } => "create_group",
            Self::DeleteGroup { .. } => "delete_group",
            Self::MoveNodes { .. } => "move_nodes",
            Self::MoveUp { .. } => "move_up",
            Self::MoveDown { .. } => "move_down",
            Self::RenameGroup { .. } => "rename_group",
            Self::Expand { .. } => "expand",
            Self::Collapse { .. } => "collapse",
            Self::ToggleExpanded { .. } => "toggle_expanded",
            Self::ApplyLabels { .. } => "apply_labels",
            Self::SetViewingDirection { .. } => "set_viewing_direction",
            Self::SetViewingHint { .. } => "set_viewing_hint",
            Self::SetStartLeaf { .. } => "set_start_leaf",
            Self::SetThumbnail { .. } => "set_thumbnail",
            Self::Undo => "undo",
            Self::Redo => "redo",
        }
    }

    /// Whether the command can change what a commit would save.
    #[must_use]
    pub const fn is_structural(&self) -> bool {
        !matches!(
            self,
            Self::Select { .. }
                | Self::SelectRange { .. }
                | Self::SelectAll { .. }
                | Self::ClearSelection
                | Self::Cut { .. }
                | Self::Expand { .. }
                | Self::Collapse { .. }
                | Self::ToggleExpanded { .. }
        )
    }
}

/// Result of a successfully executed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Done,
    /// Accepted, but nothing changed (boundary move, empty history).
    Unchanged,
    Created(NodeId),
    Removed(Vec<NodeId>),
    Pasted(Vec<NodeId>),
    Labeled(usize),
}
