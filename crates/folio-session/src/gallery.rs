#![forbid(unsafe_code)]

//! Gallery projection: the flat, leaf-only card view of a structure.
//!
//! The projection is re-derived from scratch after every mutation and never
//! edits the tree. [`GalleryAdapter`] turns card interactions into session
//! commands and hands back the fresh projection.

use bitflags::bitflags;

use folio_core::{Node, NodeId, ResourceRef, TreeStore};

use crate::clipboard::{Clipboard, PastePosition};
use crate::command::EditCommand;
use crate::error::SessionError;
use crate::selection::Selection;
use crate::session::EditorSession;
use crate::settings::ResourceSettings;

bitflags! {
    /// Display state of one card.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CardFlags: u8 {
        const NONE      = 0b0000;
        const SELECTED  = 0b0001;
        /// Held by a cut clipboard, directly or through an ancestor group.
        const DISABLED  = 0b0010;
        /// The viewer start leaf.
        const START     = 0b0100;
        const THUMBNAIL = 0b1000;
    }
}

impl Default for CardFlags {
    fn default() -> Self {
        Self::NONE
    }
}

/// Opaque preview reference handed to the external viewer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PreviewHandle(ResourceRef);

impl PreviewHandle {
    #[must_use]
    pub fn resource(&self) -> &ResourceRef {
        &self.0
    }
}

/// Resolves preview handles into something a viewer can load.
pub trait PreviewResolver {
    fn resolve(&self, handle: &PreviewHandle) -> Option<String>;
}

/// Resolver that substitutes the resource into a URL template at `{resource}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateResolver {
    template: String,
}

impl TemplateResolver {
    #[must_use]
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }
}

impl PreviewResolver for TemplateResolver {
    fn resolve(&self, handle: &PreviewHandle) -> Option<String> {
        if !self.template.contains("{resource}") {
            return None;
        }
        Some(self.template.replace("{resource}", handle.resource().as_str()))
    }
}

/// One gallery card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardViewModel {
    pub node: NodeId,
    /// Group directly containing the leaf.
    pub parent: NodeId,
    pub resource: ResourceRef,
    pub label: String,
    pub flags: CardFlags,
    pub preview: PreviewHandle,
}

impl CardViewModel {
    #[must_use]
    pub fn is_selected(&self) -> bool {
        self.flags.contains(CardFlags::SELECTED)
    }

    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.flags.contains(CardFlags::DISABLED)
    }
}

/// Project leaves in tree order.
#[must_use]
pub fn project(tree: &TreeStore, selection: &Selection, clipboard: &Clipboard) -> Vec<CardViewModel> {
    project_with_settings(tree, selection, clipboard, None)
}

/// Project leaves in tree order, marking start and thumbnail cards.
#[must_use]
pub fn project_with_settings(
    tree: &TreeStore,
    selection: &Selection,
    clipboard: &Clipboard,
    settings: Option<&ResourceSettings>,
) -> Vec<CardViewModel> {
    let start = settings.and_then(|s| s.start_leaf.as_ref());
    let thumbnail = settings.and_then(|s| s.thumbnail.as_ref());

    let mut cards = Vec::with_capacity(tree.leaf_count());
    // disabled[d] holds whether the node on the current path at depth d is
    // disabled, directly or inherited.
    let mut disabled: Vec<bool> = Vec::new();
    for visit in tree.preorder() {
        disabled.truncate(visit.depth);
        let inherited = disabled.last().copied().unwrap_or(false);
        let here = inherited || visit.node.is_disabled() || clipboard.contains(visit.id);
        disabled.push(here);

        let leaf = match visit.node {
            Node::Leaf(leaf) => leaf,
            Node::Group(_) => continue,
        };
        let mut flags = CardFlags::NONE;
        flags.set(CardFlags::SELECTED, selection.contains(leaf.id));
        flags.set(CardFlags::DISABLED, here);
        flags.set(CardFlags::START, start == Some(&leaf.resource));
        flags.set(CardFlags::THUMBNAIL, thumbnail == Some(&leaf.resource));
        cards.push(CardViewModel {
            node: leaf.id,
            parent: tree.parent_of(leaf.id).unwrap_or(tree.root()),
            resource: leaf.resource.clone(),
            label: leaf.label.clone(),
            flags,
            preview: PreviewHandle(leaf.resource.clone()),
        });
    }
    cards
}

/// User interaction with the gallery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GalleryEvent {
    Click(NodeId),
    CtrlClick(NodeId),
    ShiftClick(NodeId),
    SelectAll,
    Cut,
    Paste { target: NodeId, position: PastePosition },
}

impl GalleryEvent {
    /// Session command this event stands for.
    #[must_use]
    pub fn to_command(&self) -> EditCommand {
        match self {
            Self::Click(node) => EditCommand::Select {
                node: *node,
                additive: false,
            },
            Self::CtrlClick(node) => EditCommand::Select {
                node: *node,
                additive: true,
            },
            Self::ShiftClick(node) => EditCommand::SelectRange { node: *node },
            Self::SelectAll => EditCommand::SelectAll { root: None },
            Self::Cut => EditCommand::Cut { nodes: Vec::new() },
            Self::Paste { target, position } => EditCommand::Paste {
                target: *target,
                position: *position,
            },
        }
    }
}

/// Forwards gallery events to a session and re-derives the cards.
pub struct GalleryAdapter {
    resolver: Box<dyn PreviewResolver + Send + Sync>,
}

impl std::fmt::Debug for GalleryAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GalleryAdapter").finish_non_exhaustive()
    }
}

impl GalleryAdapter {
    #[must_use]
    pub fn new(resolver: impl PreviewResolver + Send + Sync + 'static) -> Self {
        Self {
            resolver: Box::new(resolver),
        }
    }

    /// Current cards for `session`.
    #[must_use]
    pub fn cards(&self, session: &EditorSession) -> Vec<CardViewModel> {
        project_with_settings(
            session.tree(),
            session.selection(),
            session.clipboard(),
            Some(session.settings()),
        )
    }

    /// Apply `event` to `session` and return the re-derived cards.
    pub fn handle(&self, event: &GalleryEvent, session: &mut EditorSession) -> Result<Vec<CardViewModel>, SessionError> {
        session.execute(event.to_command())?;
        Ok(self.cards(session))
    }

    /// Viewer location for a card's preview.
    #[must_use]
    pub fn preview_url(&self, card: &CardViewModel) -> Option<String> {
        self.resolver.resolve(&card.preview)
    }
}
