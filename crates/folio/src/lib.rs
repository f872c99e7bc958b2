#![forbid(unsafe_code)]

//! Folio public facade crate.
//!
//! Folio edits the logical structure of an ordered collection of pages: a
//! tree of named groups over leaves, each leaf pointing at one page
//! resource. This crate re-exports the stable surface of the internal crates
//! and offers a prelude for day-to-day use.
//!
//! ```no_run
//! use folio::prelude::*;
//!
//! fn relabel(session: &mut EditorSession) -> folio::Result<()> {
//!     session.select_all(None)?;
//!     let preview = session.preview_labels(&LabelScheme::foliated(1))?;
//!     session.apply_labels(&preview)?;
//!     Ok(())
//! }
//! ```

pub mod error;
#[cfg(feature = "tracing-json")]
pub mod logging;

pub use error::{Error, Recovery, Result, Severity};

// --- Core re-exports -------------------------------------------------------

pub use folio_core::{
    GroupSeed, LeafSeed, Node, NodeId, NodeKind, ResourceRef, SeedEntry, StructureError, TreeStore,
};

// --- Label re-exports ------------------------------------------------------

pub use folio_label::{LabelMethod, LabelScheme, SchemeError, label_sequence};

// --- Session re-exports ----------------------------------------------------

pub use folio_session::{
    CardFlags, CardViewModel, Clipboard, EditCommand, EditorSession, GalleryAdapter, GalleryEvent, LabelPreview,
    OutlineRow, PastePosition, PreviewResolver, ResourceSettings, Selection, SessionConfig, SessionError,
    TemplateResolver, ViewingDirection, ViewingHint, outline, project,
};

// --- Runtime re-exports ----------------------------------------------------

pub use folio_runtime::{
    BackendError, CommitError, CommitEvent, CommitPayload, CommitTicket, PersistenceGateway, SaveBackend,
    SaveReceipt,
};

// --- Prelude ---------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        CommitEvent, EditCommand, EditorSession, Error, GroupSeed, LabelScheme, LeafSeed, NodeId, PastePosition,
        PersistenceGateway, Recovery, ResourceSettings, Result, SaveBackend, SessionConfig, TreeStore,
    };
}

pub use folio_core as core;
pub use folio_label as label;
pub use folio_runtime as runtime;
pub use folio_session as session;
