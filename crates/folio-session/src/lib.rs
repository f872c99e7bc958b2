#![forbid(unsafe_code)]

//! Session: the stateful editing layer above the structure tree.
//!
//! # Role in Folio
//! `folio-session` owns everything that lives only for one editing session:
//! the selection, the cut clipboard, resource settings, undo history, and the
//! committed-state hash. Callers drive it through [`EditorSession`] methods or
//! [`EditCommand`] values, and read it back through the gallery and outline
//! projections.
//!
//! # Primary responsibilities
//! - **EditorSession**: atomic edits, label preview/apply, undo/redo.
//! - **Selection / Clipboard**: multi-select, range select, cut and paste.
//! - **Gallery**: leaf-only [`CardViewModel`] projection and event adapter.
//! - **Outline**: indented structure-panel rows.

pub mod clipboard;
pub mod command;
pub mod config;
pub mod error;
pub mod gallery;
pub mod history;
pub mod instrument;
pub mod outline;
pub mod selection;
pub mod session;
pub mod settings;

pub use clipboard::{Clipboard, ClipboardMode, PastePosition};
pub use command::{CommandOutcome, EditCommand};
pub use config::{SessionConfig, SessionConfigError};
pub use error::SessionError;
pub use gallery::{
    CardFlags, CardViewModel, GalleryAdapter, GalleryEvent, PreviewHandle, PreviewResolver, TemplateResolver,
    project, project_with_settings,
};
pub use history::{DEFAULT_HISTORY_DEPTH, History, SessionSnapshot};
pub use outline::{OutlineRow, outline};
pub use selection::Selection;
pub use session::{EditorSession, LabelPreview};
pub use settings::{ResourceSettings, ViewingDirection, ViewingHint};
