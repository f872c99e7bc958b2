#![forbid(unsafe_code)]

//! Session-level errors.

use std::fmt;

use folio_core::{NodeId, StructureError, ValidationError};

/// Error returned by [`EditorSession`](crate::EditorSession) operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The underlying structure operation was rejected.
    Structure(StructureError),
    /// Clipboard entries no longer exist; the clipboard has been cleared.
    ClipboardStale { missing: Vec<NodeId> },
}

impl SessionError {
    /// Error family label for logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Structure(err) => err.kind(),
            Self::ClipboardStale { .. } => "clipboard_stale",
        }
    }
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Structure(err) => write!(f, "{err}"),
            Self::ClipboardStale { missing } => {
                write!(f, "clipboard is stale: {} cut node(s) no longer exist", missing.len())
            }
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Structure(err) => Some(err),
            Self::ClipboardStale { .. } => None,
        }
    }
}

impl From<StructureError> for SessionError {
    fn from(err: StructureError) -> Self {
        Self::Structure(err)
    }
}

impl From<ValidationError> for SessionError {
    fn from(err: ValidationError) -> Self {
        Self::Structure(err.into())
    }
}
