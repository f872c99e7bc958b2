#![forbid(unsafe_code)]

//! Folio error model and recovery policy.
//!
//! Every subsystem keeps its own typed error. [`Error`] wraps them for
//! callers that just want `?`, and maps each case to a [`Recovery`] the
//! editor should take plus a [`Severity`] for how loudly to surface it.
//!
//! | Failure                          | Recovery           | Severity   |
//! |----------------------------------|--------------------|------------|
//! | Invalid move, missing node, ...  | `RefuseOperation`  | `Transient`|
//! | Paste from a stale clipboard     | `ClearClipboard`   | `Low`      |
//! | Bad label scheme or config       | `FixConfiguration` | `Low`      |
//! | Save conflict                    | `AskUser`          | `Decision` |
//! | Save transport failure           | `RetryLater`       | `Transient`|
//! | Save rejected                    | `RefuseOperation`  | `Low`      |
//! | Commit worker stopped            | `RetryLater`       | `Transient`|

use std::fmt;

use folio_core::StructureError;
use folio_label::SchemeError;
use folio_runtime::CommitError;
use folio_session::{SessionConfigError, SessionError};

// ── Unified Error ───────────────────────────────────────────────────────

/// Top-level error type for Folio.
#[derive(Debug)]
pub enum Error {
    /// A tree operation was refused; the tree is unchanged.
    Structure(StructureError),
    /// A session command was refused; the session is unchanged.
    Session(SessionError),
    /// A label scheme could not be loaded or is invalid.
    Scheme(SchemeError),
    /// Session configuration could not be loaded or is invalid.
    Config(SessionConfigError),
    /// A commit failed; the session is unchanged and still unsaved.
    Commit(CommitError),
}

/// Standard result type for Folio APIs.
pub type Result<T> = std::result::Result<T, Error>;

// ── Recovery policy ─────────────────────────────────────────────────────

/// What the editor should do after an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recovery {
    /// Leave state as is and tell the user the operation is not possible.
    RefuseOperation,
    /// Drop the clipboard contents; the cut nodes no longer all exist.
    ClearClipboard,
    /// Ask the user how to resolve a conflicting save.
    AskUser,
    /// Keep the edits and try committing again later.
    RetryLater,
    /// Correct the scheme or configuration input and reload.
    FixConfiguration,
}

/// How prominently an error should be surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Likely to clear on its own.
    Transient,
    /// Inline notice; nothing is lost.
    Low,
    /// Blocks until the user chooses.
    Decision,
}

impl Error {
    /// Recovery action for this error.
    #[must_use]
    pub fn recovery(&self) -> Recovery {
        match self {
            Self::Structure(_) => Recovery::RefuseOperation,
            Self::Session(SessionError::Structure(_)) => Recovery::RefuseOperation,
            Self::Session(SessionError::ClipboardStale { .. }) => Recovery::ClearClipboard,
            Self::Scheme(_) | Self::Config(_) => Recovery::FixConfiguration,
            Self::Commit(CommitError::SaveConflict { .. }) => Recovery::AskUser,
            Self::Commit(CommitError::Transport { .. } | CommitError::WorkerGone) => Recovery::RetryLater,
            Self::Commit(CommitError::Rejected { .. }) => Recovery::RefuseOperation,
        }
    }

    #[must_use]
    pub fn severity(&self) -> Severity {
        match self {
            Self::Structure(_) | Self::Session(SessionError::Structure(_)) => Severity::Transient,
            Self::Session(SessionError::ClipboardStale { .. }) => Severity::Low,
            Self::Scheme(_) | Self::Config(_) => Severity::Low,
            Self::Commit(CommitError::SaveConflict { .. }) => Severity::Decision,
            Self::Commit(CommitError::Transport { .. } | CommitError::WorkerGone) => Severity::Transient,
            Self::Commit(CommitError::Rejected { .. }) => Severity::Low,
        }
    }

    /// Error type label for metrics and tracing.
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::Structure(_) => "structure",
            Self::Session(_) => "session",
            Self::Scheme(_) => "scheme",
            Self::Config(_) => "config",
            Self::Commit(_) => "commit",
        }
    }

    /// Whether the user has to choose before editing can safely continue.
    #[must_use]
    pub fn needs_decision(&self) -> bool {
        self.severity() == Severity::Decision
    }
}

// ── Display ─────────────────────────────────────────────────────────────

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Structure(err) => write!(f, "{err}"),
            Self::Session(err) => write!(f, "{err}"),
            Self::Scheme(err) => write!(f, "label scheme: {err}"),
            Self::Config(err) => write!(f, "session config: {err}"),
            Self::Commit(err) => write!(f, "commit: {err}"),
        }
    }
}

impl fmt::Display for Recovery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RefuseOperation => write!(f, "refuse_operation"),
            Self::ClearClipboard => write!(f, "clear_clipboard"),
            Self::AskUser => write!(f, "ask_user"),
            Self::RetryLater => write!(f, "retry_later"),
            Self::FixConfiguration => write!(f, "fix_configuration"),
        }
    }
}

// ── std::error::Error ───────────────────────────────────────────────────

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Structure(err) => Some(err),
            Self::Session(err) => Some(err),
            Self::Scheme(err) => Some(err),
            Self::Config(err) => Some(err),
            Self::Commit(err) => Some(err),
        }
    }
}

// ── From conversions ────────────────────────────────────────────────────

impl From<StructureError> for Error {
    fn from(err: StructureError) -> Self {
        Self::Structure(err)
    }
}

impl From<SessionError> for Error {
    fn from(err: SessionError) -> Self {
        Self::Session(err)
    }
}

impl From<SchemeError> for Error {
    fn from(err: SchemeError) -> Self {
        Self::Scheme(err)
    }
}

impl From<SessionConfigError> for Error {
    fn from(err: SessionConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<CommitError> for Error {
    fn from(err: CommitError) -> Self {
        Self::Commit(err)
    }
}

// ── Tests ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::error::Error as StdError;

    use super::*;
    use folio_core::{NodeId, ValidationError};

    fn node(raw: u64) -> NodeId {
        NodeId::new(raw).unwrap()
    }

    fn stale() -> Error {
        Error::from(SessionError::ClipboardStale { missing: vec![node(7)] })
    }

    #[test]
    fn structure_errors_are_refused() {
        let err = Error::from(StructureError::from(ValidationError::RootImmutable { node: node(1) }));
        assert_eq!(err.recovery(), Recovery::RefuseOperation);
        assert_eq!(err.severity(), Severity::Transient);
        assert_eq!(err.error_type(), "structure");
        assert!(StdError::source(&err).is_some());
    }

    #[test]
    fn stale_clipboard_clears_clipboard() {
        let err = stale();
        assert_eq!(err.recovery(), Recovery::ClearClipboard);
        assert_eq!(err.severity(), Severity::Low);
        assert_eq!(err.error_type(), "session");
        assert!(!err.needs_decision());
    }

    #[test]
    fn only_save_conflict_needs_a_decision() {
        let conflict = Error::from(CommitError::SaveConflict {
            message: "etag".into(),
        });
        assert_eq!(conflict.recovery(), Recovery::AskUser);
        assert_eq!(conflict.severity(), Severity::Decision);
        assert!(conflict.needs_decision());

        let others = [
            Error::from(CommitError::Transport {
                message: "reset".into(),
            }),
            Error::from(CommitError::Rejected {
                message: "read-only".into(),
            }),
            Error::from(CommitError::WorkerGone),
            Error::from(SchemeError::Validation(vec!["bad".into()])),
            stale(),
        ];
        assert!(others.iter().all(|e| !e.needs_decision()));
    }

    #[test]
    fn transport_is_transient() {
        let err = Error::from(CommitError::Transport {
            message: "timeout".into(),
        });
        assert_eq!(err.recovery(), Recovery::RetryLater);
        assert_eq!(err.severity(), Severity::Transient);
        assert!(err.to_string().starts_with("commit: "));
    }

    #[test]
    fn configuration_errors_ask_for_a_fix() {
        let err = Error::from(SchemeError::Validation(vec!["start_num must be at least 1".into()]));
        assert_eq!(err.recovery(), Recovery::FixConfiguration);
        assert_eq!(err.error_type(), "scheme");
        assert_eq!(Recovery::FixConfiguration.to_string(), "fix_configuration");
    }
}
