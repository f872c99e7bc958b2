#![forbid(unsafe_code)]

//! Commit failures as seen by the editing layer.

use std::fmt;

use crate::backend::BackendError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitError {
    /// The stored structure changed since this session loaded it.
    SaveConflict { message: String },
    /// The backend refused the payload.
    Rejected { message: String },
    /// The backend could not be reached.
    Transport { message: String },
    /// The commit thread has stopped; no further saves are possible.
    WorkerGone,
}

impl CommitError {
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::SaveConflict { .. } => "save_conflict",
            Self::Rejected { .. } => "rejected",
            Self::Transport { .. } => "transport",
            Self::WorkerGone => "worker_gone",
        }
    }

    /// Whether committing the same state again may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}

impl fmt::Display for CommitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SaveConflict { message } => {
                write!(f, "structure was changed elsewhere since it was loaded: {message}")
            }
            Self::Rejected { message } => write!(f, "save was rejected: {message}"),
            Self::Transport { message } => write!(f, "save could not reach the store: {message}"),
            Self::WorkerGone => write!(f, "commit worker is no longer running"),
        }
    }
}

impl std::error::Error for CommitError {}

impl From<BackendError> for CommitError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Conflict { message } => Self::SaveConflict { message },
            BackendError::Rejected { message } => Self::Rejected { message },
            BackendError::Transport { message } => Self::Transport { message },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_conflict_becomes_save_conflict() {
        let err = CommitError::from(BackendError::Conflict {
            message: "etag".into(),
        });
        assert_eq!(err.kind(), "save_conflict");
        assert!(!err.is_retryable());
        assert!(err.to_string().contains("etag"));
    }

    #[test]
    fn only_transport_is_retryable() {
        let transport = CommitError::from(BackendError::Transport {
            message: "reset".into(),
        });
        assert!(transport.is_retryable());
        assert!(!CommitError::WorkerGone.is_retryable());
    }
}
