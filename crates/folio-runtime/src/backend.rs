#![forbid(unsafe_code)]

//! Save backend seam.
//!
//! A [`SaveBackend`] receives complete [`CommitPayload`]s on the commit worker
//! thread and either accepts them or reports why not. Backends run one save at
//! a time; they never see concurrent calls.

use std::fmt;

use crate::payload::CommitPayload;

/// Acknowledgement returned by a backend for an accepted save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveReceipt {
    /// Backend-assigned revision, if the store versions its documents.
    pub revision: Option<String>,
}

impl SaveReceipt {
    #[must_use]
    pub const fn new() -> Self {
        Self { revision: None }
    }

    #[must_use]
    pub fn with_revision(revision: impl Into<String>) -> Self {
        Self {
            revision: Some(revision.into()),
        }
    }
}

impl Default for SaveReceipt {
    fn default() -> Self {
        Self::new()
    }
}

/// Why a backend refused or failed a save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// The stored document changed underneath this session.
    Conflict { message: String },
    /// The payload was refused (permissions, validation on the store side).
    Rejected { message: String },
    /// The store could not be reached or the request broke off.
    Transport { message: String },
}

impl BackendError {
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Conflict { .. } => "conflict",
            Self::Rejected { .. } => "rejected",
            Self::Transport { .. } => "transport",
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Conflict { message } | Self::Rejected { message } | Self::Transport { message } => message,
        }
    }
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Conflict { message } => write!(f, "save conflict: {message}"),
            Self::Rejected { message } => write!(f, "save rejected: {message}"),
            Self::Transport { message } => write!(f, "save transport failure: {message}"),
        }
    }
}

impl std::error::Error for BackendError {}

/// Destination for commit payloads.
pub trait SaveBackend: Send + 'static {
    /// Persist `payload` as one all-or-nothing write.
    fn save(&mut self, payload: &CommitPayload) -> Result<SaveReceipt, BackendError>;
}

impl<F> SaveBackend for F
where
    F: FnMut(&CommitPayload) -> Result<SaveReceipt, BackendError> + Send + 'static,
{
    fn save(&mut self, payload: &CommitPayload) -> Result<SaveReceipt, BackendError> {
        self(payload)
    }
}

#[cfg(any(test, feature = "test-helpers"))]
pub use scripted::{SaveGate, SaveLog, ScriptedBackend};

#[cfg(any(test, feature = "test-helpers"))]
mod scripted {
    use std::collections::VecDeque;
    use std::sync::mpsc;
    use std::sync::{Arc, Condvar, Mutex, PoisonError};
    use std::time::Duration;

    use web_time::Instant;

    use super::{BackendError, SaveBackend, SaveReceipt};
    use crate::payload::CommitPayload;

    /// Backend for tests: records every payload and replays scripted results.
    ///
    /// Unscripted saves succeed with a numbered revision. A gated backend
    /// blocks inside each save until [`SaveGate::release`] is called, which
    /// lets tests hold a commit in flight.
    pub struct ScriptedBackend {
        log: SaveLog,
        script: VecDeque<Result<SaveReceipt, BackendError>>,
        gate: Option<mpsc::Receiver<()>>,
    }

    impl ScriptedBackend {
        #[must_use]
        pub fn recording() -> (Self, SaveLog) {
            let log = SaveLog::default();
            let backend = Self {
                log: log.clone(),
                script: VecDeque::new(),
                gate: None,
            };
            (backend, log)
        }

        /// A backend whose saves wait for a release from the returned gate.
        #[must_use]
        pub fn gated() -> (Self, SaveLog, SaveGate) {
            let (mut backend, log) = Self::recording();
            let (tx, rx) = mpsc::channel();
            backend.gate = Some(rx);
            (backend, log, SaveGate { tx })
        }

        /// Queue the result of the next unscripted save.
        #[must_use]
        pub fn then(mut self, result: Result<SaveReceipt, BackendError>) -> Self {
            self.script.push_back(result);
            self
        }
    }

    impl SaveBackend for ScriptedBackend {
        fn save(&mut self, payload: &CommitPayload) -> Result<SaveReceipt, BackendError> {
            let call = self.log.record(payload.clone());
            if let Some(gate) = &self.gate {
                if gate.recv().is_err() {
                    return Err(BackendError::Transport {
                        message: "gate dropped".into(),
                    });
                }
            }
            self.script
                .pop_front()
                .unwrap_or_else(|| Ok(SaveReceipt::with_revision(format!("rev-{call}"))))
        }
    }

    /// Releases gated saves one at a time.
    pub struct SaveGate {
        tx: mpsc::Sender<()>,
    }

    impl SaveGate {
        pub fn release(&self) {
            let _ = self.tx.send(());
        }
    }

    /// Shared record of payloads a [`ScriptedBackend`] has received.
    #[derive(Clone, Default)]
    pub struct SaveLog {
        inner: Arc<(Mutex<Vec<CommitPayload>>, Condvar)>,
    }

    impl SaveLog {
        fn record(&self, payload: CommitPayload) -> usize {
            let (lock, cvar) = &*self.inner;
            let mut calls = lock.lock().unwrap_or_else(PoisonError::into_inner);
            calls.push(payload);
            cvar.notify_all();
            calls.len()
        }

        #[must_use]
        pub fn calls(&self) -> Vec<CommitPayload> {
            let (lock, _) = &*self.inner;
            lock.lock().unwrap_or_else(PoisonError::into_inner).clone()
        }

        #[must_use]
        pub fn len(&self) -> usize {
            let (lock, _) = &*self.inner;
            lock.lock().unwrap_or_else(PoisonError::into_inner).len()
        }

        #[must_use]
        pub fn is_empty(&self) -> bool {
            self.len() == 0
        }

        /// Block until at least `count` saves have started.
        ///
        /// Returns `false` on timeout.
        pub fn wait_for(&self, count: usize, timeout: Duration) -> bool {
            let deadline = Instant::now() + timeout;
            let (lock, cvar) = &*self.inner;
            let mut calls = lock.lock().unwrap_or_else(PoisonError::into_inner);
            while calls.len() < count {
                let now = Instant::now();
                if now >= deadline {
                    return false;
                }
                calls = cvar
                    .wait_timeout(calls, deadline - now)
                    .map(|(guard, _)| guard)
                    .unwrap_or_else(|poisoned| poisoned.into_inner().0);
            }
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::{LeafSeed, TreeStore};
    use folio_session::ResourceSettings;

    fn payload() -> CommitPayload {
        let tree = TreeStore::load(vec![LeafSeed::new("a", "")], None).unwrap();
        CommitPayload::from_tree(&tree, &ResourceSettings::default())
    }

    #[test]
    fn closures_are_backends() {
        let mut seen = 0;
        let mut backend = move |p: &CommitPayload| {
            seen += p.leaf_count();
            Ok(SaveReceipt::with_revision(seen.to_string()))
        };
        assert_eq!(backend.save(&payload()).unwrap().revision.as_deref(), Some("1"));
        assert_eq!(backend.save(&payload()).unwrap().revision.as_deref(), Some("2"));
    }

    #[test]
    fn scripted_backend_replays_then_defaults() {
        let (backend, log) = ScriptedBackend::recording();
        let mut backend = backend.then(Err(BackendError::Conflict {
            message: "etag mismatch".into(),
        }));
        assert!(matches!(backend.save(&payload()), Err(BackendError::Conflict { .. })));
        assert_eq!(backend.save(&payload()).unwrap().revision.as_deref(), Some("rev-2"));
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn error_display_and_kind() {
        let err = BackendError::Transport {
            message: "timeout".into(),
        };
        assert_eq!(err.kind(), "transport");
        assert_eq!(err.message(), "timeout");
        assert_eq!(err.to_string(), "save transport failure: timeout");
    }
}
