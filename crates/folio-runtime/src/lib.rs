#![forbid(unsafe_code)]

//! Persistence for Folio editing sessions.
//!
//! # Role in Folio
//! `folio-runtime` is the only asynchronous part of the engine. Structure
//! edits stay synchronous in `folio-session`; a commit snapshots the session
//! into a [`CommitPayload`] and hands it to a [`SaveBackend`] on a dedicated
//! thread.
//!
//! # Primary responsibilities
//! - **CommitPayload**: nested `{label, nodes}` / `{proxy, label}` document.
//! - **CommitQueue**: one commit in flight, newer requests coalesce.
//! - **CommitWorker**: sequential saves on the `folio-commit` thread.
//! - **PersistenceGateway**: commit, poll, and wait on behalf of a session.
//!
//! # How it fits in the system
//! The facade crate `folio` re-exports the gateway next to the session types.
//! Backends are plain trait objects (or closures), so tests and embedders can
//! plug in any store.

pub mod backend;
pub mod error;
pub mod gateway;
pub mod instrument;
pub mod payload;
pub mod queue;
pub mod worker;

pub use backend::{BackendError, SaveBackend, SaveReceipt};
#[cfg(any(test, feature = "test-helpers"))]
pub use backend::{SaveGate, SaveLog, ScriptedBackend};
pub use error::CommitError;
pub use gateway::{CommitEvent, PersistenceGateway};
pub use payload::{CommitPayload, SCHEMA_VERSION, StructureEntry, StructureGroup};
pub use queue::{CommitQueue, CommitTicket, Dispatch, Submitted};
pub use worker::{CommitReport, CommitWorker, WorkerMsg};
