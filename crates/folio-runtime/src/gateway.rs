#![forbid(unsafe_code)]

//! Persistence gateway: the one place a session's structure leaves the
//! process.
//!
//! [`PersistenceGateway::commit`] snapshots the session into a
//! [`CommitPayload`] and hands it to the [`CommitQueue`]. Editing continues
//! while the save runs on the [`CommitWorker`] thread. Callers pick up the
//! outcome with [`poll`](PersistenceGateway::poll) (non-blocking) or
//! [`wait`](PersistenceGateway::wait) (blocking with a deadline).
//!
//! A successful save marks the session committed at the payload's state hash,
//! so the unsaved flag only clears if nothing changed after the snapshot. A
//! failed save never touches the session.

use std::collections::VecDeque;
use std::io;
use std::sync::mpsc::{RecvTimeoutError, TryRecvError};
use std::time::Duration;

use web_time::Instant;

use folio_session::EditorSession;

use crate::backend::{SaveBackend, SaveReceipt};
use crate::error::CommitError;
use crate::instrument;
use crate::payload::CommitPayload;
use crate::queue::{CommitQueue, CommitTicket, Dispatch, Submitted};
use crate::worker::{CommitReport, CommitWorker};

/// Something that happened to a commit request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitEvent {
    Saved {
        ticket: CommitTicket,
        state_hash: u64,
        receipt: SaveReceipt,
    },
    Failed {
        ticket: CommitTicket,
        error: CommitError,
    },
    /// Replaced by a newer request before it was sent.
    Superseded { ticket: CommitTicket, by: CommitTicket },
}

impl CommitEvent {
    #[must_use]
    pub const fn ticket(&self) -> CommitTicket {
        match self {
            Self::Saved { ticket, .. } | Self::Failed { ticket, .. } | Self::Superseded { ticket, .. } => *ticket,
        }
    }
}

pub struct PersistenceGateway {
    worker: CommitWorker,
    queue: CommitQueue,
    events: VecDeque<CommitEvent>,
    worker_gone: bool,
}

impl PersistenceGateway {
    /// Spawn the commit thread around `backend`.
    pub fn start<B: SaveBackend>(backend: B) -> io::Result<Self> {
        Ok(Self {
            worker: CommitWorker::start(backend)?,
            queue: CommitQueue::new(),
            events: VecDeque::new(),
            worker_gone: false,
        })
    }

    /// Request a save of the session's current structure and settings.
    pub fn commit(&mut self, session: &EditorSession) -> Result<CommitTicket, CommitError> {
        self.commit_payload(CommitPayload::from_session(session))
    }

    /// Request a save of an already built payload.
    pub fn commit_payload(&mut self, payload: CommitPayload) -> Result<CommitTicket, CommitError> {
        if self.worker_gone {
            return Err(CommitError::WorkerGone);
        }
        let state_hash = payload.state_hash;
        let (ticket, submitted) = self.queue.submit(payload);
        match submitted {
            Submitted::Dispatch(dispatch) => self.dispatch(dispatch)?,
            Submitted::Queued { superseded } => {
                if let Some(old) = superseded {
                    instrument::record_coalesced(old, ticket);
                    self.events.push_back(CommitEvent::Superseded { ticket: old, by: ticket });
                }
            }
        }
        tracing::debug!(
            target: "folio.commit",
            ticket = ticket.get(),
            state_hash = state_hash,
            in_flight = self.queue.in_flight().map_or(0, CommitTicket::get),
            "commit requested"
        );
        Ok(ticket)
    }

    /// Collect finished commits without blocking.
    pub fn poll(&mut self, session: &mut EditorSession) -> Vec<CommitEvent> {
        while !self.worker_gone {
            match self.worker.try_report() {
                Ok(report) => self.settle(report, session),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => self.lose_worker(),
            }
        }
        self.events.drain(..).collect()
    }

    /// Block until every outstanding commit has finished or `timeout` passes.
    ///
    /// Check [`is_idle`](Self::is_idle) afterwards to tell the two apart.
    pub fn wait(&mut self, session: &mut EditorSession, timeout: Duration) -> Vec<CommitEvent> {
        let deadline = Instant::now() + timeout;
        while !self.queue.is_idle() && !self.worker_gone {
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            match self.worker.report_timeout(deadline - now) {
                Ok(report) => self.settle(report, session),
                Err(RecvTimeoutError::Timeout) => break,
                Err(RecvTimeoutError::Disconnected) => self.lose_worker(),
            }
        }
        self.poll(session)
    }

    #[must_use]
    pub const fn is_idle(&self) -> bool {
        self.queue.is_idle()
    }

    #[must_use]
    pub const fn in_flight(&self) -> Option<CommitTicket> {
        self.queue.in_flight()
    }

    #[must_use]
    pub fn pending(&self) -> Option<CommitTicket> {
        self.queue.pending()
    }

    /// Stop the commit thread after any running save finishes.
    pub fn shutdown(self) {
        self.worker.shutdown();
    }

    fn dispatch(&mut self, dispatch: Dispatch) -> Result<(), CommitError> {
        if self.worker.send(dispatch).is_err() {
            self.lose_worker();
            return Err(CommitError::WorkerGone);
        }
        Ok(())
    }

    fn settle(&mut self, report: CommitReport, session: &mut EditorSession) {
        let CommitReport {
            ticket,
            state_hash,
            result,
            ..
        } = report;
        match result {
            Ok(receipt) => {
                session.mark_committed(state_hash);
                self.events.push_back(CommitEvent::Saved {
                    ticket,
                    state_hash,
                    receipt,
                });
            }
            Err(err) => {
                self.events.push_back(CommitEvent::Failed {
                    ticket,
                    error: err.into(),
                });
            }
        }

        if let Some(next) = self.queue.complete(ticket) {
            // A lost worker is already reported through the event queue.
            let _ = self.dispatch(next);
        }
    }

    fn lose_worker(&mut self) {
        self.worker_gone = true;
        tracing::error!(target: "folio.commit", "commit worker stopped unexpectedly");
        for ticket in self.queue.abandon() {
            self.events.push_back(CommitEvent::Failed {
                ticket,
                error: CommitError::WorkerGone,
            });
        }
    }
}
