#![forbid(unsafe_code)]

//! Coalescing commit queue.
//!
//! At most one commit is in flight. A commit requested while another is in
//! flight waits in a single pending slot; a later request replaces it, so the
//! backend only ever sees the newest tree once the in-flight save finishes.
//!
//! The queue is a pure state machine. [`PersistenceGateway`] drives it and
//! owns the worker thread.
//!
//! [`PersistenceGateway`]: crate::PersistenceGateway

use std::fmt;

use crate::payload::CommitPayload;

/// Handle for one commit request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CommitTicket(u64);

impl CommitTicket {
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for CommitTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "commit #{}", self.0)
    }
}

/// A payload that should be handed to the worker now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    pub ticket: CommitTicket,
    pub payload: CommitPayload,
}

/// What [`CommitQueue::submit`] decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submitted {
    /// Nothing was in flight; send this right away.
    Dispatch(Dispatch),
    /// Parked behind the in-flight commit, replacing `superseded` if set.
    Queued { superseded: Option<CommitTicket> },
}

#[derive(Debug, Default)]
pub struct CommitQueue {
    issued: u64,
    in_flight: Option<CommitTicket>,
    pending: Option<Dispatch>,
}

impl CommitQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a commit of `payload`.
    pub fn submit(&mut self, payload: CommitPayload) -> (CommitTicket, Submitted) {
        self.issued += 1;
        let ticket = CommitTicket(self.issued);
        let dispatch = Dispatch { ticket, payload };

        if self.in_flight.is_none() {
            self.in_flight = Some(ticket);
            return (ticket, Submitted::Dispatch(dispatch));
        }

        let superseded = self.pending.replace(dispatch).map(|old| old.ticket);
        (ticket, Submitted::Queued { superseded })
    }

    /// Mark `ticket` finished and return the next commit to send, if any.
    ///
    /// Completing a ticket that is not in flight changes nothing.
    pub fn complete(&mut self, ticket: CommitTicket) -> Option<Dispatch> {
        if self.in_flight != Some(ticket) {
            return None;
        }
        self.in_flight = None;
        let next = self.pending.take()?;
        self.in_flight = Some(next.ticket);
        Some(next)
    }

    /// Drop everything; returns the tickets that will never complete.
    pub fn abandon(&mut self) -> Vec<CommitTicket> {
        self.in_flight
            .take()
            .into_iter()
            .chain(self.pending.take().map(|d| d.ticket))
            .collect()
    }

    #[must_use]
    pub const fn in_flight(&self) -> Option<CommitTicket> {
        self.in_flight
    }

    #[must_use]
    pub fn pending(&self) -> Option<CommitTicket> {
        self.pending.as_ref().map(|d| d.ticket)
    }

    #[must_use]
    pub const fn is_idle(&self) -> bool {
        self.in_flight.is_none() && self.pending.is_none()
    }
}
