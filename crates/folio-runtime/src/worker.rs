#![forbid(unsafe_code)]

//! Dedicated commit thread.
//!
//! [`CommitWorker`] owns the [`SaveBackend`] and runs saves one after another
//! on its own thread, so a slow store never blocks editing. Results come back
//! as [`CommitReport`]s on a second channel that the gateway polls.
//!
//! Dropping the worker sends [`WorkerMsg::Shutdown`] and joins the thread. A
//! save already running is allowed to finish first.

use std::io;
use std::sync::mpsc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::backend::{BackendError, SaveBackend, SaveReceipt};
use crate::instrument;
use crate::queue::{CommitTicket, Dispatch};

/// Channel capacity for outbound save requests.
const CHANNEL_CAPACITY: usize = 4;

/// Messages sent from the gateway to the commit thread.
#[derive(Debug)]
pub enum WorkerMsg {
    Save(Dispatch),
    Shutdown,
}

/// Outcome of one save, sent back from the commit thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitReport {
    pub ticket: CommitTicket,
    /// Session state hash the saved payload was taken at.
    pub state_hash: u64,
    pub result: Result<SaveReceipt, BackendError>,
    pub duration_us: u64,
}

pub struct CommitWorker {
    sender: mpsc::SyncSender<WorkerMsg>,
    handle: Option<JoinHandle<()>>,
    report_rx: mpsc::Receiver<CommitReport>,
}

impl CommitWorker {
    pub fn start<B: SaveBackend>(backend: B) -> io::Result<Self> {
        let (tx, rx) = mpsc::sync_channel::<WorkerMsg>(CHANNEL_CAPACITY);
        let (report_tx, report_rx) = mpsc::channel::<CommitReport>();

        // Saves log under whatever subscriber the caller had installed.
        let dispatch = tracing::dispatcher::get_default(Clone::clone);
        let handle = thread::Builder::new()
            .name("folio-commit".into())
            .spawn(move || {
                tracing::dispatcher::with_default(&dispatch, || commit_loop(backend, rx, report_tx));
            })?;

        Ok(Self {
            sender: tx,
            handle: Some(handle),
            report_rx,
        })
    }

    pub fn send(&self, dispatch: Dispatch) -> Result<(), mpsc::SendError<WorkerMsg>> {
        self.sender.send(WorkerMsg::Save(dispatch))
    }

    pub fn try_report(&self) -> Result<CommitReport, mpsc::TryRecvError> {
        self.report_rx.try_recv()
    }

    pub fn report_timeout(&self, timeout: Duration) -> Result<CommitReport, mpsc::RecvTimeoutError> {
        self.report_rx.recv_timeout(timeout)
    }

    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        let _ = self.sender.send(WorkerMsg::Shutdown);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for CommitWorker {
    fn drop(&mut self) {
        self.stop();
    }
}

fn commit_loop<B: SaveBackend>(
    mut backend: B,
    rx: mpsc::Receiver<WorkerMsg>,
    report_tx: mpsc::Sender<CommitReport>,
) {
    tracing::debug!(target: "folio.commit", "commit worker started");
    while let Ok(msg) = rx.recv() {
        let Dispatch { ticket, payload } = match msg {
            WorkerMsg::Save(dispatch) => dispatch,
            WorkerMsg::Shutdown => break,
        };

        let (result, duration_us) = instrument::trace_save(ticket, &payload, || backend.save(&payload));
        let report = CommitReport {
            ticket,
            state_hash: payload.state_hash,
            result,
            duration_us,
        };
        if report_tx.send(report).is_err() {
            break;
        }
    }
    tracing::debug!(target: "folio.commit", "commit worker stopped");
}
