#![forbid(unsafe_code)]

//! Commit observability.
//!
//! - **Tracing**: every save runs inside a `folio.commit` span carrying
//!   `ticket`, `state_hash`, `leaves`, `duration_us`, and `result`.
//! - **Counters**: `commits_sent_total`, `commits_coalesced_total`, and
//!   `commits_failed_total`.

use std::sync::atomic::{AtomicU64, Ordering};

use web_time::Instant;

use crate::backend::{BackendError, SaveReceipt};
use crate::payload::CommitPayload;
use crate::queue::CommitTicket;

// ---------------------------------------------------------------------------
// Monotonic counters
// ---------------------------------------------------------------------------

static COMMITS_SENT_TOTAL: AtomicU64 = AtomicU64::new(0);
static COMMITS_COALESCED_TOTAL: AtomicU64 = AtomicU64::new(0);
static COMMITS_FAILED_TOTAL: AtomicU64 = AtomicU64::new(0);

/// Payloads handed to a backend (monotonic counter).
#[must_use]
pub fn commits_sent_total() -> u64 {
    COMMITS_SENT_TOTAL.load(Ordering::Relaxed)
}

/// Commit requests replaced by a newer one before being sent.
#[must_use]
pub fn commits_coalesced_total() -> u64 {
    COMMITS_COALESCED_TOTAL.load(Ordering::Relaxed)
}

/// Saves the backend refused or failed.
#[must_use]
pub fn commits_failed_total() -> u64 {
    COMMITS_FAILED_TOTAL.load(Ordering::Relaxed)
}

pub(crate) fn record_coalesced(superseded: CommitTicket, by: CommitTicket) {
    COMMITS_COALESCED_TOTAL.fetch_add(1, Ordering::Relaxed);
    tracing::debug!(
        target: "folio.commit",
        superseded = superseded.get(),
        by = by.get(),
        "pending commit replaced"
    );
}

// ---------------------------------------------------------------------------
// Save span
// ---------------------------------------------------------------------------

/// Run one backend save inside a `folio.commit` span.
///
/// Returns the save result and its duration in microseconds.
pub(crate) fn trace_save<F>(
    ticket: CommitTicket,
    payload: &CommitPayload,
    f: F,
) -> (Result<SaveReceipt, BackendError>, u64)
where
    F: FnOnce() -> Result<SaveReceipt, BackendError>,
{
    COMMITS_SENT_TOTAL.fetch_add(1, Ordering::Relaxed);

    let start = Instant::now();
    let span = tracing::debug_span!(
        target: "folio.commit",
        "folio.commit",
        ticket = ticket.get(),
        state_hash = payload.state_hash,
        leaves = payload.leaf_count(),
        duration_us = tracing::field::Empty,
        result = tracing::field::Empty,
    );
    let _guard = span.enter();

    let result = f();
    let duration_us = start.elapsed().as_micros() as u64;
    span.record("duration_us", duration_us);

    match &result {
        Ok(receipt) => {
            span.record("result", "ok");
            tracing::info!(
                target: "folio.commit",
                ticket = ticket.get(),
                revision = receipt.revision.as_deref().unwrap_or(""),
                duration_us = duration_us,
                "commit saved"
            );
        }
        Err(err) => {
            COMMITS_FAILED_TOTAL.fetch_add(1, Ordering::Relaxed);
            span.record("result", err.kind());
            tracing::warn!(
                target: "folio.commit",
                ticket = ticket.get(),
                error_kind = err.kind(),
                error = %err,
                duration_us = duration_us,
                "commit failed"
            );
        }
    }

    (result, duration_us)
}
