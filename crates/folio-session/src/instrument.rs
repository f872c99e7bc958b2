#![forbid(unsafe_code)]

//! Command instrumentation: monotonic counters and the `folio.command` span.

use std::sync::atomic::{AtomicU64, Ordering};

use web_time::Instant;

// ---------------------------------------------------------------------------
// Monotonic counters
// ---------------------------------------------------------------------------

static COMMANDS_APPLIED_TOTAL: AtomicU64 = AtomicU64::new(0);
static COMMANDS_REJECTED_TOTAL: AtomicU64 = AtomicU64::new(0);

/// Commands that completed successfully (monotonic counter).
#[must_use]
pub fn commands_applied_total() -> u64 {
    COMMANDS_APPLIED_TOTAL.load(Ordering::Relaxed)
}

/// Commands that returned an error (monotonic counter).
#[must_use]
pub fn commands_rejected_total() -> u64 {
    COMMANDS_REJECTED_TOTAL.load(Ordering::Relaxed)
}

// ---------------------------------------------------------------------------
// Command span
// ---------------------------------------------------------------------------

/// Run one session command inside a `folio.command` span.
pub(crate) fn trace_command<T, E, F>(command: &'static str, f: F) -> Result<T, E>
where
    E: std::fmt::Display,
    F: FnOnce() -> Result<T, E>,
{
    let start = Instant::now();
    let _span = tracing::debug_span!(
        target: "folio.command",
        "folio.command",
        command = command,
    )
    .entered();

    let result = f();
    let duration_us = start.elapsed().as_micros() as u64;

    match &result {
        Ok(_) => {
            COMMANDS_APPLIED_TOTAL.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(
                target: "folio.session",
                command = command,
                duration_us = duration_us,
                "command applied"
            );
        }
        Err(err) => {
            COMMANDS_REJECTED_TOTAL.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(
                target: "folio.session",
                command = command,
                duration_us = duration_us,
                error = %err,
                "command rejected"
            );
        }
    }
    result
}
