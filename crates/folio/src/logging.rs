#![forbid(unsafe_code)]

//! Production logging setup.
//!
//! [`init`] installs a global subscriber that writes one JSON object per
//! event. The filter comes from `RUST_LOG` and falls back to
//! [`DEFAULT_FILTER`].

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "folio=info";

/// Install the JSON subscriber as the global default.
///
/// Fails if another global subscriber is already set.
pub fn init() -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .try_init()?;
    tracing::info!(target: "folio", "logging initialized");
    Ok(())
}
