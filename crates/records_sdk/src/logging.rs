//! Tracing setup for applications embedding the orchestrator.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs a compact console subscriber as the global default.
///
/// `RUST_LOG` takes precedence when set; otherwise records at `INFO` (or
/// `DEBUG` when `verbose`) and above are shown. Returns an error if a global
/// subscriber is already installed.
pub fn try_init(verbose: bool) -> Result<(), tracing_subscriber::util::TryInitError> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_level(true)
                .compact(),
        )
        .with(filter)
        .try_init()
}
