//! Tracing subscriber setup for hosts embedding the matcher.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install a compact fmt subscriber filtered by `RUST_LOG`, falling back to
/// `slotmatch_core=info` (or `debug` when `verbose`).
///
/// Returns `false` if a global subscriber was already installed.
pub fn init_logger(verbose: bool) -> bool {
    let default_directive = if verbose {
        "slotmatch_core=debug"
    } else {
        "slotmatch_core=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .compact(),
        )
        .try_init()
        .is_ok()
}
