//! Tracing initialization for consumers, tools, and tests.

use tracing_subscriber::EnvFilter;

/// Initialize a global tracing subscriber.
///
/// The filter comes from `TOETS_LOG` (same syntax as `RUST_LOG`),
/// defaulting to `info`. Safe to call more than once: later calls are
/// no-ops, so tests and embedding applications can both call it.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env("TOETS_LOG")
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
