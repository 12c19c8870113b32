//! Logging helpers for host applications
//!
//! The library only emits `tracing` events and never installs a global
//! subscriber on its own. Hosts without a subscriber of their own can
//! use these helpers.

use tracing_subscriber::{fmt, EnvFilter};

/// Install a global subscriber writing to stderr.
///
/// `RUST_LOG` overrides `level` when set. Panics if a global
/// subscriber is already installed.
pub fn init(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

/// Initialize logging for tests (logs to the test writer)
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
