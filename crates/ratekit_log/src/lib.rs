//! `ratekit_log` v1:
//! Shared tracing subscriber setup for ratekit binaries and tests.
//!
//! Filtering follows `RUST_LOG` (for example `RUST_LOG=ratekit_export=debug`),
//! falling back to [`C_LOG_FILTER_DEFAULT`]. Output goes to stderr so stdout
//! stays free for anything a caller pipes.

use tracing_subscriber::{EnvFilter, fmt};

/// Filter directive used when `RUST_LOG` is unset or invalid.
pub const C_LOG_FILTER_DEFAULT: &str = "info";

/// Install the global subscriber. Safe to call more than once; later calls are no-ops.
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(C_LOG_FILTER_DEFAULT));

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .try_init();
}

/// Install a verbose subscriber routed through the libtest capture writer.
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
