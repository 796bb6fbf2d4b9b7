//! Log output for the devscope binary.
//!
//! Library crates only emit `tracing` events. This module installs the
//! subscriber that prints them. `RUST_LOG` takes precedence over the level
//! passed in, so `RUST_LOG=devscope_view=trace` works without a flag.
//! Output goes to stderr to keep stdout free for views and JSON.

use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, registry};

/// Crates whose events the default filter enables.
const CRATES: &[&str] = &[
    "devscope",
    "devscope_foundation",
    "devscope_trace",
    "devscope_view",
    "devscope_runtime",
];

/// Builds the default filter directive for a level, e.g. `devscope_trace=info`.
#[must_use]
pub fn default_directive(level: &str) -> String {
    CRATES
        .iter()
        .map(|name| format!("{name}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Installs the global subscriber.
///
/// Returns false if a subscriber was already installed.
pub fn init_logging(level: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(level)));

    registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_level(true),
        )
        .with(filter)
        .try_init()
        .is_ok()
}
