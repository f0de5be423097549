//! Log subscriber setup.
//!
//! The library only emits `tracing` events (decode failures, config loads);
//! the binary installs the subscriber. Events go to stderr so stdout stays
//! clean for URLs and JSON. `RUST_LOG` overrides the default level.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Install the global subscriber. `verbose` lowers the default level from
/// `warn` to `info`.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    };
    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}
