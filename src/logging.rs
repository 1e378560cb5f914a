//! Tracing subscriber setup.
//!
//! Diagnostics go to stderr so stdout carries nothing but result lines.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{prelude::*, EnvFilter};

/// Install the global subscriber.
///
/// `RUST_LOG` takes precedence; otherwise the level is `warn`, or `debug`
/// when `verbose` is set.
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };

    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}
