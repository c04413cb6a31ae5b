//! Tracing subscriber setup
//!
//! Logs go to stderr so stdout stays clean for exported JSON/CSV.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Installs the global subscriber
///
/// `RUST_LOG` wins when set; otherwise `verbose` selects debug over info.
pub fn init_logger(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}
