//! Tracing initialization hooks.

use tracing_subscriber::{fmt, EnvFilter, prelude::*};

/// Initialize global tracing subscriber with env filter.
///
/// Logs go to stderr so rendered screens on stdout stay clean. `RUST_LOG`
/// wins over `verbosity` when set, e.g.:
/// RUST_LOG=debug,monopoly_client=trace,reqwest=info
pub fn init(verbosity: u8) {
    let fmt_layer = fmt::layer()
        .with_target(verbosity > 0)
        .with_writer(std::io::stderr);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbosity)));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

fn default_directives(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn,monopoly_client=info",
        1 => "info,monopoly_client=debug,reqwest=warn",
        _ => "debug,monopoly_client=trace,tokio_tungstenite=debug",
    }
}
