//! Internal diagnostics via tracing
//!
//! Diagnostics go to stderr and are separate from the daily log itself.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set
pub fn default_filter(debug: u8, verbose: u8) -> &'static str {
    match (debug, verbose) {
        (0, 0) => "dailylog=warn",
        (0, _) => "dailylog=info",
        (1, _) => "dailylog=debug",
        _ => "dailylog=trace",
    }
}

/// Install the stderr diagnostics subscriber
///
/// Call once, before any tracing calls.
pub fn init_diagnostics(debug: u8, verbose: u8) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(debug, verbose)));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .init();
}
