// src/logging.rs

use tracing_subscriber::{fmt, EnvFilter};

/// Installs the global fmt subscriber.
///
/// `RUST_LOG` wins when set; otherwise `default_level` (e.g. "info") is used.
/// Events go to stderr so command output on stdout stays clean.
pub fn init(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .init();
}

/// Debug-level logging routed through the test harness writer.
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
