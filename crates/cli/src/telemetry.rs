//! Logging initialization.
//!
//! `RUST_LOG` wins when set; otherwise the `-v` count picks the level
//! (`warn` by default). Logs go to stderr; stdout only lists the reports
//! that were written.

use tracing_subscriber::EnvFilter;

pub fn init(verbosity: u8) {
    let fallback = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    // A subscriber may already be installed (e.g. by a test harness).
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
