//! Diagnostic logging via `tracing`.
//!
//! Logs go to stderr so they never mix with command output. The default level
//! is `warn`; each `-v` raises it one step. `RUST_LOG` wins over both.

use tracing_subscriber::EnvFilter;

/// Map the `-v` count to a default filter directive
pub fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. Safe to call more than once.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("piper={}", level_for(verbosity))));

    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .compact()
        .try_init();
}
