//! `tracing-subscriber` setup shared by every overseed entry point.

use std::io::IsTerminal;

use tracing_subscriber::{fmt, EnvFilter};

/// Env var holding the log filter (`info`, `overseed_daemon=debug`, ...).
pub const LOG_ENV: &str = "OVERSEED_LOG";

/// Install the global subscriber, falling back to `default_filter` when
/// `OVERSEED_LOG` is unset or invalid. Later calls are no-ops.
///
/// Events go to stderr; a detached daemon's stderr is the environment log
/// file, so ANSI colours are only used on a terminal.
pub fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .try_init();
}
