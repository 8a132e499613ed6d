//! Overseed daemon: command runner, watch loop, and detached lifecycle.

mod error;
pub mod controller;
pub mod executor;
pub mod log_rotation;
pub mod logging;
pub mod watch;

pub use controller::{DaemonController, EntryPoint, ProcessSpawner, Spawner, WATCH_SUBCOMMAND};
pub use error::DaemonError;
pub use executor::{CommandExecutor, ShellExecutor};
pub use logging::init_tracing;
pub use watch::{watch_invocation, CycleOutcome, WatchLoop};
