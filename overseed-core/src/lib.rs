//! Overseed core library — environment layout, config documents, pid records.
//!
//! - [`environment`] — create / destroy / resolve the `.overseed/` tree
//! - [`config`] — load / save / default the per-environment YAML config
//! - [`pid`] — advisory daemon record kept in the environment's pid file
//! - [`types`] — domain structs shared with the daemon and cli crates
//! - [`error`] — [`OverseedError`]

pub mod config;
pub mod environment;
pub mod error;
pub mod pid;
pub mod types;

pub use environment::Environment;
pub use error::OverseedError;
pub use types::{Config, DaemonPid};
