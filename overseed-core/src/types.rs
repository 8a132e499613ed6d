//! Domain types for an overseed environment.
//!
//! All path fields use `PathBuf`; never `&str` or `String` for filesystem paths.
//! The config document is serialized via serde + serde_yaml.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Default location of the external watch tool.
pub const DEFAULT_WATCHER_BINARY: &str = "/usr/bin/inotifywait";

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// Process id of a detached watch daemon, as recorded in the pid file.
///
/// Signed: any integer in the pid file counts as a record, even one no
/// process could have. Whether it is signallable is decided at stop time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DaemonPid(pub i64);

impl fmt::Display for DaemonPid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<u32> for DaemonPid {
    fn from(pid: u32) -> Self {
        Self(i64::from(pid))
    }
}

impl FromStr for DaemonPid {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

// ---------------------------------------------------------------------------
// Config document
// ---------------------------------------------------------------------------

/// Per-environment watch configuration.
///
/// Read fresh once per watch cycle, so operator edits apply from the next
/// cycle on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Event kinds passed to the watch tool, in order.
    #[serde(default)]
    pub events: Vec<String>,

    /// Regex fragments joined into a single exclusion group.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Shell command lines run in sequence after every qualifying change.
    #[serde(default)]
    pub on_event: Vec<String>,

    /// Path to the watch tool executable.
    #[serde(rename = "inotifywait", default = "default_watcher_binary")]
    pub watcher_binary: PathBuf,
}

fn default_watcher_binary() -> PathBuf {
    PathBuf::from(DEFAULT_WATCHER_BINARY)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
