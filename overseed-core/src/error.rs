//! Error types for overseed-core.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::DaemonPid;

/// All errors that can arise from environment, config, and pid operations.
///
/// Messages never repeat their `source`; callers print the chain.
#[derive(Debug, Error)]
pub enum OverseedError {
    /// No `.overseed/` directory under the base directory.
    #[error("no overseed environment at {path}; run `overseed init` first")]
    EnvironmentMissing { path: PathBuf },

    /// `init` against a base directory that already has an environment.
    #[error("an overseed environment already exists at {path}")]
    EnvironmentAlreadyExists { path: PathBuf },

    /// A pid file is present and parses.
    #[error("overseed is already running (pid {pid})")]
    AlreadyRunning { pid: DaemonPid },

    /// `stop` without a recorded pid.
    #[error("overseed is not running (no pid recorded at {path})")]
    NotRunning { path: PathBuf },

    /// Config file could not be read or is not a valid document.
    #[error("cannot read config at {path}")]
    ConfigUnreadable {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Underlying I/O failure, annotated with the path involved.
    #[error("I/O error at {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML serialization error (save path).
    #[error("YAML serialization error")]
    Yaml(#[from] serde_yaml::Error),
}

/// Convenience constructor for [`OverseedError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> OverseedError {
    OverseedError::Io {
        path: path.into(),
        source,
    }
}
