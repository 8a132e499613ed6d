//! On-disk watch environment.
//!
//! # Storage layout
//!
//! ```text
//! <basedir>/
//!   .overseed/
//!     config/
//!       overseed.yml   (mode 0600, written on init)
//!     pid/
//!       overseed.pid   (present only while a daemon is believed running)
//!     log/
//!       overseed.log   (detached daemon stdout/stderr, created on start)
//! ```
//!
//! An environment exists iff `<basedir>/.overseed/` exists.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::config;
use crate::error::{io_err, OverseedError};

pub const ENV_DIR: &str = ".overseed";
pub const CONFIG_DIR: &str = "config";
pub const PID_DIR: &str = "pid";
pub const LOG_DIR: &str = "log";

pub const CONFIG_FILE: &str = "overseed.yml";
pub const PID_FILE: &str = "overseed.pid";
pub const LOG_FILE: &str = "overseed.log";

// ---------------------------------------------------------------------------
// 1. Path helpers
// ---------------------------------------------------------------------------

/// Paths of one environment, rooted at a base directory. Pure; no I/O except
/// [`Environment::exists`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    basedir: PathBuf,
}

impl Environment {
    pub fn at(basedir: impl Into<PathBuf>) -> Self {
        Self {
            basedir: basedir.into(),
        }
    }

    /// The watched directory.
    pub fn basedir(&self) -> &Path {
        &self.basedir
    }

    /// `<basedir>/.overseed/`
    pub fn root(&self) -> PathBuf {
        self.basedir.join(ENV_DIR)
    }

    pub fn config_dir(&self) -> PathBuf {
        self.root().join(CONFIG_DIR)
    }

    pub fn pid_dir(&self) -> PathBuf {
        self.root().join(PID_DIR)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.root().join(LOG_DIR)
    }

    /// `<basedir>/.overseed/config/overseed.yml`
    pub fn config_path(&self) -> PathBuf {
        self.config_dir().join(CONFIG_FILE)
    }

    /// `<basedir>/.overseed/pid/overseed.pid`
    pub fn pid_path(&self) -> PathBuf {
        self.pid_dir().join(PID_FILE)
    }

    /// `<basedir>/.overseed/log/overseed.log`
    pub fn log_path(&self) -> PathBuf {
        self.log_dir().join(LOG_FILE)
    }

    pub fn exists(&self) -> bool {
        self.root().is_dir()
    }
}

// ---------------------------------------------------------------------------
// 2. Lifecycle
// ---------------------------------------------------------------------------

/// Create the environment tree under `basedir` and write the default config.
///
/// Returns `EnvironmentAlreadyExists` without touching anything if the
/// environment directory is already present.
pub fn create(basedir: &Path) -> Result<Environment, OverseedError> {
    let env = Environment::at(basedir);
    if env.exists() {
        return Err(OverseedError::EnvironmentAlreadyExists { path: env.root() });
    }

    for dir in [env.root(), env.config_dir(), env.pid_dir()] {
        std::fs::create_dir_all(&dir).map_err(|e| io_err(&dir, e))?;
        set_dir_permissions(&dir)?;
    }
    config::save(&env, &config::default_config())?;

    info!(root = %env.root().display(), "environment created");
    Ok(env)
}

/// Remove the whole environment tree.
///
/// The caller is responsible for checking that no daemon is recorded first
/// (see [`crate::pid::ensure_not_running`]).
pub fn destroy(basedir: &Path) -> Result<(), OverseedError> {
    let env = resolve(basedir)?;
    let root = env.root();
    std::fs::remove_dir_all(&root).map_err(|e| io_err(&root, e))?;
    info!(root = %root.display(), "environment destroyed");
    Ok(())
}

/// Return the environment for `basedir`, or `EnvironmentMissing`.
pub fn resolve(basedir: &Path) -> Result<Environment, OverseedError> {
    let env = Environment::at(basedir);
    if !env.exists() {
        return Err(OverseedError::EnvironmentMissing { path: env.root() });
    }
    Ok(env)
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

#[cfg(unix)]
pub(crate) fn set_dir_permissions(path: &Path) -> Result<(), OverseedError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o700))
        .map_err(|e| io_err(path, e))
}
#[cfg(not(unix))]
pub(crate) fn set_dir_permissions(_path: &Path) -> Result<(), OverseedError> {
    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
