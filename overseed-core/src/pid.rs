//! Advisory daemon record.
//!
//! A readable, integer-parsable pid file means "a daemon is believed
//! running". Nothing here consults the OS process table.

use std::io::ErrorKind;

use tracing::{debug, warn};

use crate::environment::Environment;
use crate::error::{io_err, OverseedError};
use crate::types::DaemonPid;

/// Read the recorded pid.
///
/// An absent, unreadable, or non-numeric pid file all read as `None`.
pub fn read_pid(env: &Environment) -> Option<DaemonPid> {
    let path = env.pid_path();
    let contents = match std::fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == ErrorKind::NotFound => return None,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "pid file unreadable; treating as absent");
            return None;
        }
    };

    match contents.parse::<DaemonPid>() {
        Ok(pid) => Some(pid),
        Err(_) => {
            debug!(path = %path.display(), "pid file is not numeric; treating as absent");
            None
        }
    }
}

/// Persist `pid`, recreating the `pid/` directory if it has gone missing.
pub fn write_pid(env: &Environment, pid: DaemonPid) -> Result<(), OverseedError> {
    let dir = env.pid_dir();
    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| io_err(&dir, e))?;
    }
    let path = env.pid_path();
    std::fs::write(&path, format!("{pid}\n")).map_err(|e| io_err(&path, e))?;
    debug!(pid = %pid, path = %path.display(), "wrote pid file");
    Ok(())
}

/// Remove the pid file. Absent is fine.
pub fn clear(env: &Environment) -> Result<(), OverseedError> {
    let path = env.pid_path();
    match std::fs::remove_file(&path) {
        Ok(()) => {
            debug!(path = %path.display(), "removed pid file");
            Ok(())
        }
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
        Err(err) => Err(io_err(&path, err)),
    }
}

/// `AlreadyRunning` if a pid is recorded.
pub fn ensure_not_running(env: &Environment) -> Result<(), OverseedError> {
    match read_pid(env) {
        Some(pid) => Err(OverseedError::AlreadyRunning { pid }),
        None => Ok(()),
    }
}
