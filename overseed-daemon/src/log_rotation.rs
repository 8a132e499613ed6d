//! Size-based rotation of the detached daemon's log file.
//!
//! Checked once per `start`, before the new daemon opens the log:
//!   overseed.log → overseed.log.1 → … → overseed.log.5 (dropped)

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use overseed_core::Environment;

/// Rotate once the live log reaches 10 MiB.
pub const MAX_LOG_BYTES: u64 = 10 * 1024 * 1024;

/// Rotated backups kept next to the live log.
pub const MAX_ROTATED_FILES: usize = 5;

/// Shift `log_path` into `.1` if it is at least `max_bytes` long.
///
/// Returns `true` when a rotation happened. A missing log is not an error.
/// The live path is left absent afterwards; the next writer creates it.
pub fn rotate_if_needed(log_path: &Path, max_bytes: u64, max_files: usize) -> io::Result<bool> {
    let size = match fs::metadata(log_path) {
        Ok(meta) => meta.len(),
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(err) => return Err(err),
    };
    if size < max_bytes || max_files == 0 {
        return Ok(false);
    }

    match fs::remove_file(backup_path(log_path, max_files)) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => return Err(err),
    }
    for n in (1..max_files).rev() {
        let src = backup_path(log_path, n);
        if src.exists() {
            fs::rename(&src, backup_path(log_path, n + 1))?;
        }
    }
    fs::rename(log_path, backup_path(log_path, 1))?;
    Ok(true)
}

/// Rotate the environment's daemon log. Failures are logged, never returned:
/// a log that cannot rotate must not keep the daemon from starting.
pub fn rotate_daemon_log(env: &Environment) {
    let log_path = env.log_path();
    match rotate_if_needed(&log_path, MAX_LOG_BYTES, MAX_ROTATED_FILES) {
        Ok(true) => tracing::info!(path = %log_path.display(), "daemon log rotated"),
        Ok(false) => {}
        Err(err) => {
            tracing::warn!(path = %log_path.display(), error = %err, "daemon log rotation failed")
        }
    }
}

/// `overseed.log` + `n` → `overseed.log.n`
fn backup_path(base: &Path, n: usize) -> PathBuf {
    let mut name = base.file_name().unwrap_or_default().to_os_string();
    name.push(format!(".{n}"));
    base.with_file_name(name)
}
