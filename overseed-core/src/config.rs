//! Per-environment YAML config document.
//!
//! The config is re-read at the top of every watch cycle. A missing file is
//! healed by writing the defaults; a malformed file is a hard error and is
//! never replaced by defaults.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::environment::{set_dir_permissions, Environment};
use crate::error::{io_err, OverseedError};
use crate::types::{Config, DEFAULT_WATCHER_BINARY};

/// A fresh default config. Each call returns an independent value.
pub fn default_config() -> Config {
    Config {
        events: ["modify", "attrib", "move", "create", "delete"]
            .into_iter()
            .map(String::from)
            .collect(),
        exclude: vec![r"\.overseed".to_string(), r"\.git".to_string()],
        on_event: vec!["echo 'overseed: change detected'".to_string()],
        watcher_binary: PathBuf::from(DEFAULT_WATCHER_BINARY),
    }
}

/// Load the environment's config, writing the defaults first if the file is
/// missing.
///
/// Returns `OverseedError::ConfigUnreadable` (with path + serde_yaml line
/// context) on read failure or a malformed document.
pub fn load(env: &Environment) -> Result<Config, OverseedError> {
    let path = env.config_path();
    if !path.exists() {
        info!(path = %path.display(), "config missing; writing defaults");
        save(env, &default_config())?;
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| unreadable(&path, e))?;
    let config: Config = serde_yaml::from_str(&contents).map_err(|e| unreadable(&path, e))?;
    debug!(
        path = %path.display(),
        events = config.events.len(),
        exclude = config.exclude.len(),
        on_event = config.on_event.len(),
        "config loaded"
    );
    Ok(config)
}

/// Atomically overwrite the environment's config file.
///
/// Write flow: serialize → `overseed.yml.tmp` sibling → `chmod 0600` → `rename`.
pub fn save(env: &Environment, config: &Config) -> Result<(), OverseedError> {
    let dir = env.config_dir();
    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| io_err(&dir, e))?;
        set_dir_permissions(&dir)?;
    }

    let path = env.config_path();
    let tmp_path = path.with_extension("yml.tmp");

    let yaml = serde_yaml::to_string(config)?;
    std::fs::write(&tmp_path, yaml).map_err(|e| io_err(&tmp_path, e))?;
    set_file_permissions(&tmp_path)?;
    std::fs::rename(&tmp_path, &path).map_err(|e| io_err(&path, e))?;
    Ok(())
}

fn unreadable(
    path: &Path,
    source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
) -> OverseedError {
    OverseedError::ConfigUnreadable {
        path: path.to_path_buf(),
        source: source.into(),
    }
}

#[cfg(unix)]
fn set_file_permissions(path: &Path) -> Result<(), OverseedError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
        .map_err(|e| io_err(path, e))
}
#[cfg(not(unix))]
fn set_file_permissions(_path: &Path) -> Result<(), OverseedError> {
    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
