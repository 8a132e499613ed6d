//! Daemon lifecycle: detach the watch loop, record its pid, signal it to stop.
//!
//! Liveness is whatever the pid file says. Two concurrent `start`s can both
//! pass the pid check; that race is accepted.

use std::ffi::OsString;
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::process::{Command, Stdio};

use tracing::{info, warn};

use overseed_core::{config, pid, DaemonPid, Environment, OverseedError};

use crate::error::{io_err, DaemonError};
use crate::executor::ShellExecutor;
use crate::log_rotation::rotate_daemon_log;
use crate::watch::WatchLoop;

/// Hidden CLI subcommand the detached process is started with.
pub const WATCH_SUBCOMMAND: &str = "watch";

// ---------------------------------------------------------------------------
// Detached process spawning
// ---------------------------------------------------------------------------

/// Program + arguments that run the watch loop for one environment, and
/// where its output goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryPoint {
    pub program: PathBuf,
    pub args: Vec<OsString>,
    pub log_path: PathBuf,
}

impl EntryPoint {
    /// `<program> watch --basedir <basedir>`, logging to the environment log.
    pub fn watch(program: impl Into<PathBuf>, env: &Environment) -> Self {
        Self {
            program: program.into(),
            args: vec![
                OsString::from(WATCH_SUBCOMMAND),
                OsString::from("--basedir"),
                env.basedir().as_os_str().to_os_string(),
            ],
            log_path: env.log_path(),
        }
    }
}

/// Starts an entry point in the background and reports its pid.
pub trait Spawner {
    fn run_detached(&self, entry: &EntryPoint) -> Result<u32, DaemonError>;
}

/// Spawns a real OS process in its own process group, with stdin from
/// `/dev/null` and stdout/stderr appended to the entry point's log file.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessSpawner;

impl Spawner for ProcessSpawner {
    fn run_detached(&self, entry: &EntryPoint) -> Result<u32, DaemonError> {
        if let Some(dir) = entry.log_path.parent() {
            fs::create_dir_all(dir).map_err(|e| io_err(dir, e))?;
        }
        let stdout = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&entry.log_path)
            .map_err(|e| io_err(&entry.log_path, e))?;
        let stderr = stdout.try_clone().map_err(|e| io_err(&entry.log_path, e))?;

        let mut cmd = Command::new(&entry.program);
        cmd.args(&entry.args)
            .stdin(Stdio::null())
            .stdout(Stdio::from(stdout))
            .stderr(Stdio::from(stderr));
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            cmd.process_group(0);
        }

        let child = cmd.spawn().map_err(|source| DaemonError::Spawn {
            program: entry.program.clone(),
            source,
        })?;
        Ok(child.id())
    }
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

pub struct DaemonController<S> {
    spawner: S,
    program: PathBuf,
}

impl DaemonController<ProcessSpawner> {
    /// Controller that re-executes the running binary as the daemon.
    pub fn for_current_exe() -> Result<Self, DaemonError> {
        let exe = std::env::current_exe().map_err(|e| io_err("current executable", e))?;
        Ok(Self::new(ProcessSpawner, exe))
    }
}

impl<S: Spawner> DaemonController<S> {
    pub fn new(spawner: S, program: impl Into<PathBuf>) -> Self {
        Self {
            spawner,
            program: program.into(),
        }
    }

    /// Start the watch loop for `env`.
    ///
    /// With `foreground`, the loop runs in this process and only returns on
    /// error. Otherwise the config is checked here, so a broken one fails the
    /// caller instead of the detached process, and then a detached process is
    /// spawned and its pid recorded.
    pub fn start(&self, env: &Environment, foreground: bool) -> Result<DaemonPid, DaemonError> {
        pid::ensure_not_running(env)?;

        if foreground {
            info!(basedir = %env.basedir().display(), "running watch loop in foreground");
            match WatchLoop::new(env.clone(), ShellExecutor::new()).run()? {}
        }

        config::load(env)?;
        rotate_daemon_log(env);
        let entry = EntryPoint::watch(&self.program, env);
        let pid = DaemonPid::from(self.spawner.run_detached(&entry)?);
        pid::write_pid(env, pid)?;

        info!(pid = %pid, log = %entry.log_path.display(), "daemon started");
        Ok(pid)
    }

    /// Signal the recorded daemon's process group and forget it.
    ///
    /// The daemon leads its own group, so the watch tool and any reaction
    /// command it is waiting on go down with it.
    /// The pid file is cleared whether or not the signal could be delivered.
    pub fn stop(&self, env: &Environment) -> Result<DaemonPid, DaemonError> {
        let pid = pid::read_pid(env).ok_or_else(|| OverseedError::NotRunning {
            path: env.pid_path(),
        })?;

        match terminate(pid) {
            Ok(()) => info!(pid = %pid, "sent termination signal"),
            Err(err) => warn!(pid = %pid, error = %err, "could not signal daemon; clearing record anyway"),
        }
        pid::clear(env)?;
        Ok(pid)
    }

    /// The recorded daemon pid, if any.
    pub fn status(&self, env: &Environment) -> Option<DaemonPid> {
        pid::read_pid(env)
    }

    pub fn spawner(&self) -> &S {
        &self.spawner
    }
}

#[cfg(unix)]
fn terminate(pid: DaemonPid) -> Result<(), String> {
    use nix::sys::signal::{kill, killpg, Signal};
    use nix::unistd::Pid;

    // 0 and negative values are not daemon pids; never pass them to kill(2).
    let raw = i32::try_from(pid.0)
        .ok()
        .filter(|raw| *raw > 0)
        .ok_or_else(|| format!("pid {pid} is not a signallable process"))?;
    let target = Pid::from_raw(raw);

    // A pid recorded by hand may not lead a group; fall back to the process.
    killpg(target, Signal::SIGTERM)
        .or_else(|_| kill(target, Signal::SIGTERM))
        .map_err(|errno| errno.to_string())
}

#[cfg(windows)]
fn terminate(pid: DaemonPid) -> Result<(), String> {
    let status = Command::new("taskkill")
        .args(["/PID", &pid.to_string(), "/F"])
        .status()
        .map_err(|e| e.to_string())?;
    if status.success() {
        Ok(())
    } else {
        Err(format!("taskkill exited with {status}"))
    }
}
