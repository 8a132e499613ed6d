//! Command runner used for both the watch tool and reaction commands.
//!
//! The watch loop talks to a [`CommandExecutor`] rather than spawning
//! processes itself, so tests can script exit codes without touching the OS.

use std::process::{Command, ExitStatus};

use tracing::{error, info, warn};

/// Exit code reported when a command could not be spawned or was killed by a
/// signal.
pub const UNKNOWN_EXIT: i32 = -1;

/// Run a shell command line to completion and report its exit status.
///
/// Implementations never fail: problems are reported through the returned
/// code (`0` = success).
pub trait CommandExecutor {
    fn run(&mut self, command_line: &str) -> i32;
}

/// Runs command lines through the platform shell, inheriting stdio.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShellExecutor;

impl ShellExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl CommandExecutor for ShellExecutor {
    fn run(&mut self, command_line: &str) -> i32 {
        info!(cmd = %command_line, "running command");

        let status = match shell_command(command_line).status() {
            Ok(status) => status,
            Err(err) => {
                error!(cmd = %command_line, error = %err, "failed to spawn shell");
                return UNKNOWN_EXIT;
            }
        };

        let code = exit_code(status);
        if code == 0 {
            info!(cmd = %command_line, "command exited");
        } else {
            warn!(cmd = %command_line, exit_code = code, "command failed");
        }
        code
    }
}

/// Build a shell command appropriate for the platform.
fn shell_command(command_line: &str) -> Command {
    if cfg!(windows) {
        let mut c = Command::new("cmd");
        c.arg("/C").arg(command_line);
        c
    } else {
        let mut c = Command::new("sh");
        c.arg("-c").arg(command_line);
        c
    }
}

fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(UNKNOWN_EXIT)
}
