//! The watch loop: block on the external watch tool, react, repeat.
//!
//! Each cycle reloads the config, so edits apply from the next cycle. A
//! non-zero exit from the watch tool or from any reaction command is logged
//! and swallowed; only config and filesystem failures end the loop.

use std::borrow::Cow;
use std::convert::Infallible;

use tracing::{debug, info, warn};

use overseed_core::{config, Config, Environment};

use crate::error::{io_err, DaemonError};
use crate::executor::CommandExecutor;

// ---------------------------------------------------------------------------
// Watch tool invocation
// ---------------------------------------------------------------------------

/// Command line for one blocking watch-tool call.
///
/// `<inotifywait> -r [-e ev1,ev2,…] [--exclude '(p1|p2|…)'] .`
///
/// The event and exclude filters are omitted when their lists are empty;
/// list order is preserved in both.
pub fn watch_invocation(config: &Config) -> String {
    let binary = config.watcher_binary.to_string_lossy();
    let mut words: Vec<Cow<'_, str>> = vec![shell_word(&binary), Cow::Borrowed("-r")];

    if !config.events.is_empty() {
        words.push(Cow::Borrowed("-e"));
        words.push(shell_word(&config.events.join(",")).into_owned().into());
    }
    if !config.exclude.is_empty() {
        let group = format!("({})", config.exclude.join("|"));
        words.push(Cow::Borrowed("--exclude"));
        words.push(shell_word(&group).into_owned().into());
    }

    words.push(Cow::Borrowed("."));
    words.join(" ")
}

/// Quote `word` for `sh` unless it is made only of characters the shell
/// passes through untouched.
fn shell_word(word: &str) -> Cow<'_, str> {
    let plain = !word.is_empty()
        && word
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./,=:+@%".contains(c));
    if plain {
        Cow::Borrowed(word)
    } else {
        Cow::Owned(format!("'{}'", word.replace('\'', r"'\''")))
    }
}

// ---------------------------------------------------------------------------
// Loop engine
// ---------------------------------------------------------------------------

/// What a single watch cycle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The watch tool reported a change; the reaction sequence ran.
    Reacted { failures: usize },
    /// The watch tool exited non-zero; nothing ran.
    Skipped { status: i32 },
}

pub struct WatchLoop<E> {
    env: Environment,
    executor: E,
}

impl<E: CommandExecutor> WatchLoop<E> {
    pub fn new(env: Environment, executor: E) -> Self {
        Self { env, executor }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    pub fn into_executor(self) -> E {
        self.executor
    }

    /// Load the config and run the reaction sequence once, before any change
    /// has been observed. Returns the number of failed reaction commands.
    pub fn prime(&mut self) -> Result<usize, DaemonError> {
        let config = config::load(&self.env)?;
        info!(commands = config.on_event.len(), "running initial reaction pass");
        Ok(self.react(&config))
    }

    /// One wait-and-react step.
    pub fn cycle(&mut self) -> Result<CycleOutcome, DaemonError> {
        let config = config::load(&self.env)?;
        let invocation = watch_invocation(&config);

        let status = self.executor.run(&invocation);
        if status != 0 {
            debug!(status, "watch tool exited without a qualifying change");
            return Ok(CycleOutcome::Skipped { status });
        }

        info!("change detected");
        let failures = self.react(&config);
        Ok(CycleOutcome::Reacted { failures })
    }

    /// Enter the base directory, prime, then cycle until an error.
    ///
    /// Relative paths, including the watch tool's exclude patterns, resolve
    /// against the base directory from here on.
    pub fn run(mut self) -> Result<Infallible, DaemonError> {
        let basedir = self.env.basedir().to_path_buf();
        let basedir = std::fs::canonicalize(&basedir).map_err(|e| io_err(&basedir, e))?;
        std::env::set_current_dir(&basedir).map_err(|e| io_err(&basedir, e))?;
        self.env = Environment::at(&basedir);
        info!(basedir = %basedir.display(), "watch loop starting");

        self.prime()?;
        loop {
            self.cycle()?;
        }
    }

    /// Run every reaction command in order, regardless of earlier failures.
    fn react(&mut self, config: &Config) -> usize {
        let mut failures = 0;
        for command in &config.on_event {
            let status = self.executor.run(command);
            if status != 0 {
                failures += 1;
                warn!(cmd = %command, status, "reaction command failed; continuing");
            }
        }
        failures
    }
}
