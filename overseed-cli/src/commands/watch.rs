//! Hidden `overseed watch` — what the detached daemon actually runs.

use anyhow::{Context, Result};
use clap::Args;

use overseed_core::{environment, pid, DaemonPid};
use overseed_daemon::{ShellExecutor, WatchLoop};

use super::BasedirArg;

#[derive(Args, Debug)]
pub struct WatchArgs {
    #[command(flatten)]
    pub basedir: BasedirArg,
}

impl WatchArgs {
    pub fn run(self) -> Result<()> {
        let env = environment::resolve(&self.basedir.resolve()?)?;

        let err = match WatchLoop::new(env.clone(), ShellExecutor::new()).run() {
            Ok(never) => match never {},
            Err(err) => err,
        };

        // Only drop the record if it is ours; a newer daemon may own it.
        if pid::read_pid(&env) == Some(DaemonPid::from(std::process::id())) {
            pid::clear(&env).context("failed to clear pid record after loop exit")?;
        }
        Err(err).context("watch loop exited")
    }
}
