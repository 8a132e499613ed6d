//! `overseed status [-b BASEDIR]` — reads the pid record only.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use overseed_core::environment;
use overseed_daemon::DaemonController;

use super::BasedirArg;

#[derive(Args, Debug)]
pub struct StatusArgs {
    #[command(flatten)]
    pub basedir: BasedirArg,
}

impl StatusArgs {
    pub fn run(self) -> Result<()> {
        let env = environment::resolve(&self.basedir.resolve()?)?;
        match DaemonController::for_current_exe()?.status(&env) {
            Some(pid) => println!("{} running (pid {pid})", "■".green().bold()),
            None => println!("{} not running", "■".red().bold()),
        }
        Ok(())
    }
}
