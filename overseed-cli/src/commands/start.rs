//! `overseed start [-b BASEDIR] [-r|--no-daemonize]`

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use overseed_core::environment;
use overseed_daemon::DaemonController;

use super::BasedirArg;

#[derive(Args, Debug)]
pub struct StartArgs {
    #[command(flatten)]
    pub basedir: BasedirArg,

    /// Run the watch loop in this process instead of detaching.
    #[arg(short = 'r', long = "no-daemonize")]
    pub no_daemonize: bool,
}

impl StartArgs {
    pub fn run(self) -> Result<()> {
        let basedir = self.basedir.resolve()?;
        let env = environment::resolve(&basedir)?;
        let controller = DaemonController::for_current_exe()?;

        let pid = controller
            .start(&env, self.no_daemonize)
            .context("failed to start overseed")?;

        println!("{} Watching {} (pid {pid})", "✓".green(), basedir.display());
        println!("  Log: {}", env.log_path().display());
        Ok(())
    }
}
