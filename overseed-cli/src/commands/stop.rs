//! `overseed stop [-b BASEDIR]`

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use overseed_core::environment;
use overseed_daemon::DaemonController;

use super::BasedirArg;

#[derive(Args, Debug)]
pub struct StopArgs {
    #[command(flatten)]
    pub basedir: BasedirArg,
}

impl StopArgs {
    pub fn run(self) -> Result<()> {
        let env = environment::resolve(&self.basedir.resolve()?)?;
        let pid = DaemonController::for_current_exe()?.stop(&env)?;

        println!("{} Stopped overseed (pid {pid})", "✓".green());
        Ok(())
    }
}
