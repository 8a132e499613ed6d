//! `overseed init [-b BASEDIR]`

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use overseed_core::environment;

use super::BasedirArg;

#[derive(Args, Debug)]
pub struct InitArgs {
    #[command(flatten)]
    pub basedir: BasedirArg,
}

impl InitArgs {
    pub fn run(self) -> Result<()> {
        let basedir = self.basedir.resolve()?;
        let env = environment::create(&basedir)?;

        println!("{} Initialized overseed in {}", "✓".green(), basedir.display());
        println!("  Config: {}", env.config_path().display());
        Ok(())
    }
}
