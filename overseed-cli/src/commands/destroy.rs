//! `overseed destroy [-b BASEDIR]`

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use overseed_core::{environment, pid};

use super::BasedirArg;

#[derive(Args, Debug)]
pub struct DestroyArgs {
    #[command(flatten)]
    pub basedir: BasedirArg,
}

impl DestroyArgs {
    pub fn run(self) -> Result<()> {
        let basedir = self.basedir.resolve()?;
        let env = environment::resolve(&basedir)?;
        pid::ensure_not_running(&env)?;
        environment::destroy(&basedir)?;

        println!("{} Removed {}", "✓".green(), env.root().display());
        Ok(())
    }
}
