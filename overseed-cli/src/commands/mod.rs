//! One module per subcommand, plus the `-b/--basedir` flag they all share.

pub mod destroy;
pub mod init;
pub mod start;
pub mod status;
pub mod stop;
pub mod watch;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

#[derive(Args, Debug, Clone)]
pub struct BasedirArg {
    /// Directory to watch. Defaults to the current directory.
    #[arg(short = 'b', long = "basedir", value_name = "BASEDIR")]
    pub basedir: Option<PathBuf>,
}

impl BasedirArg {
    /// Absolute, symlink-free base directory.
    pub fn resolve(&self) -> Result<PathBuf> {
        let dir = match &self.basedir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir().context("cannot determine current directory")?,
        };
        dir.canonicalize()
            .with_context(|| format!("cannot resolve base directory '{}'", dir.display()))
    }
}
