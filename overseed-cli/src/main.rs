//! Overseed — run shell actions whenever a directory tree changes.
//!
//! # Usage
//!
//! ```text
//! overseed init    [-b BASEDIR]
//! overseed start   [-b BASEDIR] [-r|--no-daemonize]
//! overseed stop    [-b BASEDIR]
//! overseed destroy [-b BASEDIR]
//! overseed status  [-b BASEDIR]
//! ```

mod commands;

use std::io;
use std::process::ExitCode;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};

use commands::{
    destroy::DestroyArgs, init::InitArgs, start::StartArgs, status::StatusArgs, stop::StopArgs,
    watch::WatchArgs,
};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "overseed",
    version,
    about = "Watch a directory tree and run shell actions when it changes",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create the .overseed environment with a default config.
    Init(InitArgs),

    /// Start the watch loop (detached unless --no-daemonize).
    Start(StartArgs),

    /// Stop the detached watch loop.
    Stop(StopArgs),

    /// Remove the .overseed environment.
    Destroy(DestroyArgs),

    /// Show whether a watch loop is recorded as running.
    Status(StatusArgs),

    /// Entry point of the detached daemon.
    #[command(hide = true)]
    Watch(WatchArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> ExitCode {
    let cli = Cli::parse();
    let Some(command) = cli.command else {
        let _ = Cli::command().write_help(&mut io::stderr());
        return ExitCode::FAILURE;
    };

    // The daemon logs its loop at info; interactive commands stay quiet.
    let default_filter = match command {
        Commands::Watch(_) | Commands::Start(StartArgs { no_daemonize: true, .. }) => "info",
        _ => "warn",
    };
    overseed_daemon::init_tracing(default_filter);

    match run(command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Failure: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Init(args) => args.run(),
        Commands::Start(args) => args.run(),
        Commands::Stop(args) => args.run(),
        Commands::Destroy(args) => args.run(),
        Commands::Status(args) => args.run(),
        Commands::Watch(args) => args.run(),
    }
}
