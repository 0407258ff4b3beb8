//! Rewind CLI - rw command

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cmd;

/// Rewind - per-file version tracking with reverse deltas
#[derive(Parser)]
#[command(name = "rw")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a repository in the current directory
    Init,
    /// Start tracking a file
    Add {
        /// File to track
        path: PathBuf,
    },
    /// Record a new version of a tracked file
    Update {
        /// Tracked file
        path: PathBuf,
    },
    /// Show changes between the working copy and the last recorded version
    Diff {
        /// Tracked file
        path: PathBuf,
    },
    /// Restore a tracked file to a recorded version
    Get {
        /// Tracked file
        path: PathBuf,
        /// Version to restore
        version: u64,
        /// Overwrite local modifications
        #[arg(long)]
        force: bool,
    },
    /// List recorded versions of a tracked file
    Log {
        /// Tracked file
        path: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init => cmd::init::run(),
        Commands::Add { path } => cmd::add::run(&path),
        Commands::Update { path } => cmd::update::run(&path),
        Commands::Diff { path } => cmd::diff::run(&path),
        Commands::Get {
            path,
            version,
            force,
        } => cmd::get::run(&path, version, force),
        Commands::Log { path } => cmd::log::run(&path),
    };

    if let Err(err) = result {
        eprintln!("{err}");
        std::process::exit(exit_code(&err));
    }
}

/// Map core error kinds to the documented exit codes.
fn exit_code(err: &anyhow::Error) -> i32 {
    use rewind_core::Error;

    match err.downcast_ref::<Error>() {
        Some(Error::NotInRepository(_)) => 1,
        Some(Error::RedundantOperation(_) | Error::NoChange(_)) => 2,
        Some(Error::FileChanged(_)) => 3,
        Some(Error::VersionNotFound { .. }) => 4,
        Some(Error::RestoreFailed { .. }) => 5,
        Some(Error::DeltaToolFailure(_)) => 6,
        _ => 1,
    }
}
