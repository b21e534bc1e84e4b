//! Command-line interface.
//!
//! Argument parsing via clap, logging setup at the entry point, and dispatch
//! into the command modules. Core components never touch process-wide log
//! state themselves; the subscriber configured here is the only sink.

use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod commands;
mod output;

pub use output::Output;

/// Synchronize AI assistant configuration directories from a remote repository
#[derive(Parser)]
#[command(name = "ai-config", version, about, propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Synchronize managed directories from the remote repository
    Sync(commands::sync::SyncArgs),
    /// Restore managed directories from a previous backup
    Rollback(commands::rollback::RollbackArgs),
    /// List backup snapshots available for rollback
    Backups(commands::backups::BackupsArgs),
}

impl Cli {
    /// Execute the parsed command
    pub fn run(self) -> Result<()> {
        setup_logging(self.verbose, self.quiet);
        let output = Output::new(self.verbose, self.quiet);

        match self.command {
            Commands::Sync(args) => commands::sync::execute(args, &output),
            Commands::Rollback(args) => commands::rollback::execute(args, &output),
            Commands::Backups(args) => commands::backups::execute(args, &output),
        }
    }
}

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return;
    }

    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            tracing_subscriber::EnvFilter::new("debug")
        } else {
            tracing_subscriber::EnvFilter::new("warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
