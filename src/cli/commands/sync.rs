//! Synchronize managed directories from the remote repository.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::cli::Output;
use crate::config::Settings;
use crate::git::SystemGit;
use crate::sync::{DirectoryChange, SyncManager, SyncRequest};

#[derive(Parser)]
pub struct SyncArgs {
    /// Remote repository URL (defaults to the configured repository)
    #[arg(long)]
    pub repo: Option<String>,

    /// Git ref (branch, tag, or commit) to sync
    #[arg(long = "ref")]
    pub reference: Option<String>,

    /// Target project path
    #[arg(long, default_value = ".")]
    pub target: PathBuf,

    /// Show planned changes without writing files
    #[arg(long)]
    pub dry_run: bool,

    /// Bypass the dirty-tree check for managed directories
    #[arg(long)]
    pub force: bool,
}

pub fn execute(args: SyncArgs, output: &Output) -> Result<()> {
    let settings = Settings::load()?;
    let request = SyncRequest {
        target: args.target,
        repo_url: args.repo.unwrap_or(settings.repo),
        reference: args.reference.or(settings.reference),
        dry_run: args.dry_run,
        force: args.force,
    };

    output.step(&format!("Syncing from {}", request.repo_url));
    output.verbose(&format!("Target: {}", request.target.display()));

    let git = SystemGit;
    let outcome = SyncManager::new(&git).sync(&request)?;

    if outcome.changes.is_empty() {
        output.warning("Remote repository contains no managed directories");
        return Ok(());
    }

    if outcome.dry_run {
        output.info("Dry run, no files were written");
        for planned in &outcome.changes {
            let action = match planned.change {
                DirectoryChange::Create => "would create",
                DirectoryChange::Replace => "would replace",
            };
            output.list_item(&format!("{action} {}", planned.directory));
        }
        return Ok(());
    }

    if let Some(timestamp) = &outcome.backup {
        output.info(&format!("Existing directories backed up as {timestamp}"));
    }
    for planned in &outcome.changes {
        output.list_item(&planned.directory);
    }
    output.success("Sync complete");
    Ok(())
}
