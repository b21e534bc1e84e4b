//! Restore managed directories from a backup snapshot.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::cli::Output;
use crate::config::MANAGED_DIRECTORIES;
use crate::sync::BackupStore;

#[derive(Parser)]
pub struct RollbackArgs {
    /// Backup timestamp to restore
    pub timestamp: String,

    /// Target project path
    #[arg(long, default_value = ".")]
    pub target: PathBuf,
}

pub fn execute(args: RollbackArgs, output: &Output) -> Result<()> {
    let target = std::path::absolute(&args.target)?;
    let store = BackupStore::new(&target);
    let restored = store.restore(&args.timestamp, &MANAGED_DIRECTORIES)?;
    output.success(&format!("Restored backup from {}", restored.display()));
    Ok(())
}
