//! List backup snapshots available for rollback.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::cli::Output;
use crate::sync::BackupStore;

#[derive(Parser)]
pub struct BackupsArgs {
    /// Target project path
    #[arg(long, default_value = ".")]
    pub target: PathBuf,
}

pub fn execute(args: BackupsArgs, output: &Output) -> Result<()> {
    let target = std::path::absolute(&args.target)?;
    let timestamps = BackupStore::new(&target).list()?;

    if timestamps.is_empty() {
        output.info("No backups found");
        return Ok(());
    }

    output.header("Available backups");
    for timestamp in &timestamps {
        output.list_item(timestamp);
    }
    Ok(())
}
