//! Sync domain types and orchestration.

pub mod backup;
pub mod manager;

use std::path::PathBuf;

pub use backup::BackupStore;
pub use manager::SyncManager;

/// One sync invocation, immutable after construction
#[derive(Debug, Clone)]
pub struct SyncRequest {
    /// Target project path
    pub target: PathBuf,
    /// Remote repository URL
    pub repo_url: String,
    /// Optional ref (branch, tag, or commit)
    pub reference: Option<String>,
    /// Report planned changes without writing files
    pub dry_run: bool,
    /// Bypass the dirty-tree check
    pub force: bool,
}

/// How applying the fetched copy affects one managed directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectoryChange {
    /// Present in the fetched copy only; a fresh directory is created
    Create,
    /// Present on both sides; the live copy is replaced
    Replace,
}

/// A managed directory the fetched copy will create or replace
#[derive(Debug, Clone)]
pub struct PlannedChange {
    pub directory: String,
    pub change: DirectoryChange,
}

/// Result of one sync run
#[derive(Debug)]
pub struct SyncOutcome {
    /// Timestamp of the pre-sync snapshot, when anything existed to back up
    pub backup: Option<String>,
    /// Managed directories applied, or planned for a dry run
    pub changes: Vec<PlannedChange>,
    pub dry_run: bool,
}
