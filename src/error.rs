//! Error taxonomy for sync and rollback operations.

use thiserror::Error;

/// Errors that can abort a sync or rollback run
#[derive(Debug, Error)]
pub enum SyncError {
    /// Remote fetch or checkout failed after all attempts; carries the git
    /// diagnostic text
    #[error("fetch failed: {0}")]
    Fetch(String),

    /// Managed directories have uncommitted changes and --force was not given
    #[error("uncommitted changes in managed directories; commit, stash, or re-run with --force")]
    DirtyTree,

    /// Rollback addressed a timestamp with no matching backup folder
    #[error("no backup found for timestamp '{0}'")]
    SnapshotNotFound(String),

    /// Local repository query failed
    #[error("git error: {0}")]
    Git(#[from] git2::Error),

    /// Filesystem copy failed
    #[error("copy error: {0}")]
    Copy(#[from] fs_extra::error::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
