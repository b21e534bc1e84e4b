//! # ai-config - Synchronized AI assistant configuration
//!
//! ai-config keeps a project's `.cursor` and `.claude` directories in sync
//! with a canonical remote repository, with a safety net:
//!
//! - **Dirty-tree gate**: uncommitted local edits to the managed directories
//!   block the sync unless `--force` is given
//! - **Backup before overwrite**: existing directories are snapshotted into a
//!   timestamped store inside the target before anything is replaced
//! - **Rollback**: any snapshot can be restored by timestamp
//!
//! ## Basic Usage
//!
//! ```bash
//! # Preview what a sync would change
//! ai-config sync --dry-run
//!
//! # Pull the configured repository into the current project
//! ai-config sync
//!
//! # Sync a specific ref into another project
//! ai-config sync --repo https://example.com/configs.git --ref v2 --target ../app
//!
//! # List snapshots, then restore one
//! ai-config backups
//! ai-config rollback 2024-01-01T00-00-00
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod git;
pub mod sync;

pub use error::SyncError;
