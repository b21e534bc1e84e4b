//! Git integration layer.
//!
//! The orchestrator talks to version control through the narrow
//! [`GitClient`] interface. [`SystemGit`] implements it with the system git
//! binary for network operations and git2 for local repository queries,
//! which keeps the sync workflow testable against a fake client.

mod inspect;
mod remote;

use std::path::{Path, PathBuf};

use crate::error::SyncError;

/// Narrow version-control interface: clone at a ref, discover the working
/// copy root, and query status for a set of paths.
pub trait GitClient {
    /// Produce a working copy of `url` at `reference` under `destination`.
    fn clone_at_ref(
        &self,
        url: &str,
        reference: Option<&str>,
        destination: &Path,
    ) -> Result<(), SyncError>;

    /// Top-level working directory containing `path`, or `None` when the
    /// path is not inside a git working copy.
    fn find_root(&self, path: &Path) -> Option<PathBuf>;

    /// Whether git status reports any pending change for `paths`, given
    /// relative to `root`.
    fn status_dirty(&self, root: &Path, paths: &[PathBuf]) -> Result<bool, SyncError>;
}

/// [`GitClient`] backed by the real git tooling
pub struct SystemGit;

impl GitClient for SystemGit {
    fn clone_at_ref(
        &self,
        url: &str,
        reference: Option<&str>,
        destination: &Path,
    ) -> Result<(), SyncError> {
        remote::clone_at_ref(url, reference, destination)
    }

    fn find_root(&self, path: &Path) -> Option<PathBuf> {
        inspect::find_root(path)
    }

    fn status_dirty(&self, root: &Path, paths: &[PathBuf]) -> Result<bool, SyncError> {
        inspect::status_dirty(root, paths)
    }
}

/// Return true if any existing managed directory under `target` has
/// uncommitted changes.
///
/// The check is advisory: a target outside version control, an absent
/// directory set, or a failing status query all report clean rather than
/// blocking the caller.
pub fn has_uncommitted_changes(
    git: &dyn GitClient,
    target: &Path,
    directories: &[&str],
) -> bool {
    let Some(root) = git.find_root(target) else {
        tracing::debug!("{} is not inside a git working copy", target.display());
        return false;
    };

    let mut pending = Vec::new();
    for name in directories {
        let directory = target.join(name);
        if !directory.exists() {
            continue;
        }
        // Canonicalize so the prefix comparison survives symlinked targets.
        let Ok(resolved) = directory.canonicalize() else {
            continue;
        };
        if let Ok(relative) = resolved.strip_prefix(&root) {
            pending.push(relative.to_path_buf());
        }
    }
    if pending.is_empty() {
        return false;
    }

    git.status_dirty(&root, &pending).unwrap_or(false)
}
