//! Local repository inspection via git2.

use std::path::{Path, PathBuf};

use git2::{Repository, StatusOptions};

use crate::error::SyncError;

/// Top-level working directory of the repository containing `path`.
pub(crate) fn find_root(path: &Path) -> Option<PathBuf> {
    let repo = Repository::discover(path).ok()?;
    // Bare repositories have no working copy to inspect.
    let workdir = repo.workdir()?;
    workdir.canonicalize().ok()
}

/// True when git status reports pending changes for `paths` under `root`.
/// Untracked files count as pending, matching `git status --porcelain`.
pub(crate) fn status_dirty(root: &Path, paths: &[PathBuf]) -> Result<bool, SyncError> {
    let repo = Repository::open(root)?;
    let mut options = StatusOptions::new();
    options
        .include_untracked(true)
        .recurse_untracked_dirs(true)
        .include_ignored(false);
    for path in paths {
        options.pathspec(path.as_path());
    }
    let statuses = repo.statuses(Some(&mut options))?;
    Ok(!statuses.is_empty())
}
