//! Sync orchestration: safety gate, fetch, backup, apply.

use std::path::Path;

use tracing::{debug, info};

use crate::config::{MANAGED_DIRECTORIES, TMP_PREFIX};
use crate::error::SyncError;
use crate::git::{self, GitClient};

use super::backup::{BackupStore, replace_directory};
use super::{DirectoryChange, PlannedChange, SyncOutcome, SyncRequest};

/// Composes the fetcher, inspector, and backup store into the
/// sync-with-safety-net workflow.
pub struct SyncManager<'a> {
    git: &'a dyn GitClient,
}

impl<'a> SyncManager<'a> {
    pub fn new(git: &'a dyn GitClient) -> Self {
        Self { git }
    }

    /// Run one sync. Steps, in order: resolve target, dirty-tree gate,
    /// fetch into a scoped working copy, dry-run exit, snapshot, apply.
    /// Any failing step aborts the run; the working copy is removed on
    /// every exit path.
    pub fn sync(&self, request: &SyncRequest) -> Result<SyncOutcome, SyncError> {
        let target = std::path::absolute(&request.target)?;

        // The gate runs before any network work; a failed gate leaves the
        // target untouched.
        if !request.force
            && git::has_uncommitted_changes(self.git, &target, &MANAGED_DIRECTORIES)
        {
            return Err(SyncError::DirtyTree);
        }

        let workdir = tempfile::Builder::new().prefix(TMP_PREFIX).tempdir()?;
        let checkout = workdir.path().join("checkout");
        self.git
            .clone_at_ref(&request.repo_url, request.reference.as_deref(), &checkout)?;

        let changes = plan_changes(&checkout, &target);
        if request.dry_run {
            debug!("dry run, leaving target untouched");
            return Ok(SyncOutcome {
                backup: None,
                changes,
                dry_run: true,
            });
        }

        // The snapshot must land before any live directory is deleted.
        let store = BackupStore::new(&target);
        let backup = store.snapshot(&MANAGED_DIRECTORIES)?;
        if let Some(timestamp) = &backup {
            info!("backed up existing directories as {timestamp}");
        }

        for planned in &changes {
            replace_directory(&checkout.join(&planned.directory), &target, &planned.directory)?;
            info!("applied {}", planned.directory);
        }

        Ok(SyncOutcome {
            backup,
            changes,
            dry_run: false,
        })
    }
}

/// Which managed directories the fetched copy will create or replace.
/// Directories absent from the fetched copy are left alone.
fn plan_changes(checkout: &Path, target: &Path) -> Vec<PlannedChange> {
    MANAGED_DIRECTORIES
        .iter()
        .filter(|name| checkout.join(name).is_dir())
        .map(|name| PlannedChange {
            directory: name.to_string(),
            change: if target.join(name).is_dir() {
                DirectoryChange::Replace
            } else {
                DirectoryChange::Create
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::fs;
    use std::path::{Path, PathBuf};

    use fs_extra::dir::CopyOptions;
    use tempfile::TempDir;

    use super::SyncManager;
    use crate::config::BACKUP_ROOT_NAME;
    use crate::error::SyncError;
    use crate::git::GitClient;
    use crate::sync::{BackupStore, DirectoryChange, SyncRequest};

    /// Serves a fixture directory as the remote repository and records
    /// whether the fetcher was ever invoked.
    struct FakeGit {
        remote: PathBuf,
        root: Option<PathBuf>,
        dirty: bool,
        fail_fetch: bool,
        clones: Cell<usize>,
    }

    impl FakeGit {
        fn serving(remote: &Path) -> Self {
            Self {
                remote: remote.to_path_buf(),
                root: None,
                dirty: false,
                fail_fetch: false,
                clones: Cell::new(0),
            }
        }
    }

    impl GitClient for FakeGit {
        fn clone_at_ref(
            &self,
            _url: &str,
            _reference: Option<&str>,
            destination: &Path,
        ) -> Result<(), SyncError> {
            self.clones.set(self.clones.get() + 1);
            if self.fail_fetch {
                return Err(SyncError::Fetch("remote unreachable".to_string()));
            }
            fs::create_dir_all(destination)?;
            for entry in fs::read_dir(&self.remote)? {
                let entry = entry?;
                if entry.path().is_dir() {
                    fs_extra::dir::copy(entry.path(), destination, &CopyOptions::new())?;
                }
            }
            Ok(())
        }

        fn find_root(&self, _path: &Path) -> Option<PathBuf> {
            self.root.clone()
        }

        fn status_dirty(&self, _root: &Path, _paths: &[PathBuf]) -> Result<bool, SyncError> {
            Ok(self.dirty)
        }
    }

    fn write_file(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    /// Remote fixture carrying both managed directories.
    fn remote_fixture(temp: &TempDir) -> PathBuf {
        let remote = temp.path().join("remote");
        write_file(&remote, ".cursor/rules.md", "remote rules");
        write_file(&remote, ".claude/settings.json", "{\"remote\": true}");
        remote
    }

    fn request(target: &Path) -> SyncRequest {
        SyncRequest {
            target: target.to_path_buf(),
            repo_url: "https://example.com/config.git".to_string(),
            reference: None,
            dry_run: false,
            force: false,
        }
    }

    #[test]
    fn dirty_target_blocks_sync_before_any_fetch() {
        let temp = TempDir::new().unwrap();
        let remote = remote_fixture(&temp);
        let target = temp.path().join("project");
        write_file(&target, ".cursor/local.md", "local edits");

        let mut git = FakeGit::serving(&remote);
        git.root = Some(target.canonicalize().unwrap());
        git.dirty = true;

        let err = SyncManager::new(&git).sync(&request(&target)).unwrap_err();

        assert!(matches!(err, SyncError::DirtyTree));
        assert_eq!(git.clones.get(), 0);
        assert_eq!(
            fs::read_to_string(target.join(".cursor/local.md")).unwrap(),
            "local edits"
        );
        assert!(!target.join(BACKUP_ROOT_NAME).exists());
    }

    #[test]
    fn force_bypasses_dirty_check() {
        let temp = TempDir::new().unwrap();
        let remote = remote_fixture(&temp);
        let target = temp.path().join("project");
        write_file(&target, ".cursor/local.md", "local edits");

        let mut git = FakeGit::serving(&remote);
        git.root = Some(target.canonicalize().unwrap());
        git.dirty = true;

        let mut req = request(&target);
        req.force = true;
        let outcome = SyncManager::new(&git).sync(&req).unwrap();

        assert!(outcome.backup.is_some());
        assert_eq!(
            fs::read_to_string(target.join(".cursor/rules.md")).unwrap(),
            "remote rules"
        );
    }

    #[test]
    fn dry_run_reports_plan_without_mutation() {
        let temp = TempDir::new().unwrap();
        let remote = remote_fixture(&temp);
        let target = temp.path().join("project");
        write_file(&target, ".cursor/local.md", "local edits");

        let git = FakeGit::serving(&remote);
        let mut req = request(&target);
        req.dry_run = true;
        let outcome = SyncManager::new(&git).sync(&req).unwrap();

        assert!(outcome.dry_run);
        assert!(outcome.backup.is_none());
        let changes: Vec<(&str, DirectoryChange)> = outcome
            .changes
            .iter()
            .map(|planned| (planned.directory.as_str(), planned.change))
            .collect();
        assert_eq!(
            changes,
            vec![
                (".cursor", DirectoryChange::Replace),
                (".claude", DirectoryChange::Create),
            ]
        );
        assert_eq!(
            fs::read_to_string(target.join(".cursor/local.md")).unwrap(),
            "local edits"
        );
        assert!(!target.join(".claude").exists());
        assert!(!target.join(BACKUP_ROOT_NAME).exists());
    }

    #[test]
    fn empty_target_gets_both_directories_without_backup() {
        let temp = TempDir::new().unwrap();
        let remote = remote_fixture(&temp);
        let target = temp.path().join("project");
        fs::create_dir_all(&target).unwrap();

        let git = FakeGit::serving(&remote);
        let outcome = SyncManager::new(&git).sync(&request(&target)).unwrap();

        assert!(outcome.backup.is_none());
        assert_eq!(outcome.changes.len(), 2);
        assert!(
            outcome
                .changes
                .iter()
                .all(|planned| planned.change == DirectoryChange::Create)
        );
        assert_eq!(
            fs::read_to_string(target.join(".claude/settings.json")).unwrap(),
            "{\"remote\": true}"
        );
    }

    #[test]
    fn rollback_of_sync_backup_restores_pre_sync_content() {
        let temp = TempDir::new().unwrap();
        let remote = remote_fixture(&temp);
        let target = temp.path().join("project");
        write_file(&target, ".cursor/local.md", "pre-sync");

        let git = FakeGit::serving(&remote);
        let outcome = SyncManager::new(&git).sync(&request(&target)).unwrap();
        let timestamp = outcome.backup.expect(".cursor existed before the sync");

        assert!(!target.join(".cursor/local.md").exists());

        let store = BackupStore::new(&target);
        store
            .restore(&timestamp, &[".cursor", ".claude"])
            .unwrap();
        assert_eq!(
            fs::read_to_string(target.join(".cursor/local.md")).unwrap(),
            "pre-sync"
        );
        // .claude was not in the snapshot and stays as the sync left it.
        assert_eq!(
            fs::read_to_string(target.join(".claude/settings.json")).unwrap(),
            "{\"remote\": true}"
        );
    }

    #[test]
    fn fetch_failure_leaves_target_untouched() {
        let temp = TempDir::new().unwrap();
        let remote = remote_fixture(&temp);
        let target = temp.path().join("project");
        write_file(&target, ".cursor/local.md", "local edits");

        let mut git = FakeGit::serving(&remote);
        git.fail_fetch = true;

        let err = SyncManager::new(&git).sync(&request(&target)).unwrap_err();

        assert!(matches!(err, SyncError::Fetch(_)));
        assert_eq!(
            fs::read_to_string(target.join(".cursor/local.md")).unwrap(),
            "local edits"
        );
        assert!(!target.join(BACKUP_ROOT_NAME).exists());
    }
}
