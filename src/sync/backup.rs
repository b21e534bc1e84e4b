//! Timestamped snapshots of managed directories.
//!
//! Snapshots live under a hidden store inside the target project, one
//! subdirectory per timestamp, one subdirectory per managed directory name
//! inside each timestamp. The store is append-only; restoring never deletes
//! other snapshots.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use fs_extra::dir::CopyOptions;
use tracing::debug;

use crate::config::BACKUP_ROOT_NAME;
use crate::error::SyncError;

/// On-disk snapshot store rooted inside a target project
pub struct BackupStore {
    target: PathBuf,
    root: PathBuf,
}

impl BackupStore {
    pub fn new(target: &Path) -> Self {
        Self {
            target: target.to_path_buf(),
            root: target.join(BACKUP_ROOT_NAME),
        }
    }

    /// Snapshot every managed directory that currently exists under the
    /// target. Missing directories are skipped without placeholders; when
    /// nothing exists no snapshot folder is created and `None` is returned.
    pub fn snapshot(&self, directories: &[&str]) -> Result<Option<String>, SyncError> {
        let existing: Vec<&str> = directories
            .iter()
            .copied()
            .filter(|name| self.target.join(name).is_dir())
            .collect();
        if existing.is_empty() {
            debug!("no managed directories present, skipping snapshot");
            return Ok(None);
        }

        let timestamp = self.allocate_timestamp();
        let snapshot_dir = self.root.join(&timestamp);
        fs::create_dir_all(&snapshot_dir)?;
        let options = CopyOptions::new();
        for name in existing {
            fs_extra::dir::copy(self.target.join(name), &snapshot_dir, &options)?;
            debug!("backed up {name} into {}", snapshot_dir.display());
        }
        Ok(Some(timestamp))
    }

    /// Restore the managed directories saved under `timestamp`, replacing
    /// the live copies. Names absent from the snapshot are left untouched,
    /// so partial snapshots restore partially. Returns the snapshot path.
    pub fn restore(&self, timestamp: &str, directories: &[&str]) -> Result<PathBuf, SyncError> {
        let snapshot_dir = self.root.join(timestamp);
        if !snapshot_dir.is_dir() {
            return Err(SyncError::SnapshotNotFound(timestamp.to_string()));
        }
        for name in directories {
            let saved = snapshot_dir.join(name);
            if !saved.is_dir() {
                continue;
            }
            replace_directory(&saved, &self.target, name)?;
            debug!("restored {name} from {}", snapshot_dir.display());
        }
        Ok(snapshot_dir)
    }

    /// Snapshot identifiers currently in the store, oldest first.
    pub fn list(&self) -> Result<Vec<String>, SyncError> {
        let mut timestamps = Vec::new();
        if !self.root.is_dir() {
            return Ok(timestamps);
        }
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if entry.path().is_dir() {
                timestamps.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        timestamps.sort();
        Ok(timestamps)
    }

    /// Wall-clock identifier, disambiguated with a sequence suffix when a
    /// snapshot from the same second already exists in the store.
    fn allocate_timestamp(&self) -> String {
        let base = Local::now().format("%Y-%m-%dT%H-%M-%S").to_string();
        let mut candidate = base.clone();
        let mut sequence = 1;
        while self.root.join(&candidate).exists() {
            sequence += 1;
            candidate = format!("{base}-{sequence}");
        }
        candidate
    }
}

/// Replace `<target>/<name>` with the tree at `source`.
///
/// The old copy is removed before the new one is staged; an interruption
/// mid-copy leaves the directory absent, recoverable from the snapshot
/// taken before any replacement began.
pub(crate) fn replace_directory(
    source: &Path,
    target: &Path,
    name: &str,
) -> Result<(), SyncError> {
    let live = target.join(name);
    if live.exists() {
        fs::remove_dir_all(&live)?;
    }
    fs::create_dir_all(target)?;
    fs_extra::dir::copy(source, target, &CopyOptions::new())?;
    Ok(())
}
