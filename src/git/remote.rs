//! Remote fetch via the system git binary.

use std::fs;
use std::path::Path;
use std::process::Command;

use crate::error::SyncError;

/// Clone `url` into `destination`, optionally constrained to `reference`.
///
/// A shallow single-branch clone is attempted first. Commit SHAs are not
/// reachable through a branch-limited fetch, so when a ref is given and the
/// shallow attempt fails, a full clone plus explicit checkout is tried
/// before giving up.
pub(crate) fn clone_at_ref(
    url: &str,
    reference: Option<&str>,
    destination: &Path,
) -> Result<(), SyncError> {
    if which::which("git").is_err() {
        return Err(SyncError::Fetch(
            "git executable not found on PATH".to_string(),
        ));
    }
    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent)?;
    }

    match shallow_clone(url, reference, destination) {
        Ok(()) => {
            tracing::debug!("cloned {url} with depth 1");
            Ok(())
        }
        Err(err) => {
            let Some(reference) = reference else {
                return Err(err);
            };
            tracing::debug!("shallow clone of ref {reference} failed, retrying full clone");
            // Drop whatever the failed shallow attempt left behind.
            if destination.exists() {
                fs::remove_dir_all(destination)?;
            }
            full_clone_at(url, reference, destination)
        }
    }
}

fn shallow_clone(url: &str, reference: Option<&str>, destination: &Path) -> Result<(), SyncError> {
    let mut clone = Command::new("git");
    clone.args(["clone", "--depth", "1", "--quiet"]);
    if let Some(reference) = reference {
        clone.args(["--branch", reference, "--single-branch"]);
    }
    clone.arg(url).arg(destination);
    run(clone)
}

fn full_clone_at(url: &str, reference: &str, destination: &Path) -> Result<(), SyncError> {
    let mut clone = Command::new("git");
    clone.args(["clone", "--quiet"]).arg(url).arg(destination);
    run(clone)?;

    let mut checkout = Command::new("git");
    checkout
        .args(["checkout", "--quiet", reference])
        .current_dir(destination);
    run(checkout)
}

/// Run a git command, mapping failure to [`SyncError::Fetch`] carrying the
/// tool's diagnostic text.
fn run(mut command: Command) -> Result<(), SyncError> {
    tracing::debug!("running {command:?}");
    let output = command.output()?;
    if output.status.success() {
        return Ok(());
    }
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    if stderr.is_empty() {
        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        return Err(SyncError::Fetch(stdout));
    }
    Err(SyncError::Fetch(stderr))
}
