//! Recursive tree walker
//!
//! Maps every regular, non-ignored file under the sync target to a
//! [`FileTask`]. Listing failures and irregular files are warned about
//! and skipped; nothing in here aborts the run.

use crate::types::{BackupError, FileTask, SyncTarget};
use std::collections::HashSet;
use std::path::Path;

/// Callback for reporting scan progress
///
/// Arguments:
/// - `files_found`: Number of file tasks produced so far
/// - `bytes_found`: Total size of those files in bytes
pub type ScanProgress = Box<dyn Fn(u64, u64) + Send + Sync>;

/// Everything a walk produced, with skip accounting.
#[derive(Debug, Default)]
pub struct ScanReport {
    /// One task per regular, non-ignored file
    pub tasks: Vec<FileTask>,

    /// Total size of all task files in bytes
    pub total_bytes: u64,

    /// Files skipped because their name is platform-reserved
    pub skipped_ignored: usize,

    /// Entries skipped because they are not regular files
    pub skipped_irregular: usize,

    /// Directories (or entries) whose listing failed
    pub unreadable: usize,
}

/// Walk the sync target's local tree and map files to remote keys.
///
/// Descends depth-first from `target.base_local_path`, pairing each
/// regular file with `parent_key + "/" + name`. The base path may
/// itself be a single file, in which case exactly one task with the
/// base key is produced.
///
/// Sibling order is whatever the directory listing yields; the only
/// guarantee is that every reachable regular, non-ignored file is
/// visited exactly once.
///
/// # Arguments
/// * `target` - Resolved bucket/key/path triple
/// * `reserved_names` - Platform junk-file names, resolved at startup
/// * `on_progress` - Optional callback (files_found, bytes_found)
pub fn scan_source(
    target: &SyncTarget,
    reserved_names: &HashSet<String>,
    on_progress: Option<&ScanProgress>,
) -> ScanReport {
    let mut report = ScanReport::default();
    walk(
        &target.base_local_path,
        &target.base_key,
        reserved_names,
        &mut report,
        on_progress,
    );
    report
}

fn walk(
    local: &Path,
    key: &str,
    reserved_names: &HashSet<String>,
    report: &mut ScanReport,
    on_progress: Option<&ScanProgress>,
) {
    // symlink_metadata: symlinks are classified as irregular, never followed.
    let metadata = match local.symlink_metadata() {
        Ok(metadata) => metadata,
        Err(source) => {
            let err = BackupError::FileUnreadable {
                path: local.to_path_buf(),
                source,
            };
            eprintln!("Warning: {err}. Skipping.");
            report.unreadable += 1;
            return;
        }
    };

    if metadata.is_dir() {
        let entries = match std::fs::read_dir(local) {
            Ok(entries) => entries,
            Err(source) => {
                let err = BackupError::DirectoryUnreadable {
                    path: local.to_path_buf(),
                    source,
                };
                eprintln!("Warning: {err}. Skipping subtree.");
                report.unreadable += 1;
                return;
            }
        };

        for entry in entries {
            match entry {
                Ok(entry) => {
                    let name = entry.file_name().to_string_lossy().into_owned();
                    walk(
                        &entry.path(),
                        &join_key(key, &name),
                        reserved_names,
                        report,
                        on_progress,
                    );
                }
                Err(source) => {
                    let err = BackupError::DirectoryUnreadable {
                        path: local.to_path_buf(),
                        source,
                    };
                    eprintln!("Warning: {err}. Skipping entry.");
                    report.unreadable += 1;
                }
            }
        }
        return;
    }

    if !metadata.is_file() {
        eprintln!(
            "{} is an irregular file. Skipping...",
            local.display()
        );
        report.skipped_irregular += 1;
        return;
    }

    let name = local
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    if reserved_names.contains(&name) {
        eprintln!("{} is a restricted file. Skipping...", local.display());
        report.skipped_ignored += 1;
        return;
    }

    report.tasks.push(FileTask::new(local, key));
    report.total_bytes += metadata.len();

    if let Some(callback) = on_progress {
        callback(report.tasks.len() as u64, report.total_bytes);
    }
}

/// Join a key prefix and a child name without producing a leading slash
/// when the prefix is empty.
fn join_key(base: &str, name: &str) -> String {
    if base.is_empty() {
        name.to_string()
    } else {
        format!("{base}/{name}")
    }
}
