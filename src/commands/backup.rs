//! Main backup command

use crate::executor::{sync_file, TransferCallback, UploadOptions};
use crate::scanner::{scan_source, ScanProgress, ScanReport};
use crate::store::ObjectStore;
use crate::types::{SyncOutcome, SyncTarget};
use crate::ui::ProgressReporter;
use crate::Config;
use std::sync::Arc;

/// Counters for one backup run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackupStats {
    /// Tasks the walker produced
    pub examined: usize,
    /// Files whose bytes were transferred
    pub uploaded: usize,
    /// Files skipped via the timestamp short-circuit
    pub up_to_date: usize,
    /// Files whose content matched; only tags were rewritten
    pub tags_refreshed: usize,
    /// Tasks that failed (probe, read or upload errors)
    pub failed: usize,
    /// Total bytes transferred
    pub bytes_uploaded: u64,
    /// Walker skips: platform-reserved names
    pub skipped_ignored: usize,
    /// Walker skips: symlinks, devices, sockets, fifos
    pub skipped_irregular: usize,
    /// Walker skips: unreadable directories or entries
    pub unreadable: usize,
}

impl BackupStats {
    /// Seed counters from the walk before any task runs.
    fn from_scan(report: &ScanReport) -> Self {
        Self {
            examined: report.tasks.len(),
            skipped_ignored: report.skipped_ignored,
            skipped_irregular: report.skipped_irregular,
            unreadable: report.unreadable,
            ..Self::default()
        }
    }

    /// Record one task's outcome.
    fn record(&mut self, outcome: &SyncOutcome) {
        match outcome {
            SyncOutcome::Uploaded { bytes } => {
                self.uploaded += 1;
                self.bytes_uploaded += bytes;
            }
            SyncOutcome::UpToDate => self.up_to_date += 1,
            SyncOutcome::TagsRefreshed => self.tags_refreshed += 1,
        }
    }
}

/// Run the backup: walk the source tree, then synchronize every file
/// in sequence.
///
/// Per-file failures are reported and counted but never abort the run;
/// re-running the tool is the recovery mechanism. Fatal validation has
/// already happened in the resolver that produced `target`.
pub async fn run(config: &Config, target: &SyncTarget, store: &dyn ObjectStore) -> BackupStats {
    let reporter = Arc::new(ProgressReporter::new());
    let reserved_names = config.platform.reserved_names();

    reporter.start_scan("source");
    let scan_progress: ScanProgress = {
        let reporter = Arc::clone(&reporter);
        Box::new(move |files, bytes| reporter.update_scan("source", files, bytes))
    };
    let report = scan_source(target, &reserved_names, Some(&scan_progress));
    reporter.finish_scan("source", report.tasks.len(), report.total_bytes);

    let mut stats = BackupStats::from_scan(&report);

    let transfer_progress: TransferCallback = {
        let reporter = Arc::clone(&reporter);
        Box::new(move |bytes_sent, _total| reporter.update_upload(bytes_sent))
    };
    let options = UploadOptions {
        force_hash: config.force_hash,
        on_progress: Some(&transfer_progress),
    };

    for task in &report.tasks {
        let size = std::fs::metadata(&task.local_path)
            .map(|metadata| metadata.len())
            .unwrap_or(0);
        reporter.begin_file(&task.local_path.display().to_string(), &task.remote_key, size);

        match sync_file(store, &target.bucket, task, &options).await {
            Ok(outcome) => {
                match &outcome {
                    SyncOutcome::UpToDate => reporter.file_note(&format!(
                        "{} already exists. Skipping...",
                        task.remote_key
                    )),
                    SyncOutcome::TagsRefreshed => reporter.file_note(&format!(
                        "{} already exists. Updating tags...",
                        task.remote_key
                    )),
                    SyncOutcome::Uploaded { .. } => {}
                }
                stats.record(&outcome);
            }
            Err(err) => {
                reporter.file_error(&task.remote_key, &err.to_string());
                stats.failed += 1;
            }
        }
    }

    reporter.finish_run(&stats);
    stats
}
