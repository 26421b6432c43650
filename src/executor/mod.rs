//! Per-file sync execution
//!
//! One [`FileTask`] at a time: probe the remote object, short-circuit
//! on a matching timestamp tag, otherwise hash and either refresh tags
//! (content unchanged) or upload. Tag write failures are logged and do
//! not fail the task.

use crate::diff;
use crate::store::{ObjectStore, HASH_METADATA_KEY, TIMESTAMP_TAG};
use crate::types::{BackupError, FileTask, LocalFileSnapshot, RemoteObjectState, SyncOutcome};
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Callback for reporting transfer progress
///
/// Arguments:
/// - `bytes_sent`: Cumulative bytes read for upload so far
/// - `total_bytes`: Total file size
///
/// Invoked once per underlying read call, not on a timer.
pub type TransferCallback = Box<dyn Fn(u64, u64) + Send + Sync>;

/// Knobs for a single sync_file call.
pub struct UploadOptions<'a> {
    /// Bypass the timestamp short-circuit, always verify by hash
    pub force_hash: bool,

    /// Optional per-chunk progress callback for uploads
    pub on_progress: Option<&'a TransferCallback>,
}

/// Synchronize one local file with its remote key.
///
/// Returns what happened ([`SyncOutcome`]); errors are per-file and
/// never poison sibling tasks. The hash pass and the upload pass each
/// open the file independently - there is no shared read cursor, so
/// the stored digest always reflects exactly the bytes that were
/// hashed.
pub async fn sync_file(
    store: &dyn ObjectStore,
    bucket: &str,
    task: &FileTask,
    options: &UploadOptions<'_>,
) -> Result<SyncOutcome, BackupError> {
    let mut local = LocalFileSnapshot::capture(&task.local_path)?;

    let probe = store.probe_metadata(bucket, &task.remote_key).await?;

    let mut remote = RemoteObjectState::missing();
    let mut existing_tags: Vec<(String, String)> = Vec::new();
    if let Some(object) = probe {
        remote.exists = true;
        remote.size = Some(object.size);
        remote.is_delete_marker = object.is_delete_marker;
        remote.stored_hash = object.metadata.get(HASH_METADATA_KEY).cloned();

        // Tags only matter when the object is a size-matched candidate;
        // a failed tag read just means no stored timestamp.
        if !object.is_delete_marker && object.size == local.size {
            match store.get_tags(bucket, &task.remote_key).await {
                Ok(tags) => {
                    remote.stored_timestamp = tags
                        .iter()
                        .find(|(key, _)| key == TIMESTAMP_TAG)
                        .map(|(_, value)| value.clone());
                    existing_tags = tags;
                }
                Err(err) => eprintln!("Warning: {err}"),
            }
        }
    }

    if diff::is_up_to_date(&local, &remote, options.force_hash) {
        return Ok(SyncOutcome::UpToDate);
    }

    let digest = local.sha256_hex(&task.local_path)?.to_string();
    let unchanged = diff::content_matches(&local, &digest, &remote);

    if !unchanged {
        let body = read_with_progress(&task.local_path, local.size, options.on_progress)?;

        let mut metadata = HashMap::new();
        metadata.insert(HASH_METADATA_KEY.to_string(), digest);

        store
            .put_object(bucket, &task.remote_key, body, metadata)
            .await?;
    }

    let tags = diff::refreshed_tags(&existing_tags, &local.mtime_formatted);
    if let Err(err) = store.put_tags(bucket, &task.remote_key, tags).await {
        // Non-fatal: the object itself is correct, only its tag set is stale.
        eprintln!("Warning: {err}");
    }

    Ok(if unchanged {
        SyncOutcome::TagsRefreshed
    } else {
        SyncOutcome::Uploaded { bytes: local.size }
    })
}

/// Read a whole file in 64KB chunks, reporting cumulative progress
/// after every read.
fn read_with_progress(
    path: &Path,
    total_bytes: u64,
    on_progress: Option<&TransferCallback>,
) -> Result<Vec<u8>, BackupError> {
    let unreadable = |source: std::io::Error| BackupError::FileUnreadable {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::open(path).map_err(unreadable)?;
    let mut body = Vec::with_capacity(total_bytes as usize);
    let mut buffer = vec![0u8; 64 * 1024];
    let mut bytes_sent: u64 = 0;

    loop {
        let bytes_read = file.read(&mut buffer).map_err(unreadable)?;

        if bytes_read == 0 {
            break; // EOF
        }

        body.extend_from_slice(&buffer[0..bytes_read]);
        bytes_sent += bytes_read as u64;

        if let Some(callback) = on_progress {
            callback(bytes_sent, total_bytes);
        }
    }

    Ok(body)
}
