//! LocalFileSnapshot - What we know about a local file before deciding

use crate::hash::compute_hash;
use crate::types::BackupError;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::SystemTime;

/// Modification-time format stored in the remote timestamp tag.
///
/// Second precision, stable across runs, so identical timestamps
/// compare equal as plain strings.
const MTIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Size and formatted mtime of a local file, with a lazily computed
/// SHA-256 digest.
///
/// The digest stays unset until `sha256_hex` is called: the timestamp
/// short-circuit must decide without reading file content.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LocalFileSnapshot {
    /// File size in bytes
    pub size: u64,

    /// Modification time formatted with [`MTIME_FORMAT`] (local time)
    pub mtime_formatted: String,

    /// SHA-256 hex digest, cached once computed
    pub sha256: Option<String>,
}

impl LocalFileSnapshot {
    /// Stat `path` and capture size + formatted mtime. Reads no content.
    pub fn capture(path: &Path) -> Result<Self, BackupError> {
        let metadata = std::fs::metadata(path).map_err(|source| BackupError::FileUnreadable {
            path: path.to_path_buf(),
            source,
        })?;
        let mtime = metadata
            .modified()
            .map_err(|source| BackupError::FileUnreadable {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Self {
            size: metadata.len(),
            mtime_formatted: format_mtime(mtime),
            sha256: None,
        })
    }

    /// Return the SHA-256 hex digest, computing and caching it on first use.
    pub fn sha256_hex(&mut self, path: &Path) -> Result<&str, BackupError> {
        if self.sha256.is_none() {
            self.sha256 = Some(compute_hash(path)?);
        }
        Ok(self.sha256.as_deref().unwrap_or_default())
    }
}

/// Format a modification time the way it is stored remotely.
pub fn format_mtime(mtime: SystemTime) -> String {
    DateTime::<Local>::from(mtime)
        .format(MTIME_FORMAT)
        .to_string()
}
