//! Error types for bakup

use std::path::PathBuf;
use thiserror::Error;

/// Error types for bakup operations
#[derive(Debug, Error)]
pub enum BackupError {
    /// Destination URI is not an s3:// URI or has no bucket component
    #[error("Invalid destination: {0}")]
    InvalidDestination(String),

    /// Local backup source does not exist
    #[error("Backup source does not exist: {}", .path.display())]
    SourceNotFound { path: PathBuf },

    /// Directory contents cannot be flattened onto a single key
    #[error("Cannot copy contents of directory {} to key {key}", .source_path.display())]
    InvalidCopyTarget { source_path: PathBuf, key: String },

    /// A directory listing failed; the subtree is skipped
    #[error("Unable to list directory {}", .path.display())]
    DirectoryUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A local file could not be opened or read
    #[error("Unable to read file {}", .path.display())]
    FileUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The remote metadata probe failed for a reason other than "not found"
    #[error("Unable to retrieve object metadata for key {key}: {message}")]
    MetadataProbeFailed { key: String, message: String },

    /// Streaming the object body to the store failed
    #[error("Unable to upload object {key}: {message}")]
    UploadFailed { key: String, message: String },

    /// Reading the remote tag set failed (tolerated: treated as no stored timestamp)
    #[error("Unable to read tags for key {key}: {message}")]
    TagReadFailed { key: String, message: String },

    /// Writing the remote tag set failed (non-fatal, the object itself is intact)
    #[error("Unable to update tags for key {key}: {message}")]
    TagUpdateFailed { key: String, message: String },
}

impl BackupError {
    /// Fatal errors abort the entire run before any storage I/O.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            BackupError::InvalidDestination(_)
                | BackupError::SourceNotFound { .. }
                | BackupError::InvalidCopyTarget { .. }
        )
    }

    /// Per-file errors are logged and skipped; traversal continues.
    pub fn is_per_file(&self) -> bool {
        !self.is_fatal()
    }

    /// Tag failures leave the object usable; the task still counts as done.
    pub fn is_tag_failure(&self) -> bool {
        matches!(
            self,
            BackupError::TagReadFailed { .. } | BackupError::TagUpdateFailed { .. }
        )
    }
}
