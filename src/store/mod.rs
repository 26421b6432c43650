//! Object storage boundary

mod s3;

pub use s3::S3ObjectStore;

use crate::types::BackupError;
use async_trait::async_trait;
use std::collections::HashMap;

/// User-metadata key holding the object's SHA-256 hex digest.
pub const HASH_METADATA_KEY: &str = "sha256";

/// Tag key holding the formatted local modification time.
pub const TIMESTAMP_TAG: &str = "modified-timestamp";

/// What a metadata probe returns for an existing object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteObject {
    /// Stored object size in bytes
    pub size: u64,

    /// Versioned buckets answer probes for deleted objects with a marker
    pub is_delete_marker: bool,

    /// User metadata attached at upload time
    pub metadata: HashMap<String, String>,
}

/// The operations bakup needs from an object store.
///
/// Transport, retries and multipart fragmentation all live behind this
/// seam; the sync logic above it is storage-agnostic and tests drive it
/// with an in-memory implementation.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Head-style metadata fetch. `Ok(None)` is the not-found case;
    /// any other failure is `MetadataProbeFailed`.
    async fn probe_metadata(
        &self,
        bucket: &str,
        key: &str,
    ) -> Result<Option<RemoteObject>, BackupError>;

    /// Store `body` under `key` with the given user metadata, replacing
    /// any existing object (and its tags) in a single logical put.
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        metadata: HashMap<String, String>,
    ) -> Result<(), BackupError>;

    /// Read the object's full tag set.
    async fn get_tags(&self, bucket: &str, key: &str)
        -> Result<Vec<(String, String)>, BackupError>;

    /// Replace the object's full tag set.
    async fn put_tags(
        &self,
        bucket: &str,
        key: &str,
        tags: Vec<(String, String)>,
    ) -> Result<(), BackupError>;
}
