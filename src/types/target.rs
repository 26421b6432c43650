//! SyncTarget - The resolved (bucket, key prefix, local path) triple

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where a backup run reads from and writes to.
///
/// Produced once per invocation by the path resolver and immutable
/// afterward. `base_key` never begins with `/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SyncTarget {
    /// Destination bucket name
    pub bucket: String,

    /// Remote key prefix (or the exact key, in the single-file case)
    pub base_key: String,

    /// Local file or directory the walk starts from
    pub base_local_path: PathBuf,
}

impl SyncTarget {
    pub fn new(
        bucket: impl Into<String>,
        base_key: impl Into<String>,
        base_local_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            bucket: bucket.into(),
            base_key: base_key.into(),
            base_local_path: base_local_path.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_sync_target() {
        let target = SyncTarget::new("backups", "photos/2026", "/home/me/photos");
        assert_eq!(target.bucket, "backups");
        assert_eq!(target.base_key, "photos/2026");
        assert_eq!(target.base_local_path, PathBuf::from("/home/me/photos"));
    }

    #[test]
    fn test_serialization_round_trip() {
        let target = SyncTarget::new("b", "k/x", "/tmp/src");
        let serialized = serde_json::to_string(&target).expect("serialize");
        let deserialized: SyncTarget = serde_json::from_str(&serialized).expect("deserialize");
        assert_eq!(target, deserialized);
    }
}
