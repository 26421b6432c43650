//! FileTask - One file the walker hands to the change detector

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A single local file paired with its candidate remote key.
///
/// Produced per descendant file by the tree walker and consumed once
/// by the change detector.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileTask {
    /// Absolute or caller-relative path of the local file
    pub local_path: PathBuf,

    /// Full remote key this file would be stored under (no leading slash)
    pub remote_key: String,
}

impl FileTask {
    pub fn new(local_path: impl Into<PathBuf>, remote_key: impl Into<String>) -> Self {
        Self {
            local_path: local_path.into(),
            remote_key: remote_key.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_file_task() {
        let task = FileTask::new("/data/a/b.txt", "backup/a/b.txt");
        assert_eq!(task.local_path, PathBuf::from("/data/a/b.txt"));
        assert_eq!(task.remote_key, "backup/a/b.txt");
    }

    #[test]
    fn test_serialization_round_trip() {
        let task = FileTask::new("nested/file.bin", "prefix/nested/file.bin");
        let serialized = serde_json::to_string(&task).expect("serialize");
        let deserialized: FileTask = serde_json::from_str(&serialized).expect("deserialize");
        assert_eq!(task, deserialized);
    }
}
