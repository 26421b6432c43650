//! RemoteObjectState - Everything the probe learned about the destination

/// Remote-side facts folded from a metadata probe plus a tag read.
///
/// Derived fresh for every task and never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteObjectState {
    /// Whether the probe found an object under the key
    pub exists: bool,

    /// Stored object size, when found
    pub size: Option<u64>,

    /// Versioned buckets can answer a probe with a delete marker
    pub is_delete_marker: bool,

    /// SHA-256 hex digest from the object's user metadata, if recorded
    pub stored_hash: Option<String>,

    /// Formatted mtime from the `modified-timestamp` tag, if recorded
    pub stored_timestamp: Option<String>,
}

impl RemoteObjectState {
    /// State for a key the probe did not find.
    pub fn missing() -> Self {
        Self::default()
    }
}
