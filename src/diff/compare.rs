//! Equivalence predicates
//!
//! A file is synchronized iff the remote object exists, is not a delete
//! marker, sizes match, and either the stored timestamp tag or the
//! stored content hash matches the local file. These predicates are the
//! whole of that rule; everything effectful lives in the executor.

use crate::store::TIMESTAMP_TAG;
use crate::types::{LocalFileSnapshot, RemoteObjectState};

/// A remote object is only worth comparing when it exists, is a real
/// object (not a delete marker) and has the same size as the local file.
fn comparable(local: &LocalFileSnapshot, remote: &RemoteObjectState) -> bool {
    remote.exists && !remote.is_delete_marker && remote.size == Some(local.size)
}

/// Timestamp short-circuit: can we skip without reading file content?
///
/// Never true under `force_hash` - a stored timestamp alone is then not
/// sufficient evidence.
pub fn is_up_to_date(
    local: &LocalFileSnapshot,
    remote: &RemoteObjectState,
    force_hash: bool,
) -> bool {
    !force_hash
        && comparable(local, remote)
        && remote.stored_timestamp.as_deref() == Some(local.mtime_formatted.as_str())
}

/// Hash equivalence: content unchanged even though the timestamp
/// differs (e.g. after a touch with no edit).
pub fn content_matches(
    local: &LocalFileSnapshot,
    digest: &str,
    remote: &RemoteObjectState,
) -> bool {
    comparable(local, remote) && remote.stored_hash.as_deref() == Some(digest)
}

/// Build the tag set to write back: every existing tag except the
/// timestamp tag survives verbatim, then a fresh timestamp tag is
/// appended.
pub fn refreshed_tags(
    existing: &[(String, String)],
    mtime_formatted: &str,
) -> Vec<(String, String)> {
    let mut tags: Vec<(String, String)> = existing
        .iter()
        .filter(|(key, _)| key != TIMESTAMP_TAG)
        .cloned()
        .collect();
    tags.push((TIMESTAMP_TAG.to_string(), mtime_formatted.to_string()));
    tags
}
