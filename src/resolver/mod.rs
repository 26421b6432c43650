//! Destination resolution - (source path, s3 URI) -> SyncTarget

use crate::types::{BackupError, SyncTarget};
use std::path::Path;

/// URI scheme accepted for backup destinations.
const S3_SCHEME: &str = "s3://";

/// Resolve a raw (source, destination) argument pair into a [`SyncTarget`].
///
/// Trailing slashes carry meaning and are inspected on the raw strings
/// before any path normalization:
///
/// - destination `.../` + source `.../` -> both stripped; files nest
///   under the key by name.
/// - destination `.../` + plain source -> the source basename is
///   appended to the key.
/// - plain destination + source `.../` -> error: a directory's contents
///   cannot be flattened onto a single key.
/// - neither -> key and path used verbatim (single-file case).
///
/// A single leading slash on the computed key is stripped; object keys
/// never begin with `/`.
///
/// # Errors
/// * `InvalidDestination` - destination is not `s3://` or has no bucket
/// * `SourceNotFound` - local source does not exist
/// * `InvalidCopyTarget` - directory source against a non-prefix key
pub fn resolve(source: &str, destination: &str) -> Result<SyncTarget, BackupError> {
    let remainder = destination
        .strip_prefix(S3_SCHEME)
        .ok_or_else(|| BackupError::InvalidDestination(format!("{destination} is not an s3 URI")))?;

    let (bucket, key_part) = match remainder.split_once('/') {
        Some((bucket, rest)) => (bucket, format!("/{rest}")),
        None => (remainder, String::new()),
    };
    if bucket.is_empty() {
        return Err(BackupError::InvalidDestination(format!(
            "{destination} has no bucket"
        )));
    }

    if !Path::new(source).exists() {
        return Err(BackupError::SourceNotFound {
            path: source.into(),
        });
    }

    let dest_is_prefix = key_part.ends_with('/');
    let source_is_dir_contents = source.ends_with('/');

    let mut key = key_part;
    if dest_is_prefix {
        if source_is_dir_contents {
            key.pop();
        } else {
            key.push_str(source_basename(source)?);
        }
    } else if source_is_dir_contents {
        return Err(BackupError::InvalidCopyTarget {
            source_path: source.into(),
            key,
        });
    }

    // Object keys never begin with a slash.
    let key = key.strip_prefix('/').unwrap_or(&key).to_string();

    // The trailing source slash is cosmetic on Linux filesystems; drop it.
    let local = source.strip_suffix('/').filter(|s| !s.is_empty()).unwrap_or(source);

    Ok(SyncTarget::new(bucket, key, local))
}

/// Final component of the source path, used to name the object under a
/// key prefix.
fn source_basename(source: &str) -> Result<&str, BackupError> {
    Path::new(source)
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| BackupError::InvalidCopyTarget {
            source_path: source.into(),
            key: String::new(),
        })
}
