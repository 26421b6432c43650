//! Hashing utilities

use crate::types::BackupError;
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Compute the SHA-256 digest of a file as a lowercase hex string.
///
/// SHA-256 is the digest stored in remote object metadata, so the
/// format here must match what earlier runs wrote. The file is
/// streamed in 64KB chunks for memory efficiency.
///
/// # Arguments
/// * `file_path` - Path to the file to hash
///
/// # Returns
/// * `Ok(String)` - 64-character hex digest
/// * `Err(BackupError::FileUnreadable)` - file cannot be opened or read
pub fn compute_hash(file_path: &Path) -> Result<String, BackupError> {
    let unreadable = |source: std::io::Error| BackupError::FileUnreadable {
        path: file_path.to_path_buf(),
        source,
    };

    let mut file = File::open(file_path).map_err(unreadable)?;
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; 64 * 1024];

    loop {
        let bytes_read = file.read(&mut buffer).map_err(unreadable)?;

        if bytes_read == 0 {
            break; // EOF
        }

        hasher.update(&buffer[0..bytes_read]);
    }

    Ok(hex::encode(hasher.finalize()))
}
