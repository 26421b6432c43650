//! # bakup - Incremental S3 Backup Tool
//!
//! Copies a local file or directory tree to an object-storage bucket,
//! skipping files that are already present and unchanged. Change
//! detection compares size, a stored modification-timestamp tag and a
//! stored SHA-256 digest, so re-running after an interruption is cheap
//! and idempotent.

// Module declarations
pub mod commands;
pub mod config;
pub mod diff;
pub mod executor;
pub mod hash;
pub mod resolver;
pub mod scanner;
pub mod store;
pub mod types;
pub mod ui;

// Re-export commonly used types
pub use config::{Config, Platform};
pub use types::{BackupError, FileTask, LocalFileSnapshot, RemoteObjectState, SyncOutcome, SyncTarget};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
