//! Core type definitions for bakup

mod error;
mod outcome;
mod remote;
mod snapshot;
mod target;
mod task;

pub use error::BackupError;
pub use outcome::SyncOutcome;
pub use remote::RemoteObjectState;
pub use snapshot::{format_mtime, LocalFileSnapshot};
pub use target::SyncTarget;
pub use task::FileTask;
