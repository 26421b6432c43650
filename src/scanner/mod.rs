//! Local tree scanning logic

mod walker;

pub use walker::{scan_source, ScanProgress, ScanReport};
