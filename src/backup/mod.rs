//! Backup module - Snapshots of files taken before they are overwritten.

mod snapshot;

pub use snapshot::*;
