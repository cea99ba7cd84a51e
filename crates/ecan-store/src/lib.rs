//! SQLite persistence for attention-store snapshots.
//!
//! The core engine owns no I/O; this crate is the external snapshotting
//! concern — save a system's attention ledger and bank, load it back under
//! a config.

pub mod error;
pub mod schema;
pub mod store;

use std::env;
use std::path::PathBuf;

pub use error::{Result, StoreError};
pub use store::Store;

/// Base directory for all ecan databases: `$ECAN_DATA_DIR`, else `~/.ecan`.
pub fn default_base_dir() -> PathBuf {
    if let Ok(dir) = env::var("ECAN_DATA_DIR") {
        return PathBuf::from(dir);
    }
    env::var("HOME")
        .or_else(|_| env::var("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(".ecan")
}
