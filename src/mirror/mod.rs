//! Mirror module for persisting fetched resources
//!
//! This module handles everything the crawl writes to disk:
//! - The `MirrorStore` trait and its filesystem implementation
//! - Exclusive, binary-safe creation of mirror entries
//! - Locating the per-host mirror directory after a crawl

mod fs;
mod traits;

pub use fs::FsMirror;
pub use traits::{MirrorStore, StoreError, StoreResult, WriteOutcome};

use std::path::Path;
use std::sync::Arc;

/// Writes one entry on the blocking thread pool
///
/// The write is detached from the calling task, so aborting the caller never
/// leaves a half-written file behind.
pub async fn write_entry(
    store: Arc<dyn MirrorStore>,
    path: &Path,
    bytes: Arc<[u8]>,
) -> StoreResult<WriteOutcome> {
    let path = path.to_path_buf();
    tokio::task::spawn_blocking(move || store.write(&path, &bytes))
        .await
        .map_err(|e| StoreError::Task(e.to_string()))?
}

/// Returns true if `dir` exists and is a directory
///
/// Logs the result the same way for every caller.
pub fn check_mirror_dir(dir: &Path) -> bool {
    if dir.is_dir() {
        tracing::info!("Folder \"{}\" exists and is a directory.", dir.display());
        true
    } else {
        tracing::error!(
            "Folder \"{}\" does not exist or is not a directory.",
            dir.display()
        );
        false
    }
}
