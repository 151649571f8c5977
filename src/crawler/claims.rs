//! In-run deduplication of mirror paths
//!
//! A path is claimed before anything is fetched for it. Only the worker that
//! wins the claim downloads, writes, and recurses; every later discovery of a
//! URL mapping to the same path is skipped.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Concurrency-safe set of claimed mirror paths
#[derive(Debug, Clone, Default)]
pub struct PathClaims {
    inner: Arc<Mutex<HashSet<PathBuf>>>,
}

impl PathClaims {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically claims `path`; returns false if it was already claimed
    pub fn claim(&self, path: &Path) -> bool {
        let mut claimed = self
            .inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        claimed.insert(path.to_path_buf())
    }
}
