//! Mirror store traits and error types
//!
//! This module defines the trait interface for mirror backends and
//! associated error types.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while persisting mirror entries
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Path {0} has no parent directory")]
    NoParent(PathBuf),

    #[error("Background write task failed: {0}")]
    Task(String),
}

/// Result type for mirror store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// What a write actually did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// A new file was created holding the given number of bytes
    Created(u64),
    /// A file already existed at the path; nothing was written
    AlreadyExists,
}

/// Trait for mirror backend implementations
///
/// Implementations must be safe to call from several blocking worker threads
/// at once; exclusive creation is the backend's responsibility.
pub trait MirrorStore: Send + Sync {
    /// Returns true if an entry is already materialized at `path`
    fn exists(&self, path: &Path) -> bool;

    /// Persists `bytes` at `path` unless an entry already exists there
    ///
    /// Missing parent directories are created. An existing entry is a no-op
    /// success, never an error.
    fn write(&self, path: &Path, bytes: &[u8]) -> StoreResult<WriteOutcome>;
}
