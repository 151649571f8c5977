//! Filesystem-backed mirror store

use crate::mirror::traits::{MirrorStore, StoreError, StoreResult, WriteOutcome};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::Path;

/// Writes mirror entries as plain files, bytes verbatim
#[derive(Debug, Clone, Copy, Default)]
pub struct FsMirror;

impl FsMirror {
    pub fn new() -> Self {
        Self
    }
}

impl MirrorStore for FsMirror {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn write(&self, path: &Path, bytes: &[u8]) -> StoreResult<WriteOutcome> {
        let parent = path
            .parent()
            .ok_or_else(|| StoreError::NoParent(path.to_path_buf()))?;

        fs::create_dir_all(parent).map_err(|source| StoreError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;

        // create_new makes the existence check and the creation one atomic step
        let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                tracing::debug!("File already exists: {}", path.display());
                return Ok(WriteOutcome::AlreadyExists);
            }
            Err(source) => {
                return Err(StoreError::Write {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        file.write_all(bytes)
            .and_then(|_| file.flush())
            .map_err(|source| StoreError::Write {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(WriteOutcome::Created(bytes.len() as u64))
    }
}
