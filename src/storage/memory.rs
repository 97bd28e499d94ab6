//! In-process storage backend.

use std::collections::HashMap;
use std::io::{Cursor, Read};
use std::sync::{PoisonError, RwLock};

use super::{FileInfo, FileStorage, mime_for_path, normalize_path};
use crate::error::StorageError;

/// Keeps files in a map for demos and tests.
///
/// Content lives only as long as the instance.
#[derive(Debug, Default)]
pub struct MemoryFileStorage {
    files: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryFileStorage {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns number of stored files.
    pub fn len(&self) -> usize {
        self.files
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns true when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FileStorage for MemoryFileStorage {
    fn put_file(&self, path: &str, content: &[u8]) -> Result<(), StorageError> {
        let key = normalize_path(path)?;
        self.files
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, content.to_vec());
        Ok(())
    }

    fn get_file(&self, path: &str) -> Result<Box<dyn Read + Send>, StorageError> {
        let key = normalize_path(path)?;
        let files = self.files.read().unwrap_or_else(PoisonError::into_inner);
        let content = files.get(&key).ok_or_else(|| StorageError::NotFound {
            path: path.to_string(),
        })?;
        Ok(Box::new(Cursor::new(content.clone())))
    }

    fn delete_file(&self, path: &str) -> Result<(), StorageError> {
        let key = normalize_path(path)?;
        self.files
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&key)
            .map(|_| ())
            .ok_or_else(|| StorageError::NotFound {
                path: path.to_string(),
            })
    }

    fn file_exists(&self, path: &str) -> Result<bool, StorageError> {
        let key = normalize_path(path)?;
        Ok(self
            .files
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&key))
    }

    fn file_info(&self, path: &str) -> Result<FileInfo, StorageError> {
        let key = normalize_path(path)?;
        let files = self.files.read().unwrap_or_else(PoisonError::into_inner);
        let content = files.get(&key).ok_or_else(|| StorageError::NotFound {
            path: path.to_string(),
        })?;
        Ok(FileInfo {
            path: path.to_string(),
            size: content.len() as u64,
            mime_type: mime_for_path(path).to_string(),
        })
    }
}
