//! Local filesystem storage backend.

use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::{FileInfo, FileStorage, mime_for_path, normalize_path};
use crate::error::StorageError;

/// Stores files below a base directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalFileStorage {
    base_dir: PathBuf,
}

impl LocalFileStorage {
    /// Opens storage rooted at `base_dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns error if `base_dir` is empty or cannot be created
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self, StorageError> {
        let base_dir = base_dir.as_ref();
        if base_dir.as_os_str().is_empty() {
            return Err(StorageError::InvalidInput {
                reason: "base path cannot be empty",
            });
        }

        fs::create_dir_all(base_dir).map_err(|source| StorageError::Io {
            action: "create base directory",
            path: base_dir.to_path_buf(),
            source,
        })?;

        debug!(base_dir = %base_dir.display(), "opened local file storage");

        Ok(Self {
            base_dir: base_dir.to_path_buf(),
        })
    }

    /// Returns storage root directory.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Resolves a storage path to an absolute location under the root.
    fn resolve(&self, path: &str) -> Result<PathBuf, StorageError> {
        let relative = normalize_path(path)?;
        Ok(self.base_dir.join(relative))
    }
}

impl FileStorage for LocalFileStorage {
    fn put_file(&self, path: &str, content: &[u8]) -> Result<(), StorageError> {
        let full_path = self.resolve(path)?;

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).map_err(|source| StorageError::Io {
                action: "create directory",
                path: parent.to_path_buf(),
                source,
            })?;
        }

        fs::write(&full_path, content)
            .map_err(|err| StorageError::from_io(err, "write", path, &full_path))?;

        debug!(path, bytes = content.len(), "stored file");
        Ok(())
    }

    fn get_file(&self, path: &str) -> Result<Box<dyn Read + Send>, StorageError> {
        let full_path = self.resolve(path)?;
        let file =
            File::open(&full_path).map_err(|err| StorageError::from_io(err, "open", path, &full_path))?;
        Ok(Box::new(file))
    }

    fn delete_file(&self, path: &str) -> Result<(), StorageError> {
        let full_path = self.resolve(path)?;
        fs::remove_file(&full_path)
            .map_err(|err| StorageError::from_io(err, "delete", path, &full_path))?;

        debug!(path, "deleted file");
        Ok(())
    }

    fn file_exists(&self, path: &str) -> Result<bool, StorageError> {
        let full_path = self.resolve(path)?;
        full_path
            .try_exists()
            .map(|exists| exists && full_path.is_file())
            .map_err(|source| StorageError::Io {
                action: "check",
                path: full_path.clone(),
                source,
            })
    }

    fn file_info(&self, path: &str) -> Result<FileInfo, StorageError> {
        let full_path = self.resolve(path)?;
        let metadata = fs::metadata(&full_path)
            .map_err(|err| StorageError::from_io(err, "stat", path, &full_path))?;

        Ok(FileInfo {
            path: path.to_string(),
            size: metadata.len(),
            mime_type: mime_for_path(path).to_string(),
        })
    }
}
