//! File storage capability used by the markdown processor.
//!
//! Backends are interchangeable behind [`FileStorage`]. Paths are always
//! relative to the backend root and use `/` separators; anything that would
//! escape the root is rejected before a backend is touched.

mod config;
mod local;
mod memory;

use serde::Serialize;
use std::io::Read;
use std::path::{Component, Path};
use uuid::Uuid;

use crate::error::StorageError;

pub use config::StorageConfig;
pub use local::LocalFileStorage;
pub use memory::MemoryFileStorage;

/// Directory that receives uploaded files.
pub const UPLOAD_DIR: &str = "uploads";

/// Metadata about a stored file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileInfo {
    /// Storage relative path.
    pub path: String,
    /// Size in bytes.
    pub size: u64,
    /// MIME type derived from the extension.
    pub mime_type: String,
}

/// Storage backend for uploaded itineraries and their images.
///
/// Calls are synchronous and may block; timeouts and retries are the
/// backend's concern.
pub trait FileStorage: Send + Sync {
    /// Stores content at an explicit path, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns error if the path is invalid or the write fails
    fn put_file(&self, path: &str, content: &[u8]) -> Result<(), StorageError>;

    /// Opens a stored file for reading.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotFound`] if nothing is stored at `path`
    fn get_file(&self, path: &str) -> Result<Box<dyn Read + Send>, StorageError>;

    /// Removes a stored file.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotFound`] if nothing is stored at `path`
    fn delete_file(&self, path: &str) -> Result<(), StorageError>;

    /// Checks whether a file is stored at `path`.
    ///
    /// # Errors
    ///
    /// Returns error if the path is invalid or the check itself fails
    fn file_exists(&self, path: &str) -> Result<bool, StorageError>;

    /// Returns size and MIME type of a stored file.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotFound`] if nothing is stored at `path`
    fn file_info(&self, path: &str) -> Result<FileInfo, StorageError>;

    /// Stores uploaded content under a fresh unique name.
    ///
    /// The name is a random UUID under [`UPLOAD_DIR`], keeping the original
    /// filename's extension or, failing that, one derived from `mime_type`.
    ///
    /// # Returns
    ///
    /// Storage relative path of the new file
    ///
    /// # Errors
    ///
    /// Returns error if the filename or content is empty, or the write fails
    fn upload_file(
        &self,
        reader: &mut dyn Read,
        filename: &str,
        mime_type: &str,
    ) -> Result<String, StorageError> {
        if filename.is_empty() {
            return Err(StorageError::InvalidInput {
                reason: "filename cannot be empty",
            });
        }

        let mut content = Vec::new();
        reader
            .read_to_end(&mut content)
            .map_err(|source| StorageError::Io {
                action: "read upload",
                path: filename.into(),
                source,
            })?;

        if content.is_empty() {
            return Err(StorageError::InvalidInput {
                reason: "file is empty",
            });
        }

        let path = upload_path(filename, mime_type);
        self.put_file(&path, &content)?;
        Ok(path)
    }
}

/// Builds a unique upload path for a file.
pub fn upload_path(filename: &str, mime_type: &str) -> String {
    let extension = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{e}"))
        .unwrap_or_else(|| extension_for_mime(mime_type).to_string());

    format!("{}/{}{}", UPLOAD_DIR, Uuid::new_v4(), extension)
}

/// Normalizes a storage path by resolving `.` and `..` components.
///
/// # Errors
///
/// Returns [`StorageError::InvalidInput`] for empty paths and
/// [`StorageError::PathTraversal`] for absolute paths or paths escaping the
/// storage root
pub fn normalize_path(path: &str) -> Result<String, StorageError> {
    if path.is_empty() {
        return Err(StorageError::InvalidInput {
            reason: "path cannot be empty",
        });
    }

    let traversal = || StorageError::PathTraversal {
        path: path.to_string(),
    };

    let mut components = Vec::new();
    for component in Path::new(path).components() {
        match component {
            Component::Normal(c) => components.push(c.to_str().ok_or_else(traversal)?),
            Component::ParentDir => {
                components.pop().ok_or_else(traversal)?;
            }
            Component::CurDir => {}
            Component::RootDir | Component::Prefix(_) => return Err(traversal()),
        }
    }

    if components.is_empty() {
        return Err(traversal());
    }

    Ok(components.join("/"))
}

/// Maps a MIME type to the extension used for uploads without one.
pub fn extension_for_mime(mime_type: &str) -> &'static str {
    match mime_type {
        "text/markdown" => ".md",
        "text/plain" => ".txt",
        "application/json" => ".json",
        "image/jpeg" => ".jpg",
        "image/png" => ".png",
        "image/gif" => ".gif",
        "application/pdf" => ".pdf",
        _ => "",
    }
}

/// Maps a path's extension to its MIME type.
pub fn mime_for_path(path: &str) -> &'static str {
    let extension = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "md" | "markdown" => "text/markdown",
        "txt" => "text/plain",
        "json" => "application/json",
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "pdf" => "application/pdf",
        _ => "application/octet-stream",
    }
}
