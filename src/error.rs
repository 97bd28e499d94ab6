//! Error types for storage access and markdown processing.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure reported by a [`FileStorage`](crate::FileStorage) backend.
///
/// Passed through the processor unchanged so callers can tell a missing
/// file apart from a conversion failure.
#[derive(Debug, Error)]
pub enum StorageError {
    /// No file is stored at the requested path.
    #[error("file not found: {path}")]
    NotFound { path: String },

    /// Path is empty, absolute, or escapes the storage root.
    #[error("path traversal detected: {path}")]
    PathTraversal { path: String },

    /// Request rejected before touching the backend.
    #[error("invalid input: {reason}")]
    InvalidInput { reason: &'static str },

    /// Underlying I/O failure.
    #[error("failed to {action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StorageError {
    /// Maps an I/O error to [`StorageError::NotFound`] when the file is missing.
    pub(crate) fn from_io(
        err: io::Error,
        action: &'static str,
        relative: &str,
        full: impl Into<PathBuf>,
    ) -> Self {
        if err.kind() == io::ErrorKind::NotFound {
            Self::NotFound {
                path: relative.to_string(),
            }
        } else {
            Self::Io {
                action,
                path: full.into(),
                source: err,
            }
        }
    }

    /// Returns true when the error means the file does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Failure of a whole processing call.
///
/// No partial result accompanies either variant.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// The markdown tree could not be rendered to HTML.
    #[error("failed to convert markdown to HTML: {0}")]
    Conversion(#[source] io::Error),

    /// The stored file could not be located or read.
    #[error(transparent)]
    Storage(#[from] StorageError),
}
