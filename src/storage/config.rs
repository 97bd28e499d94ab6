//! Storage location configuration.

use std::env;
use std::path::PathBuf;

use super::LocalFileStorage;
use crate::error::StorageError;

/// Environment variable overriding the storage directory.
pub const BASE_DIR_ENV: &str = "FILE_STORAGE_BASE_DIR";

/// Directory name used under the system temp dir for local development.
const DEV_DIR_NAME: &str = "tripflow-files";

/// Where the local storage backend keeps its files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    pub base_dir: PathBuf,
}

impl StorageConfig {
    /// Creates configuration for an explicit directory.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Resolves configuration from the process environment.
    ///
    /// Uses `FILE_STORAGE_BASE_DIR` when set, `/tmp` on serverless hosts
    /// (`VERCEL=1`), and a directory under the system temp dir otherwise.
    pub fn from_env() -> Self {
        Self::resolve(
            env::var(BASE_DIR_ENV).ok().as_deref(),
            env::var("VERCEL").ok().as_deref(),
        )
    }

    fn resolve(base_dir: Option<&str>, vercel: Option<&str>) -> Self {
        match base_dir.filter(|dir| !dir.is_empty()) {
            Some(dir) => Self::new(dir),
            None if vercel == Some("1") => Self::new("/tmp"),
            None => Self::new(env::temp_dir().join(DEV_DIR_NAME)),
        }
    }

    /// Opens the local storage backend for this configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be created
    pub fn open(&self) -> Result<LocalFileStorage, StorageError> {
        LocalFileStorage::new(&self.base_dir)
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
