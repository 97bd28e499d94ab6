//! Shared test utilities for integration tests.
//!
//! Provides helpers for creating temporary storage roots and markdown
//! fixtures used across multiple test files.

#![allow(dead_code)]

use anyhow::Result;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tripflow::LocalFileStorage;

/// Sample itinerary exercising headings, lists, images and links.
pub const SAMPLE_ITINERARY: &str = "\
# Kyoto in Autumn

Four days of temples, gardens and food markets.

![Kiyomizu-dera](photos/kiyomizu.jpg)

## Day 1

- Fushimi Inari at dawn
- Nishiki Market lunch

![Torii gates](https://images.example.com/torii.jpg)

## Day 2

1. Arashiyama bamboo grove
2. [Tenryu-ji](https://example.com/tenryuji)

![Moss garden](photos/moss.png)
";

/// Creates local storage rooted in a fresh temporary directory.
///
/// # Errors
///
/// Returns error if directory creation fails
pub fn create_test_storage() -> Result<(TempDir, LocalFileStorage)> {
    let dir = TempDir::new()?;
    let storage = LocalFileStorage::new(dir.path().join("files"))?;
    Ok((dir, storage))
}

/// Writes file below `root`, creating parent directories as needed.
///
/// # Errors
///
/// Returns error if directory creation or file write fails
pub fn write_file(root: &Path, path: &str, content: &str) -> Result<PathBuf> {
    let file_path = root.join(path);
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&file_path, content)?;
    Ok(file_path)
}
