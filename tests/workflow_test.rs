//! Workflow tests for upload, processing and cleanup through file storage.

mod common;

use anyhow::{Context, Result};
use std::fs::File;
use std::io::Cursor;
use tripflow::{
    FileStorage, LocalFileStorage, MarkdownProcessor, ProcessError, StorageConfig, StorageError,
};

/// Tests upload followed by processing the stored file.
#[test]
fn test_workflow_upload_then_process() -> Result<()> {
    // Arrange
    let (dir, storage) = common::create_test_storage()?;
    let source = common::write_file(dir.path(), "drafts/kyoto.md", common::SAMPLE_ITINERARY)?;
    let mut reader = File::open(&source)?;
    let stored = storage.upload_file(&mut reader, "kyoto.md", "text/markdown")?;
    let processor = MarkdownProcessor::new(storage);

    // Act
    let content = processor
        .process_stored_file(&stored)
        .context("Stored itinerary should process")?;

    // Assert
    assert!(stored.starts_with("uploads/"));
    assert_eq!(content.title, "Kyoto in Autumn");
    assert_eq!(
        content.internal_images,
        vec!["photos/kiyomizu.jpg", "photos/moss.png"]
    );

    Ok(())
}

/// Tests that internal images found in a document resolve against storage.
#[test]
fn test_workflow_internal_images_resolve_in_storage() -> Result<()> {
    // Arrange
    let (_dir, storage) = common::create_test_storage()?;
    storage.put_file("trips/rome.md", b"# Rome\n\n![Forum](img/forum.png) ![Missing](img/none.png)")?;
    storage.put_file("img/forum.png", &[0x89, b'P', b'N', b'G'])?;
    let processor = MarkdownProcessor::new(storage);

    // Act
    let content = processor.process_stored_file("trips/rome.md")?;
    let resolved: Vec<bool> = content
        .internal_images
        .iter()
        .map(|image| processor.storage().file_exists(image))
        .collect::<Result<_, _>>()?;

    // Assert
    assert_eq!(resolved, vec![true, false]);
    let info = processor.storage().file_info("img/forum.png")?;
    assert_eq!(info.mime_type, "image/png");
    assert_eq!(info.size, 4);

    Ok(())
}

/// Tests that processing a deleted file reports the storage error unchanged.
#[test]
fn test_workflow_error_after_delete() -> Result<()> {
    // Arrange
    let (_dir, storage) = common::create_test_storage()?;
    let mut reader = Cursor::new(b"# Gone soon".to_vec());
    let stored = storage.upload_file(&mut reader, "gone.md", "text/markdown")?;
    storage.delete_file(&stored)?;
    let processor = MarkdownProcessor::new(storage);

    // Act
    let result = processor.process_stored_file(&stored);

    // Assert
    match result {
        Err(ProcessError::Storage(StorageError::NotFound { path })) => assert_eq!(path, stored),
        other => panic!("Expected not found error, got {:?}", other),
    }

    Ok(())
}

/// Tests that traversal paths never reach the filesystem.
#[test]
fn test_workflow_error_path_traversal() -> Result<()> {
    // Arrange
    let (dir, storage) = common::create_test_storage()?;
    common::write_file(dir.path(), "secret.md", "# Secret")?;
    let processor = MarkdownProcessor::new(storage);

    // Act
    let result = processor.process_stored_file("../secret.md");

    // Assert
    assert!(matches!(
        result,
        Err(ProcessError::Storage(StorageError::PathTraversal { .. }))
    ));

    Ok(())
}

/// Tests invalid UTF8 in stored files is processed best effort.
#[test]
fn test_workflow_invalid_utf8_file() -> Result<()> {
    // Arrange
    let (_dir, storage) = common::create_test_storage()?;
    storage.put_file("trips/bad.md", b"# Men\xfc\n\nStill readable.")?;
    let processor = MarkdownProcessor::new(storage);

    // Act
    let content = processor.process_stored_file("trips/bad.md")?;

    // Assert
    assert_eq!(content.title, "Men\u{FFFD}");
    assert_eq!(content.description, "Still readable.");

    Ok(())
}

/// Tests storage opened from configuration shares files across instances.
#[test]
fn test_workflow_storage_config_reopen() -> Result<()> {
    // Arrange
    let dir = tempfile::TempDir::new()?;
    let config = StorageConfig::new(dir.path().join("store"));
    let first = config.open()?;
    first.put_file("trips/a.md", b"# A")?;

    // Act
    let second: LocalFileStorage = config.open()?;

    // Assert
    assert!(second.file_exists("trips/a.md")?);
    assert_eq!(second.base_dir(), first.base_dir());

    Ok(())
}
