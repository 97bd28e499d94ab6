//! Markdown processing service.

use comrak::Arena;
use serde::Serialize;
use std::io::Read;
use tracing::{debug, warn};

use crate::error::{ProcessError, StorageError};
use crate::markdown::{MarkdownRenderer, find_internal_images, summarize};
use crate::storage::FileStorage;

/// Result of processing one markdown itinerary.
///
/// Built once per call and never partially filled: either every field is
/// populated from the same source or the call returns an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProcessedContent {
    /// First level one heading, empty when absent.
    pub title: String,
    /// First paragraph, empty when absent.
    pub description: String,
    /// Sanitized HTML body.
    pub html_content: String,
    /// Image targets that resolve against file storage, in source order.
    pub internal_images: Vec<String>,
}

/// Turns markdown into [`ProcessedContent`], reading stored files on demand.
///
/// Construct once at startup with the storage backend and share by reference.
/// All methods take `&self` and keep no state between calls, so concurrent
/// use needs no coordination.
pub struct MarkdownProcessor<S> {
    storage: S,
    renderer: MarkdownRenderer,
}

impl<S: FileStorage> MarkdownProcessor<S> {
    /// Creates processor with the default renderer.
    pub fn new(storage: S) -> Self {
        Self::with_renderer(storage, MarkdownRenderer::new())
    }

    /// Creates processor with a configured renderer.
    pub fn with_renderer(storage: S, renderer: MarkdownRenderer) -> Self {
        Self { storage, renderer }
    }

    /// Returns the storage backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Processes markdown text.
    ///
    /// The source is parsed once; the tree feeds both HTML rendering and
    /// title/description extraction, while internal images are scanned from
    /// the raw text.
    ///
    /// # Arguments
    ///
    /// * `markdown`: Markdown source
    ///
    /// # Errors
    ///
    /// Returns [`ProcessError::Conversion`] if rendering fails
    pub fn process(&self, markdown: &str) -> Result<ProcessedContent, ProcessError> {
        let arena = Arena::new();
        let root = self.renderer.parse(&arena, markdown);

        let html_content = self.renderer.render_document(root)?;
        let summary = summarize(root);
        let internal_images = find_internal_images(markdown);

        debug!(
            bytes = markdown.len(),
            html_bytes = html_content.len(),
            images = internal_images.len(),
            has_title = !summary.title.is_empty(),
            "processed markdown"
        );

        Ok(ProcessedContent {
            title: summary.title,
            description: summary.description,
            html_content,
            internal_images,
        })
    }

    /// Processes raw bytes, replacing invalid UTF8 sequences.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessError::Conversion`] if rendering fails
    pub fn process_bytes(&self, bytes: &[u8]) -> Result<ProcessedContent, ProcessError> {
        self.process(&String::from_utf8_lossy(bytes))
    }

    /// Reads a stored markdown file and processes it.
    ///
    /// The whole file is read into memory and the reader is released before
    /// processing starts.
    ///
    /// # Arguments
    ///
    /// * `path`: Storage relative path, as returned by upload
    ///
    /// # Errors
    ///
    /// Returns [`ProcessError::Storage`] if the file is missing or unreadable,
    /// or [`ProcessError::Conversion`] if rendering fails
    pub fn process_stored_file(&self, path: &str) -> Result<ProcessedContent, ProcessError> {
        let content = self.read_stored(path).inspect_err(|err| {
            warn!(path, error = %err, "failed to read stored markdown");
        })?;

        self.process_bytes(&content)
    }

    fn read_stored(&self, path: &str) -> Result<Vec<u8>, StorageError> {
        let mut reader = self.storage.get_file(path)?;
        let mut content = Vec::new();
        reader
            .read_to_end(&mut content)
            .map_err(|source| StorageError::Io {
                action: "read",
                path: path.into(),
                source,
            })?;
        Ok(content)
    }
}
