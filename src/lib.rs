//! Markdown processing for shared travel itineraries.
//!
//! Converts user uploaded markdown into sanitized HTML together with an
//! inferred title, description and the list of images that must be resolved
//! against the service's own file storage.

mod config;
mod error;
mod markdown;
mod processor;
mod storage;

pub use config::{Command, Config, OutputFormat, is_markdown_file};
pub use error::{ProcessError, StorageError};
pub use markdown::{
    DocumentSummary, HtmlSanitizer, MarkdownRenderer, find_internal_images, flatten_text,
    is_external_url, summarize,
};
pub use processor::{MarkdownProcessor, ProcessedContent};
pub use storage::{
    FileInfo, FileStorage, LocalFileStorage, MemoryFileStorage, StorageConfig, UPLOAD_DIR,
    extension_for_mime, mime_for_path, normalize_path, upload_path,
};
