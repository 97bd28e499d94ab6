//! Markdown processing for shared itineraries.
//!
//! Parses user supplied markdown with comrak, renders it to HTML and runs the
//! result through an ammonia allow list so the output can be embedded in a
//! page without executing script. The same parse tree feeds title and
//! description extraction, while internal image references are located with a
//! pattern scan over the raw source.

mod extract;
mod images;
mod renderer;
mod sanitize;

pub use extract::{DocumentSummary, flatten_text, summarize};
pub use images::{find_internal_images, is_external_url};
pub use renderer::MarkdownRenderer;
pub use sanitize::HtmlSanitizer;
