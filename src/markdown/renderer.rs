//! Markdown to sanitized HTML conversion.

use comrak::nodes::AstNode;
use comrak::{Arena, Options};
use std::io;

use super::HtmlSanitizer;
use crate::error::ProcessError;

/// Renders untrusted markdown to HTML that is safe to embed.
///
/// Parses CommonMark with the GFM strikethrough, table and autolink
/// extensions, then passes the rendered HTML through [`HtmlSanitizer`].
/// Malformed markdown never fails; the parser renders whatever it can
/// recognise. The renderer holds no per call state and can be shared across
/// threads.
pub struct MarkdownRenderer {
    options: Options<'static>,
    sanitizer: HtmlSanitizer,
}

impl MarkdownRenderer {
    /// Creates renderer with raw HTML omitted from the output.
    ///
    /// Configures extensions and security settings:
    /// - Tables, strikethrough, autolinks
    /// - Raw HTML blocks and inline tags replaced by a comment the sanitizer
    ///   strips
    /// - Dangerous link schemes dropped by comrak before sanitizing
    pub fn new() -> Self {
        let mut options = Options::default();

        options.extension.strikethrough = true;
        options.extension.table = true;
        options.extension.autolink = true;

        options.render.unsafe_ = false;

        Self {
            options,
            sanitizer: HtmlSanitizer::new(),
        }
    }

    /// Passes raw HTML from the source through to the sanitizer.
    ///
    /// When enabled, safe inline markup written by the author (for example
    /// `<em>`) survives, while anything outside the allow list is still
    /// removed.
    pub fn with_raw_html(mut self, allow: bool) -> Self {
        self.options.render.unsafe_ = allow;
        self
    }

    /// Returns true when raw HTML is forwarded to the sanitizer.
    pub fn allows_raw_html(&self) -> bool {
        self.options.render.unsafe_
    }

    /// Parses markdown into a comrak document tree allocated in `arena`.
    ///
    /// Exposed so a single parse can feed both rendering and extraction.
    pub fn parse<'a>(&self, arena: &'a Arena<AstNode<'a>>, content: &str) -> &'a AstNode<'a> {
        comrak::parse_document(arena, content, &self.options)
    }

    /// Renders markdown content to sanitized HTML.
    ///
    /// # Arguments
    ///
    /// * `content`: Markdown source
    ///
    /// # Returns
    ///
    /// Sanitized HTML, empty for empty input
    ///
    /// # Errors
    ///
    /// Returns [`ProcessError::Conversion`] if the HTML formatter fails
    pub fn render(&self, content: &str) -> Result<String, ProcessError> {
        let arena = Arena::new();
        let root = self.parse(&arena, content);
        self.render_document(root)
    }

    /// Renders an already parsed document to sanitized HTML.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessError::Conversion`] if the HTML formatter fails or
    /// produces invalid UTF8
    pub fn render_document<'a>(&self, root: &'a AstNode<'a>) -> Result<String, ProcessError> {
        let mut buffer = Vec::new();
        comrak::format_html(root, &self.options, &mut buffer).map_err(ProcessError::Conversion)?;

        let html = String::from_utf8(buffer)
            .map_err(|e| ProcessError::Conversion(io::Error::new(io::ErrorKind::InvalidData, e)))?;

        Ok(self.sanitizer.sanitize(&html))
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}
