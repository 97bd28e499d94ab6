//! Allow list HTML sanitization for user generated content.

use ammonia::Builder;
use std::borrow::Cow;
use std::collections::{HashMap, HashSet};

/// Structural and formatting tags kept in rendered itineraries.
const ALLOWED_TAGS: &[&str] = &[
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "p",
    "br",
    "hr",
    "em",
    "strong",
    "del",
    "s",
    "ul",
    "ol",
    "li",
    "a",
    "img",
    "code",
    "pre",
    "blockquote",
    "table",
    "thead",
    "tbody",
    "tr",
    "th",
    "td",
];

/// Per tag attribute allow list.
const ALLOWED_ATTRIBUTES: &[(&str, &[&str])] = &[
    ("a", &["href", "title"]),
    ("img", &["src", "alt", "title"]),
    ("ol", &["start"]),
    ("th", &["align"]),
    ("td", &["align"]),
    ("code", &["class"]),
];

/// URL schemes permitted in `href` and `src`. Relative URLs always pass.
const ALLOWED_SCHEMES: &[&str] = &["http", "https"];

/// Prefix comrak uses for fenced code block language classes.
const LANGUAGE_CLASS_PREFIX: &str = "language-";

/// Removes every construct able to run script from rendered HTML.
///
/// Wraps an ammonia [`Builder`] configured for user generated content:
/// unknown tags are unwrapped, `<script>` and `<style>` are dropped along with
/// their content, event handler attributes never survive the attribute allow
/// list, and URLs with schemes other than http(s) are removed. Sanitizing is
/// infallible and repeated passes leave the output unchanged.
pub struct HtmlSanitizer {
    builder: Builder<'static>,
}

impl HtmlSanitizer {
    /// Creates sanitizer with the itinerary allow list.
    pub fn new() -> Self {
        let tag_attributes: HashMap<&'static str, HashSet<&'static str>> = ALLOWED_ATTRIBUTES
            .iter()
            .map(|(tag, attrs)| (*tag, attrs.iter().copied().collect()))
            .collect();

        let mut builder = Builder::default();
        builder
            .tags(ALLOWED_TAGS.iter().copied().collect())
            .tag_attributes(tag_attributes)
            .generic_attributes(HashSet::new())
            .url_schemes(ALLOWED_SCHEMES.iter().copied().collect())
            .link_rel(Some("noopener noreferrer"))
            .strip_comments(true)
            .attribute_filter(filter_attribute);

        Self { builder }
    }

    /// Sanitizes HTML fragment.
    ///
    /// # Arguments
    ///
    /// * `html`: Untrusted HTML fragment
    ///
    /// # Returns
    ///
    /// HTML containing only allow listed tags, attributes and URL schemes
    pub fn sanitize(&self, html: &str) -> String {
        if html.is_empty() {
            return String::new();
        }
        self.builder.clean(html).to_string()
    }
}

impl Default for HtmlSanitizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Keeps `class` on code elements only for language markers.
fn filter_attribute<'u>(element: &str, attribute: &str, value: &'u str) -> Option<Cow<'u, str>> {
    if element == "code" && attribute == "class" {
        let is_language = value
            .strip_prefix(LANGUAGE_CLASS_PREFIX)
            .is_some_and(|lang| {
                !lang.is_empty()
                    && lang
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+' | '#'))
            });
        return is_language.then_some(Cow::Borrowed(value));
    }
    Some(Cow::Borrowed(value))
}
