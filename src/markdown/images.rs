//! Detection of image references hosted by the service itself.

use regex::Regex;
use std::sync::LazyLock;

/// Markdown image syntax `![alt](target)`, capturing the target.
static IMAGE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[.*?\]\(([^)]+)\)").expect("valid image regex"));

/// Returns true when the target is an absolute http(s) URL.
///
/// Only the literal lowercase prefixes count, so `HTTP://host` and
/// `//host/x.png` are treated as internal.
pub fn is_external_url(target: &str) -> bool {
    target.starts_with("http://") || target.starts_with("https://")
}

/// Lists image targets that must be resolved against file storage.
///
/// Scans the raw markdown for image syntax in source order. Targets with an
/// http(s) scheme are skipped; everything else is returned verbatim, including
/// duplicates.
///
/// # Arguments
///
/// * `markdown`: Raw markdown source
///
/// # Returns
///
/// Internal image targets in document order, empty when none exist
pub fn find_internal_images(markdown: &str) -> Vec<String> {
    IMAGE_PATTERN
        .captures_iter(markdown)
        .filter_map(|caps| caps.get(1))
        .map(|target| target.as_str())
        .filter(|target| !is_external_url(target))
        .map(String::from)
        .collect()
}
