//! Title and description extraction from the markdown block structure.

use comrak::nodes::{AstNode, NodeValue};
use serde::Serialize;

/// Human readable summary inferred from document structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DocumentSummary {
    /// Text of the first level one heading, empty when absent.
    pub title: String,
    /// Text of the first paragraph anywhere in the document, empty when absent.
    pub description: String,
}

/// Derives title and description from a parsed document.
///
/// Both fields are independent first occurrence scans in document order, so
/// a paragraph that precedes the title heading still becomes the
/// description. Blocks whose flattened text is empty are skipped.
///
/// # Arguments
///
/// * `root`: Document node returned by comrak's parser
pub fn summarize<'a>(root: &'a AstNode<'a>) -> DocumentSummary {
    DocumentSummary {
        title: first_text(root, is_title_heading),
        description: first_text(root, is_description_paragraph),
    }
}

/// Flattens the inline text below a node.
///
/// Text and inline code literals are concatenated in order; soft and hard
/// line breaks become a single space. Image alt text and raw inline HTML are
/// left out. The result is trimmed.
pub fn flatten_text<'a>(node: &'a AstNode<'a>) -> String {
    collect_inline(node).trim().to_string()
}

fn first_text<'a>(root: &'a AstNode<'a>, predicate: fn(&'a AstNode<'a>) -> bool) -> String {
    root.descendants()
        .filter(|node| predicate(*node))
        .map(flatten_text)
        .find(|text| !text.is_empty())
        .unwrap_or_default()
}

fn is_title_heading<'a>(node: &'a AstNode<'a>) -> bool {
    matches!(&node.data.borrow().value, NodeValue::Heading(heading) if heading.level == 1)
}

/// Paragraphs inside tight list items render as bare text and do not count.
fn is_description_paragraph<'a>(node: &'a AstNode<'a>) -> bool {
    if !matches!(node.data.borrow().value, NodeValue::Paragraph) {
        return false;
    }

    let in_tight_list = node
        .parent()
        .and_then(|item| item.parent())
        .is_some_and(|list| matches!(&list.data.borrow().value, NodeValue::List(nl) if nl.tight));

    !in_tight_list
}

fn collect_inline<'a>(node: &'a AstNode<'a>) -> String {
    node.children()
        .map(|child| match &child.data.borrow().value {
            NodeValue::Text(literal) => literal.clone(),
            NodeValue::Code(code) => code.literal.clone(),
            NodeValue::SoftBreak | NodeValue::LineBreak => " ".to_string(),
            NodeValue::Image(_) | NodeValue::HtmlInline(_) => String::new(),
            _ => collect_inline(child),
        })
        .collect()
}
