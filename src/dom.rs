//! DOM Operations Adapter
//!
//! Read-only node operations the pagination scanner needs, built on the
//! `dom_query` crate. The scanner works on `NodeRef` handles because it walks
//! individual text nodes as well as elements.

// Re-export core types for external use
pub use dom_query::{Document, NodeRef};

// Re-export StrTendril for external use
pub use tendril::StrTendril;

use crate::patterns::INVALID_PARENT_WRAPPER;

// === Tag/Node Information ===

/// Get tag name (lowercase)
#[must_use]
pub fn tag_name(node: &NodeRef) -> Option<String> {
    if !node.is_element() {
        return None;
    }
    node.node_name().map(|t| t.to_ascii_lowercase())
}

/// Check if node is an `<a>` element
#[must_use]
pub fn is_anchor(node: &NodeRef) -> bool {
    tag_name(node).is_some_and(|t| t == "a")
}

/// Check if node is a `<body>` or `<html>` element, which the leaf search
/// never climbs into.
#[must_use]
pub fn is_invalid_parent_wrapper(node: &NodeRef) -> bool {
    tag_name(node).is_some_and(|t| INVALID_PARENT_WRAPPER.is_match(&t))
}

// === Attribute Operations ===

/// Get any attribute value
#[inline]
#[must_use]
pub fn get_attribute(node: &NodeRef, name: &str) -> Option<String> {
    node.attr(name).map(|s| s.to_string())
}

/// Get the raw `href` of an element, empty if absent
#[must_use]
pub fn href(node: &NodeRef) -> String {
    get_attribute(node, "href").unwrap_or_default()
}

// === Text Content ===

/// Get all text content of node and descendants
///
/// Returns `StrTendril` for zero-copy passing. Use `.to_string()` only when
/// you need owned storage.
#[inline]
#[must_use]
pub fn text_content(node: &NodeRef) -> StrTendril {
    node.text()
}

// === Querying ===

/// All `<a>` elements of the document, in document order.
#[must_use]
pub fn anchors<'a>(doc: &'a Document) -> Vec<NodeRef<'a>> {
    doc.select("a").nodes().to_vec()
}

// === Parsing ===

/// Parse HTML string into document
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchors_in_document_order() {
        let doc = parse(r#"<p><a href="/1">1</a> text <b><a href="/2">2</a></b></p>"#);
        let links = anchors(&doc);

        assert_eq!(links.len(), 2);
        assert_eq!(href(&links[0]), "/1");
        assert_eq!(text_content(&links[1]).to_string(), "2");
        assert!(is_anchor(&links[0]));
    }

    #[test]
    fn test_missing_href_is_empty() {
        let doc = parse("<a>3</a>");
        let links = anchors(&doc);
        assert_eq!(href(&links[0]), "");
        assert_eq!(get_attribute(&links[0], "title"), None);
    }

    #[test]
    fn test_text_nodes_have_no_tag() {
        let doc = parse("<p>hello<a href=\"/x\">x</a></p>");
        let link = anchors(&doc)[0];
        let text = link.prev_sibling().unwrap();

        assert!(text.is_text());
        assert_eq!(tag_name(&text), None);
        assert!(!is_anchor(&text));
        assert_eq!(text_content(&text).to_string(), "hello");
    }

    #[test]
    fn test_body_and_html_are_invalid_parents() {
        let doc = parse("<html><body><div><a href=\"/x\">x</a></div></body></html>");
        let link = anchors(&doc)[0];
        let div = link.parent().unwrap();
        let body = div.parent().unwrap();
        let html = body.parent().unwrap();

        assert!(!is_invalid_parent_wrapper(&div));
        assert!(is_invalid_parent_wrapper(&body));
        assert!(is_invalid_parent_wrapper(&html));
    }
}
