//! # rs-pagination
//!
//! Numbered pagination detection for web pages.
//!
//! Given an HTML document and its URL, this library finds the page-number
//! navigation ("1 2 [3] 4 5"), works out which URL parameter carries the
//! page number, and reports the pages found, the relation between page
//! number and parameter value, and the URL of the next page.
//!
//! ## Quick Start
//!
//! ```rust
//! use rs_pagination::{detect, ParamType};
//!
//! let html = r#"<html><body><div class="pager">
//! 1 <a href="/forum?page=2">2</a> <a href="/forum?page=3">3</a>
//! </div></body></html>"#;
//!
//! let info = detect(html, "http://example.com/forum");
//! assert_eq!(info.param_type, ParamType::PageNumber);
//! assert_eq!(info.pattern, "http://example.com/forum?page=[*!]");
//! assert_eq!(info.next_paging_url, "http://example.com/forum?page=2");
//! ```
//!
//! ## Features
//!
//! - **Query and path parameters**: `?page=3`, `/page/3`, `/thread-3.html`
//! - **Linear formulas**: offsets such as `?start=20` for page 3
//! - **False positive rejection**: calendars, years, unrelated counters
//! - **Prev/next links**: [`find_pagination`] for callers that only need those

mod error;
mod options;
mod patterns;
mod result;

/// DOM operations adapter over `dom_query`.
pub mod dom;

/// URL utilities for validation, resolution, and normalization.
pub mod url_utils;

/// Character encoding detection and transcoding.
pub mod encoding;

/// Approximate word counting for text nodes.
pub mod word_count;

/// Page number scanning, grouping, URL patterns and detection.
pub mod pagination;

// Public API - re-exports
pub use error::{Error, Result};
pub use options::{Options, DEFAULT_BAD_PARAM_NAMES};
pub use pagination::PAGE_PARAM_PLACEHOLDER;
pub use result::{LinearFormula, PageInfo, PageParamInfo, PaginationInfo, ParamType};

use dom::Document;
use pagination::PageNumberFinder;
use url::Url;
use word_count::WordCounter;

/// Detects the page parameter of an HTML document using default options.
///
/// # Arguments
///
/// * `html` - The HTML document as a string slice
/// * `url` - Absolute URL of the document
///
/// # Returns
///
/// Always returns a [`PageParamInfo`]. Its `param_type` is
/// [`ParamType::Unset`] when no pagination was found or `url` is not an
/// absolute http(s) URL.
///
/// # Example
///
/// ```rust
/// use rs_pagination::detect;
///
/// let info = detect("<html><body><p>No pages here.</p></body></html>", "http://example.com/");
/// assert!(!info.is_detected());
/// ```
#[must_use]
pub fn detect(html: &str, url: &str) -> PageParamInfo {
    detect_with_options(html, url, &Options::default())
}

/// Detects the page parameter of an HTML document with custom options.
///
/// # Example
///
/// ```rust
/// use rs_pagination::{detect_with_options, Options};
///
/// let options = Options {
///     max_page_number: 20,
///     ..Options::default()
/// };
/// let html = r#"<html><body><a href="?p=30">30</a><a href="?p=31">31</a></body></html>"#;
/// let info = detect_with_options(html, "http://example.com/list", &options);
/// assert!(!info.is_detected());
/// ```
#[must_use]
pub fn detect_with_options(html: &str, url: &str, options: &Options) -> PageParamInfo {
    let doc = dom::parse(html);
    detect_document(&doc, url, options)
}

/// Detects the page parameter from HTML bytes with automatic encoding
/// detection.
///
/// The encoding is taken from a byte order mark, then from
/// `<meta charset="...">` or `<meta http-equiv="Content-Type" ...>`, and
/// defaults to UTF-8. Invalid sequences are replaced rather than rejected.
///
/// # Example
///
/// ```rust
/// use rs_pagination::detect_bytes;
///
/// let html = b"<html><head><meta charset=\"ISO-8859-1\"></head><body>\
///     <p>Caf\xE9 1 <a href=\"/c?page=2\">2</a> <a href=\"/c?page=3\">3</a></p></body></html>";
/// let info = detect_bytes(html, "http://example.com/c");
/// assert_eq!(info.pages.len(), 3);
/// ```
#[must_use]
pub fn detect_bytes(html: &[u8], url: &str) -> PageParamInfo {
    detect_bytes_with_options(html, url, &Options::default())
}

/// Detects the page parameter from HTML bytes with custom options and
/// automatic encoding detection.
#[must_use]
pub fn detect_bytes_with_options(html: &[u8], url: &str, options: &Options) -> PageParamInfo {
    let html_str = encoding::decode_html(html);
    detect_with_options(&html_str, url, options)
}

/// Detects the page parameter of an already parsed document.
///
/// The document is only read.
#[must_use]
pub fn detect_document(doc: &Document, url: &str, options: &Options) -> PageParamInfo {
    try_detect_document(doc, url, options).unwrap_or_default()
}

/// Like [`detect_with_options`], but reports an unusable document URL as
/// an error instead of an empty result.
///
/// # Example
///
/// ```rust
/// use rs_pagination::{try_detect, Error, Options};
///
/// let err = try_detect("<html></html>", "/relative", &Options::default()).unwrap_err();
/// assert!(matches!(err, Error::InvalidUrl(_)));
/// ```
pub fn try_detect(html: &str, url: &str, options: &Options) -> Result<PageParamInfo> {
    let doc = dom::parse(html);
    try_detect_document(&doc, url, options)
}

fn try_detect_document(doc: &Document, url: &str, options: &Options) -> Result<PageParamInfo> {
    let doc_url = document_url(url)?;
    Ok(run_detection(doc, &doc_url, options))
}

/// Finds the previous and next page URLs of an HTML document using default
/// options.
///
/// # Example
///
/// ```rust
/// use rs_pagination::find_pagination;
///
/// let html = r#"<html><body><p>
/// <a href="/t?page=1">1</a> 2 <a href="/t?page=3">3</a>
/// </p></body></html>"#;
/// let links = find_pagination(html, "http://example.com/t?page=2");
/// assert_eq!(links.prev_page, "http://example.com/t?page=1");
/// assert_eq!(links.next_page, "http://example.com/t?page=3");
/// ```
#[must_use]
pub fn find_pagination(html: &str, url: &str) -> PaginationInfo {
    find_pagination_with_options(html, url, &Options::default())
}

/// Finds the previous and next page URLs of an HTML document with custom
/// options.
#[must_use]
pub fn find_pagination_with_options(html: &str, url: &str, options: &Options) -> PaginationInfo {
    let doc = dom::parse(html);
    find_pagination_document(&doc, url, options)
}

/// Finds the previous and next page URLs of an already parsed document.
#[must_use]
pub fn find_pagination_document(doc: &Document, url: &str, options: &Options) -> PaginationInfo {
    let Ok(doc_url) = document_url(url) else {
        return PaginationInfo::default();
    };
    let info = run_detection(doc, &doc_url, options);
    PaginationInfo::from_param_info(&info, &url_utils::page_url_string(&doc_url))
}

/// Parse and normalize the document URL.
fn document_url(url: &str) -> Result<Url> {
    url_utils::parse_page_url(url).ok_or_else(|| Error::InvalidUrl(url.to_string()))
}

fn run_detection(doc: &Document, doc_url: &Url, options: &Options) -> PageParamInfo {
    let body_text = doc.select("body").text();
    let mut finder = PageNumberFinder::new(options, WordCounter::for_text(&body_text));
    finder.find_outlinks(doc, doc_url)
}
