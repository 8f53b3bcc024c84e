//! Character set sniffing for raw HTML bytes.
//!
//! Used by [`crate::detect_bytes`]: pages fetched by a crawler arrive as
//! bytes, and numeric anchor text must be decoded before it can be parsed.

#![allow(clippy::expect_used)]

use std::borrow::Cow;
use std::sync::LazyLock;

use encoding_rs::{Encoding, UTF_8};
use regex::bytes::Regex;

/// Bytes of the document head searched for a charset declaration.
const SNIFF_LEN: usize = 1024;

/// `<meta charset=...>` or the charset part of a `Content-Type` meta.
static META_CHARSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([A-Za-z0-9_.:-]+)"#).expect("META_CHARSET regex")
});

/// Find the encoding declared by the document.
///
/// A byte order mark wins over a meta declaration. Unknown labels and
/// missing declarations fall back to UTF-8.
#[must_use]
pub fn sniff_encoding(html: &[u8]) -> &'static Encoding {
    if let Some((encoding, _)) = Encoding::for_bom(html) {
        return encoding;
    }

    let head = &html[..html.len().min(SNIFF_LEN)];
    META_CHARSET
        .captures(head)
        .and_then(|c| c.get(1))
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        .unwrap_or(UTF_8)
}

/// Decode HTML bytes into a string, replacing malformed sequences with
/// U+FFFD.
///
/// # Examples
///
/// ```
/// use rs_pagination::encoding::decode_html;
///
/// let html = b"<meta charset=\"windows-1252\"><a href=\"/p/2\">\x93 2 \x94</a>";
/// assert!(decode_html(html).contains("\u{201C} 2 \u{201D}"));
/// ```
#[must_use]
pub fn decode_html(html: &[u8]) -> Cow<'_, str> {
    let (decoded, _, _) = sniff_encoding(html).decode(html);
    decoded
}
