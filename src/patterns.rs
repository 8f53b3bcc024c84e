//! Compiled regex patterns for pagination detection.
//!
//! All patterns are compiled once at first use using `LazyLock`.
//! Patterns are organized by the stage of the detection pipeline using them.
//! Digit classes are spelled `[0-9]` because `\d` is Unicode-aware in `regex`
//! and `str::parse` only accepts ASCII digits.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Document Scanning Patterns
// =============================================================================

/// Brackets stripped from anchor text before parsing it as a number,
/// e.g. "[2]" or "(3)".
pub static LINK_NUMBER_CLEANER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[()\[\]{}]").expect("LINK_NUMBER_CLEANER regex"));

/// Any run of ASCII digits.
pub static DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("DIGITS regex"));

/// A term of plain text: a non-space run containing at least one ASCII word
/// character or letter of a non-CJK script.
pub static TERMS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\S*[0-9A-Za-z_\x{00C0}-\x{1FFF}\x{AC00}-\x{D7AF}]\S*").expect("TERMS regex")
});

/// A term that is a number surrounded only by punctuation, e.g. "3", "[3]", "3,".
pub static SURROUNDING_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\W_]*([0-9]+)[\W_]*$").expect("SURROUNDING_DIGITS regex"));

/// Parents the leaf search must not climb into.
pub static INVALID_PARENT_WRAPPER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(body|html)$").expect("INVALID_PARENT_WRAPPER regex"));

// =============================================================================
// URL Pattern Patterns
// =============================================================================

/// Trailing slash or `.htm(l)` extension of a URL path.
pub static TRAILING_SLASH_HTML: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:/|\.html?)$").expect("TRAILING_SLASH_HTML regex"));

/// Optional trailing `.(s)htm(l)` extension, used to trim a path.
pub static TRAILING_SHTML: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\.s?html?)?$").expect("TRAILING_SHTML regex"));

/// Entire remainder is empty or a `.(s)htm(l)` extension.
pub static ONLY_SHTML: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(\.s?html?)?$").expect("ONLY_SHTML regex"));

/// Last path component of a path ending in '/'.
pub static LAST_PATH_COMPONENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([^/]*)/$").expect("LAST_PATH_COMPONENT regex"));

/// Characters that may separate a page number from the rest of a path component.
pub static PAGE_PARAM_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-_;,]$").expect("PAGE_PARAM_SEPARATOR regex"));

// =============================================================================
// Word Counting Patterns
// =============================================================================

/// Hiragana, Katakana and CJK ideographs.
pub static CJK_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\x{3040}-\x{A4CF}]").expect("CJK_CHARS regex"));

/// Hangul syllables.
pub static HANGUL_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\x{AC00}-\x{D7AF}]").expect("HANGUL_CHARS regex"));

/// Words of alphabetic scripts plus Hangul.
pub static LETTER_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\S*[0-9A-Za-z_\x{00C0}-\x{1FFF}\x{AC00}-\x{D7AF}]\S*").expect("LETTER_WORD regex")
});

/// Words of alphabetic scripts only.
pub static FAST_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S*[0-9A-Za-z_\x{00C0}-\x{1FFF}]\S*").expect("FAST_WORD regex"));
