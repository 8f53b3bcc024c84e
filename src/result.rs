//! Result types for pagination detection output.
//!
//! [`PageParamInfo`] is what the detection engine produces; [`PaginationInfo`]
//! is the prev/next pair derived from it for callers that only want links.

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

/// Kind of value carried by the page parameter of paging URLs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamType {
    /// Nothing detected.
    #[default]
    Unset,
    /// The parameter value is a function of the page number.
    PageNumber,
    /// Detected, but the value's meaning is not known.
    Unknown,
}

/// A page number observed in the document, with the URL it links to.
///
/// An empty `url` marks a plain-text number, usually the current page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    /// Page number as displayed in the document.
    pub page_number: i64,

    /// Absolute link target, or empty for plain text.
    pub url: String,
}

impl PageInfo {
    /// Create a new page observation.
    #[must_use]
    pub fn new(page_number: i64, url: impl Into<String>) -> Self {
        Self {
            page_number,
            url: url.into(),
        }
    }

    /// Whether this observation came from plain text rather than a link.
    #[must_use]
    pub fn is_plain_text(&self) -> bool {
        self.url.is_empty()
    }
}

impl fmt::Display for PageInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pg{}: {}", self.page_number, self.url)
    }
}

/// `param_value = coefficient * page_number + delta`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LinearFormula {
    pub coefficient: i64,
    pub delta: i64,
}

impl LinearFormula {
    #[must_use]
    pub fn new(coefficient: i64, delta: i64) -> Self {
        Self { coefficient, delta }
    }

    /// Parameter value the formula predicts for `page_number`, or `None`
    /// if it does not fit in an `i64`.
    #[must_use]
    pub fn param_value(&self, page_number: i64) -> Option<i64> {
        self.coefficient
            .checked_mul(page_number)?
            .checked_add(self.delta)
    }
}

impl fmt::Display for LinearFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "coefficient={}, delta={}", self.coefficient, self.delta)
    }
}

/// Page parameter detected from pagination links with numeric anchor text.
///
/// `pattern` is a URL template with the page parameter replaced by
/// [`crate::PAGE_PARAM_PLACEHOLDER`]; `pages` is ordered by ascending page
/// number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PageParamInfo {
    pub param_type: ParamType,
    pub pattern: String,
    pub pages: Vec<PageInfo>,
    pub formula: Option<LinearFormula>,
    pub next_paging_url: String,

    /// Another pattern scored exactly as well as the winning one.
    pub multiple_patterns: bool,
}

impl PageParamInfo {
    /// Whether anything was detected.
    #[must_use]
    pub fn is_detected(&self) -> bool {
        self.param_type != ParamType::Unset
    }

    /// Rank two results.
    ///
    /// A fitted formula beats none. With formulas on equal footing a
    /// `PageNumber` type beats any other. Everything else is a tie.
    #[must_use]
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self.formula.is_some(), other.formula.is_some()) {
            (true, false) => return Ordering::Greater,
            (false, true) => return Ordering::Less,
            _ => {}
        }

        if self.param_type == other.param_type {
            return Ordering::Equal;
        }
        if self.param_type == ParamType::PageNumber {
            return Ordering::Greater;
        }
        if other.param_type == ParamType::PageNumber {
            return Ordering::Less;
        }
        Ordering::Equal
    }

    /// Whether the document URL can be prepended as an unparameterized
    /// page 1.
    ///
    /// First pages often carry no page parameter. The document qualifies
    /// when the detected pages are exactly 2, 3, ... without it, its URL is
    /// shorter than theirs, and no link labelled "1" points elsewhere (that
    /// usually means the document is the last page instead).
    #[must_use]
    pub fn can_insert_first_page(&self, doc_url: &str, ascending_numbers: &[PageInfo]) -> bool {
        let Some(first) = self.pages.first() else {
            return false;
        };
        if self.pages.len() < 2 || first.page_number == 1 || doc_url.len() >= first.url.len() {
            return false;
        }

        let pages_from_two = self
            .pages
            .iter()
            .zip(2..)
            .all(|(page, expected)| page.page_number == expected && page.url != doc_url);
        if !pages_from_two {
            return false;
        }

        !ascending_numbers
            .iter()
            .any(|link| link.page_number == 1 && !link.url.is_empty() && link.url != doc_url)
    }

    /// Prepend the document URL as page 1.
    pub fn insert_first_page(&mut self, doc_url: &str) {
        self.pages.insert(0, PageInfo::new(1, doc_url));
    }

    /// Fill `next_paging_url` with the page following the document, if the
    /// document is among the pages and nothing was set yet.
    pub fn determine_next_paging_url(&mut self, doc_url: &str) {
        if !self.next_paging_url.is_empty() {
            return;
        }

        if let Some(pos) = self.pages.iter().position(|page| page.url == doc_url) {
            if let Some(next) = self.pages.get(pos + 1) {
                self.next_paging_url = next.url.clone();
            }
        }
    }
}

impl fmt::Display for PageParamInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "type: {:?}", self.param_type)?;
        writeln!(f, "pages: {}", self.pages.len())?;
        writeln!(f, "pattern: {}", self.pattern)?;
        for page in &self.pages {
            writeln!(f, "  {page}")?;
        }
        match &self.formula {
            Some(formula) => writeln!(f, "formula: {formula}")?,
            None => writeln!(f, "formula: none")?,
        }
        write!(f, "next: {}", self.next_paging_url)
    }
}

/// Previous and next page URLs of a document, empty when unknown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PaginationInfo {
    pub prev_page: String,
    pub next_page: String,
}

impl PaginationInfo {
    /// Derive prev/next links from a detection result and the normalized
    /// document URL.
    #[must_use]
    pub fn from_param_info(info: &PageParamInfo, doc_url: &str) -> Self {
        if info.param_type != ParamType::PageNumber {
            return Self::default();
        }

        let next_page = info.next_paging_url.clone();
        if next_page.is_empty() {
            // Document is the last page; the previous one is the last link
            // that is not the document itself.
            let prev_page = info
                .pages
                .iter()
                .rev()
                .find(|page| page.url != doc_url)
                .map(|page| page.url.clone())
                .unwrap_or_default();
            return Self {
                prev_page,
                next_page,
            };
        }

        let prev_page = info
            .pages
            .iter()
            .position(|page| page.url == next_page)
            .and_then(|next_pos| {
                info.pages[..next_pos]
                    .iter()
                    .rev()
                    .find(|page| page.url.is_empty() || page.url != doc_url)
            })
            .map(|page| page.url.clone())
            .unwrap_or_default();

        Self {
            prev_page,
            next_page,
        }
    }
}
