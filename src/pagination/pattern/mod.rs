//! URL page patterns.
//!
//! A page pattern is a paging URL with its page parameter replaced by
//! [`PAGE_PARAM_PLACEHOLDER`]. Two kinds exist: the parameter is either a
//! query value (`/forum?page=[*!]`) or a numeric span of the path
//! (`/forum/page-[*!].html`). Links that produce the same template string
//! are treated as members of the same pagination.

mod path;
mod query;

use std::fmt;

use url::Url;

use crate::options::Options;

pub use path::PathPattern;
pub use query::QueryPattern;

/// Marker that stands in for the page parameter in a pattern template.
pub const PAGE_PARAM_PLACEHOLDER: &str = "[*!]";

/// A page pattern of either kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PagePattern {
    Query(QueryPattern),
    Path(PathPattern),
}

impl PagePattern {
    /// The template string, used as the identity of the pattern.
    #[must_use]
    pub fn template(&self) -> &str {
        match self {
            Self::Query(p) => p.template(),
            Self::Path(p) => p.template(),
        }
    }

    /// Parameter value found in the URL the pattern was built from.
    #[must_use]
    pub fn page_number(&self) -> i64 {
        match self {
            Self::Query(p) => p.page_number(),
            Self::Path(p) => p.page_number(),
        }
    }

    /// Whether the pattern can describe pages of the document at `doc_url`.
    #[must_use]
    pub fn is_valid_for(&self, doc_url: &Url) -> bool {
        match self {
            Self::Query(p) => p.is_valid_for(doc_url),
            Self::Path(p) => p.is_valid_for(doc_url),
        }
    }

    /// Whether `url` is a page of this pattern, including the unnumbered
    /// first page where the pattern allows one.
    #[must_use]
    pub fn is_paging_url(&self, url: &str) -> bool {
        match self {
            Self::Query(p) => p.is_paging_url(url),
            Self::Path(p) => p.is_paging_url(url),
        }
    }
}

impl fmt::Display for PagePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.template())
    }
}

/// One pattern per numeric query value of `url`, in query order.
#[must_use]
pub fn query_patterns(url: &Url, options: &Options) -> Vec<PagePattern> {
    url.query_pairs()
        .filter_map(|(name, value)| QueryPattern::new(url, &name, &value, options).ok())
        .map(PagePattern::Query)
        .collect()
}

/// One pattern per usable numeric span of the path of `url`.
#[must_use]
pub fn path_patterns(url: &Url, options: &Options) -> Vec<PagePattern> {
    PathPattern::all_from_url(url, options)
        .into_iter()
        .map(PagePattern::Path)
        .collect()
}

/// Non-empty, non-negative decimal integer.
pub(crate) fn is_page_param_value(s: &str) -> bool {
    !s.is_empty() && s.parse::<i64>().is_ok_and(|v| v >= 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_patterns_follow_query_order() {
        let url = Url::parse("http://www.foo.com/a?b=3&page=2&c=x").unwrap();
        let patterns = query_patterns(&url, &Options::default());
        let templates: Vec<&str> = patterns.iter().map(PagePattern::template).collect();
        assert_eq!(
            templates,
            vec![
                "http://www.foo.com/a?b=[*!]&c=x&page=2",
                "http://www.foo.com/a?b=3&c=x&page=[*!]",
            ]
        );
        assert_eq!(patterns[1].page_number(), 2);
    }

    #[test]
    fn display_is_template() {
        let url = Url::parse("http://www.foo.com/a/b-3.html").unwrap();
        let patterns = path_patterns(&url, &Options::default());
        assert_eq!(patterns.len(), 1);
        assert_eq!(patterns[0].to_string(), "http://www.foo.com/a/b-[*!].html");
        assert_eq!(patterns[0].page_number(), 3);
    }

    #[test]
    fn page_param_values_are_non_negative_integers() {
        assert!(is_page_param_value("0"));
        assert!(is_page_param_value("12"));
        assert!(!is_page_param_value(""));
        assert!(!is_page_param_value("-1"));
        assert!(!is_page_param_value("b"));
    }
}
