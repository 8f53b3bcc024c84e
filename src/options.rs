//! Configuration options for pagination detection.
//!
//! The `Options` struct holds the tunables of the detection engine. Use
//! `Default::default()` for standard settings.

use std::collections::HashSet;

/// Query/path parameter names considered too generic to carry a page number.
pub const DEFAULT_BAD_PARAM_NAMES: &[&str] = &[
    "baixar-gratis",
    "category",
    "content",
    "day",
    "date",
    "definition",
    "etiket",
    "film-seyret",
    "key",
    "keys",
    "keyword",
    "label",
    "news",
    "q",
    "query",
    "rating",
    "s",
    "search",
    "seasons",
    "search_keyword",
    "search_query",
    "sortby",
    "subscriptions",
    "tag",
    "tags",
    "video",
    "videos",
    "w",
    "wiki",
];

/// Configuration options for pagination detection.
///
/// # Example
///
/// ```rust
/// use rs_pagination::Options;
///
/// let options = Options {
///     max_paging_docs: 20,
///     ..Options::default()
/// };
/// assert_eq!(options.max_page_number, 100);
/// ```
#[derive(Debug, Clone)]
pub struct Options {
    /// Largest number accepted as a page number candidate, in anchor text
    /// or plain text.
    ///
    /// Default: `100`
    pub max_page_number: i64,

    /// Minimum number of links sharing a pattern before a linear formula is
    /// fitted. With fewer links only the single-link fallback applies.
    ///
    /// Default: `2`
    pub min_links_for_linear_map: usize,

    /// Patterns matched by more links than this are considered too broad
    /// and skipped.
    ///
    /// Default: `100`
    pub max_paging_docs: usize,

    /// Parameter names never treated as page parameters.
    ///
    /// Default: [`DEFAULT_BAD_PARAM_NAMES`]
    pub bad_param_names: HashSet<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_page_number: 100,
            min_links_for_linear_map: 2,
            max_paging_docs: 100,
            bad_param_names: DEFAULT_BAD_PARAM_NAMES
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
        }
    }
}

impl Options {
    /// Check whether `name` is on the deny-list of generic parameter names.
    #[must_use]
    pub fn is_bad_param_name(&self, name: &str) -> bool {
        self.bad_param_names.contains(name)
    }

    /// Check whether `number` may be a page number.
    #[must_use]
    pub fn is_page_number_candidate(&self, number: i64) -> bool {
        (0..=self.max_page_number).contains(&number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_deny_list_contains_generic_names() {
        let options = Options::default();
        assert!(options.is_bad_param_name("tag"));
        assert!(options.is_bad_param_name("search_query"));
        assert!(!options.is_bad_param_name("page"));
    }

    #[test]
    fn page_number_bounds_are_inclusive() {
        let options = Options::default();
        assert!(options.is_page_number_candidate(0));
        assert!(options.is_page_number_candidate(100));
        assert!(!options.is_page_number_candidate(101));
        assert!(!options.is_page_number_candidate(-1));
    }
}
