//! Page parameter carried in the URL path.
//!
//! `http://www.foo.com/a/b-3.html` becomes `http://www.foo.com/a/b-[*!].html`.
//! Offsets kept on the pattern (`placeholder_start`, `segment_start`) index
//! into the template string.

use url::Url;

use super::{is_page_param_value, PAGE_PARAM_PLACEHOLDER};
use crate::error::{Error, Result};
use crate::options::Options;
use crate::patterns::{
    DIGITS, LAST_PATH_COMPONENT, ONLY_SHTML, PAGE_PARAM_SEPARATOR, TRAILING_SHTML,
};
use crate::url_utils::origin_str;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    template: String,
    pattern_path: String,
    page_number: i64,

    origin_len: usize,
    /// Index of the path component holding the placeholder, counting the
    /// empty component before the leading '/'.
    param_index: usize,
    placeholder_start: usize,
    /// Position of the '/' that opens the placeholder's component.
    segment_start: usize,
    prefix: String,
    suffix: String,
}

impl PathPattern {
    /// Build the pattern replacing `path[digit_start..digit_end]` of `url`.
    pub fn new(url: &Url, digit_start: usize, digit_end: usize, options: &Options) -> Result<Self> {
        let path = url.path();
        let digits = path
            .get(digit_start..digit_end)
            .ok_or_else(|| Error::InvalidPattern(format!("bad digit span in {path}")))?;

        if is_last_numeric_component_bad(path, digit_start, digit_end, options) {
            return Err(Error::InvalidPattern(format!(
                "numeric component follows bad param name: {path}"
            )));
        }

        let page_number = digits
            .parse::<i64>()
            .ok()
            .filter(|v| *v >= 0)
            .ok_or_else(|| Error::InvalidPattern(format!("invalid number {digits}")))?;

        let pattern_path = format!(
            "{}{}{}",
            &path[..digit_start],
            PAGE_PARAM_PLACEHOLDER,
            &path[digit_end..]
        );
        let origin = origin_str(url);
        let template = format!("{origin}{pattern_path}");

        let placeholder_start = origin.len() + digit_start;
        let segment_start = template[..placeholder_start]
            .rfind('/')
            .ok_or_else(|| Error::InvalidPattern(format!("no path segment in {template}")))?;
        let prefix = template[..segment_start].to_string();
        let suffix = template[placeholder_start + PAGE_PARAM_PLACEHOLDER.len()..].to_string();

        let components: Vec<&str> = pattern_path.split('/').collect();
        let param_index = components
            .iter()
            .position(|c| c.contains(PAGE_PARAM_PLACEHOLDER))
            .ok_or_else(|| Error::InvalidPattern(format!("placeholder lost in {template}")))?;

        // "/[*!]" alone would match every top-level page of the site.
        if param_index == 1
            && components.len() == 2
            && suffix.is_empty()
            && placeholder_start - 1 == segment_start
        {
            return Err(Error::InvalidPattern(format!(
                "page number is the first path component: {template}"
            )));
        }

        Ok(Self {
            origin_len: origin.len(),
            template,
            pattern_path,
            page_number,
            param_index,
            placeholder_start,
            segment_start,
            prefix,
            suffix,
        })
    }

    /// Every pattern obtainable from the numeric spans of the path.
    ///
    /// If the path has digits but none of them yields a pattern, the URL is
    /// tried as the first page of a `<path>/[*!]` pagination.
    #[must_use]
    pub fn all_from_url(url: &Url, options: &Options) -> Vec<Self> {
        let path = url.path();
        if path.trim_matches('/').is_empty() || !DIGITS.is_match(path) {
            return Vec::new();
        }

        let patterns: Vec<Self> = DIGITS
            .find_iter(path)
            .filter(|m| !inside_percent_escape(path, m.start()))
            .filter_map(|m| Self::new(url, m.start(), m.end(), options).ok())
            .collect();
        if !patterns.is_empty() {
            return patterns;
        }

        let base = path.trim_end_matches('/');
        let start = base.len() + 1;
        let mut first_page = url.clone();
        first_page.set_path(&format!("{base}/1"));
        Self::new(&first_page, start, start + 1, options)
            .map(|p| vec![p])
            .unwrap_or_default()
    }

    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    #[must_use]
    pub fn page_number(&self) -> i64 {
        self.page_number
    }

    /// Whether the document path matches the pattern component by component
    /// and the pattern does not look like a date archive.
    ///
    /// The document may lack the placeholder component, e.g. `/thread/12` is
    /// valid for `/thread/12/page/[*!]`.
    #[must_use]
    pub fn is_valid_for(&self, doc_url: &Url) -> bool {
        let doc_path = component_path(doc_url);
        let doc_len = doc_path.split('/').count();
        let pattern_len = self.pattern_path.split('/').count();

        if doc_len > pattern_len {
            return false;
        }

        if doc_len == 1 && pattern_len == 1 {
            let prefix_len = common_prefix_len(doc_path, &self.pattern_path);
            let suffix_len = common_suffix_len(doc_path, &self.pattern_path, prefix_len);
            return (prefix_len + suffix_len) * 2 >= doc_path.len();
        }

        self.has_same_path_components(doc_path) && !self.is_calendar_page()
    }

    /// Whether `url` belongs to this pattern.
    ///
    /// Both must end in the pattern's suffix. What precedes it depends on
    /// where the placeholder sits in its path component.
    #[must_use]
    pub fn is_paging_url(&self, url: &str) -> bool {
        if !self.suffix.is_empty() && !url.ends_with(&self.suffix) {
            return false;
        }

        if self.template.as_bytes().get(self.placeholder_start - 1) == Some(&b'/') {
            self.is_paging_url_at_component_start(url)
        } else {
            self.is_paging_url_inside_component(url)
        }
    }

    /// For `/a/[*!]/abc.html`: `/a/2/abc.html`, `/a/abc.html` and
    /// `/abc.html` all match.
    fn is_paging_url_at_component_start(&self, url: &str) -> bool {
        let url_len = url.len();
        let suffix_len = self.suffix.len();
        let suffix_start = url_len - suffix_len;

        if let Some(prev_component) = self.template[..self.segment_start].rfind('/') {
            if prev_component >= self.origin_len && prev_component + suffix_len == url_len {
                // Neither the page number nor its parent component.
                return url.get(..prev_component) == self.template.get(..prev_component);
            }
        }

        if !url.starts_with(&self.prefix) {
            return false;
        }

        let accept_len = self.segment_start + suffix_len;
        if accept_len == url_len {
            return true;
        }
        if accept_len > url_len {
            return false;
        }

        url.as_bytes().get(self.segment_start) == Some(&b'/')
            && url
                .get(self.segment_start + 1..suffix_start)
                .is_some_and(is_page_param_value)
    }

    /// For `/a/abc-[*!].html`: `/a/abc-2.html` and `/a/abc.html` match.
    fn is_paging_url_inside_component(&self, url: &str) -> bool {
        if !url.starts_with(&self.prefix) {
            return false;
        }

        let suffix_start = url.len() - self.suffix.len();
        let max_pos = self.placeholder_start.min(suffix_start);
        let url_bytes = url.as_bytes();
        let template_bytes = self.template.as_bytes();

        let mut first_diff = self.segment_start;
        while first_diff < max_pos && url_bytes.get(first_diff) == template_bytes.get(first_diff) {
            first_diff += 1;
        }

        if first_diff == suffix_start {
            // Page number left out, possibly together with its separator.
            if first_diff == self.placeholder_start {
                return true;
            }
            return first_diff + 1 == self.placeholder_start
                && self
                    .template
                    .get(first_diff..=first_diff)
                    .is_some_and(|c| PAGE_PARAM_SEPARATOR.is_match(c));
        }

        first_diff == self.placeholder_start
            && url
                .get(first_diff..suffix_start)
                .is_some_and(is_page_param_value)
    }

    /// Compare path components, skipping the placeholder component once.
    ///
    /// A document with fewer components is compared as if the placeholder
    /// component were absent: `/thread/12/foo` matches
    /// `/thread/12/[*!]/foo` but not `/thread/12/page/[*!]/foo`.
    fn has_same_path_components(&self, doc_path: &str) -> bool {
        let doc_path = TRAILING_SHTML.replace(doc_path, "");
        let doc_components: Vec<&str> = doc_path.split('/').collect();
        let pattern_components: Vec<&str> = self.pattern_path.split('/').collect();
        let doc_shorter = doc_components.len() < pattern_components.len();

        let (mut i, mut j) = (0, 0);
        let mut passed_param = false;
        while i < doc_components.len() && j < pattern_components.len() {
            if i == self.param_index && !passed_param {
                passed_param = true;
                if !doc_shorter {
                    i += 1;
                }
                j += 1;
                continue;
            }

            if !doc_components[i].eq_ignore_ascii_case(pattern_components[j]) {
                return false;
            }
            i += 1;
            j += 1;
        }

        true
    }

    /// `/<year>/<month>/[*!]`: a date archive, not a pagination.
    fn is_calendar_page(&self) -> bool {
        if self.param_index < 2 {
            return false;
        }

        let components: Vec<&str> = self.pattern_path.split('/').collect();
        // Only when the placeholder is the whole component, so that
        // "/2014/07/story-109467_Page[*!].html" stays valid.
        if components[self.param_index] != PAGE_PARAM_PLACEHOLDER {
            return false;
        }

        let number = |c: &str| c.parse::<i64>().unwrap_or(0);
        let month = number(components[self.param_index - 1]);
        let year = number(components[self.param_index - 2]);
        (1..=12).contains(&month) && year > 1970 && year < 3000
    }
}

/// True when the numeric span is a whole last path component (optionally
/// followed by an `.(s)htm(l)` extension) whose parent component is a
/// generic name, e.g. `/tag/2`.
#[must_use]
pub fn is_last_numeric_component_bad(
    path: &str,
    digit_start: usize,
    digit_end: usize,
    options: &Options,
) -> bool {
    let (Some(before), Some(after)) = (path.get(..digit_start), path.get(digit_end..)) else {
        return false;
    };
    if !ONLY_SHTML.is_match(after) {
        return false;
    }

    LAST_PATH_COMPONENT
        .captures(before)
        .and_then(|c| c.get(1))
        .is_some_and(|name| options.is_bad_param_name(name.as_str()))
}

/// Path used for component comparison: the root path counts as empty.
fn component_path(url: &Url) -> &str {
    match url.path() {
        "/" => "",
        path => path,
    }
}

/// Digits of a `%XX` escape are not page numbers.
fn inside_percent_escape(path: &str, start: usize) -> bool {
    let bytes = path.as_bytes();
    (start >= 1 && bytes[start - 1] == b'%')
        || (start >= 2 && bytes[start - 2] == b'%' && bytes[start - 1].is_ascii_hexdigit())
}

fn common_prefix_len(a: &str, b: &str) -> usize {
    a.bytes().zip(b.bytes()).take_while(|(x, y)| x == y).count()
}

fn common_suffix_len(a: &str, b: &str, prefix_len: usize) -> usize {
    a.bytes()
        .rev()
        .zip(b.bytes().rev())
        .take(a.len().min(b.len()).saturating_sub(prefix_len + 1))
        .take_while(|(x, y)| x == y)
        .count()
}
