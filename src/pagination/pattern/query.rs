//! Page parameter carried in the query string.
//!
//! `http://www.foo.com/a/b/?page=2&query=a` becomes
//! `http://www.foo.com/a/b/?page=[*!]&query=a`. Query pairs in the template
//! are sorted by name so that links listing their parameters in different
//! orders share one template.

use url::Url;

use super::{is_page_param_value, PAGE_PARAM_PLACEHOLDER};
use crate::error::{Error, Result};
use crate::options::Options;
use crate::patterns::TRAILING_SLASH_HTML;
use crate::url_utils::{origin_str, parse_url, same_origin};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPattern {
    url: Url,
    param_name: String,
    query: Vec<(String, String)>,
    template: String,
    page_number: i64,
}

impl QueryPattern {
    /// Build the pattern for query parameter `name` of `url`, whose current
    /// value is `value`.
    pub fn new(url: &Url, name: &str, value: &str, options: &Options) -> Result<Self> {
        if name.is_empty() {
            return Err(Error::InvalidPattern("empty query name".to_string()));
        }
        if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidPattern(format!(
                "query value is not a number: {name}={value}"
            )));
        }
        if options.is_bad_param_name(name) {
            return Err(Error::InvalidPattern(format!("bad page param name: {name}")));
        }
        let page_number = value
            .parse::<i64>()
            .map_err(|_| Error::InvalidPattern(format!("query value out of range: {value}")))?;

        let mut query: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(k, _)| k != name)
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        query.push((name.to_string(), PAGE_PARAM_PLACEHOLDER.to_string()));
        query.sort_by(|a, b| a.0.cmp(&b.0));

        let encoded: Vec<String> = query.iter().map(|(k, v)| format!("{k}={v}")).collect();
        let template = format!("{}{}?{}", origin_str(url), url.path(), encoded.join("&"));

        let mut url = url.clone();
        url.set_fragment(None);

        Ok(Self {
            url,
            param_name: name.to_string(),
            query,
            template,
            page_number,
        })
    }

    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    #[must_use]
    pub fn page_number(&self) -> i64 {
        self.page_number
    }

    /// Same scheme, host and path as the document, ignoring a trailing slash
    /// or `.htm(l)` extension.
    #[must_use]
    pub fn is_valid_for(&self, doc_url: &Url) -> bool {
        same_origin(&self.url, doc_url) && same_trimmed_path(&self.url, doc_url)
    }

    /// Whether `url` has the same scheme, host and path, only query names
    /// known to the pattern, identical values for every other parameter and
    /// a number (or nothing) for the page parameter.
    #[must_use]
    pub fn is_paging_url(&self, url: &str) -> bool {
        let Some(candidate) = parse_url(url) else {
            return false;
        };
        if !same_origin(&self.url, &candidate) || !same_trimmed_path(&self.url, &candidate) {
            return false;
        }

        let candidate_query: Vec<(String, String)> = candidate
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        if !candidate_query
            .iter()
            .all(|(k, _)| self.query.iter().any(|(name, _)| name == k))
        {
            return false;
        }

        let mut checked: Vec<&str> = Vec::new();
        for (name, _) in &self.query {
            if checked.contains(&name.as_str()) {
                continue;
            }
            checked.push(name);

            let candidate_values: Vec<&str> = values_of(&candidate_query, name).collect();
            if *name == self.param_name {
                if !candidate_values.is_empty()
                    && !candidate_values.iter().any(|v| is_page_param_value(v))
                {
                    return false;
                }
                continue;
            }

            if candidate_values.is_empty() {
                return false;
            }
            if !values_of(&self.query, name).eq(candidate_values.iter().copied()) {
                return false;
            }
        }

        true
    }
}

fn values_of<'a>(query: &'a [(String, String)], name: &'a str) -> impl Iterator<Item = &'a str> {
    query
        .iter()
        .filter(move |(k, _)| k == name)
        .map(|(_, v)| v.as_str())
}

fn same_trimmed_path(a: &Url, b: &Url) -> bool {
    TRAILING_SLASH_HTML.replace(a.path(), "") == TRAILING_SLASH_HTML.replace(b.path(), "")
}
