//! URL Utility Functions
//!
//! Validation, resolution and canonical string forms of the URLs compared
//! by the detection engine. Every URL that ends up in a `PageInfo` or is
//! compared against a page pattern goes through [`page_url_string`], so
//! string comparisons between them are meaningful.

use url::{Position, Url};

/// Check if a string is a valid absolute URL.
///
/// Only `http` and `https` URLs with a host are accepted.
///
/// # Returns
/// * `(is_absolute, parsed_url)` - Whether URL is absolute and the parsed URL if valid
#[must_use]
pub fn is_absolute_url(s: &str) -> (bool, Option<Url>) {
    let s = s.trim();

    if s.is_empty() {
        return (false, None);
    }

    // Must start with http:// or https://
    let lower = s.get(..8).unwrap_or(s).to_ascii_lowercase();
    if !lower.starts_with("http://") && !lower.starts_with("https://") {
        return (false, None);
    }

    match Url::parse(s) {
        Ok(url) if url.host().is_some() => (true, Some(url)),
        _ => (false, None),
    }
}

/// Convert a relative or absolute href to absolute form.
///
/// Empty, fragment-only, `data:` and `javascript:` hrefs are returned
/// unchanged so the caller can tell them apart from real links.
///
/// # Returns
/// * The absolute URL string, or the original if resolution fails
#[must_use]
pub fn create_absolute_url(url_str: &str, base: &Url) -> String {
    let url_str = url_str.trim();

    if url_str.is_empty() {
        return String::new();
    }

    // Preserve special URLs unchanged
    if url_str.starts_with('#')
        || url_str.starts_with("data:")
        || url_str.starts_with("javascript:")
        || url_str.starts_with("mailto:")
        || url_str.starts_with("tel:")
    {
        return url_str.to_string();
    }

    // If already absolute, return as-is
    let (is_abs, _) = is_absolute_url(url_str);
    if is_abs {
        return url_str.to_string();
    }

    // Resolve relative URL against base
    match base.join(url_str) {
        Ok(resolved) => resolved.to_string(),
        Err(_) => url_str.to_string(),
    }
}

/// Parse a URL string into a Url object.
///
/// # Returns
/// * `Some(Url)` if valid absolute URL, `None` otherwise
#[must_use]
pub fn parse_url(url_str: &str) -> Option<Url> {
    let (is_abs, parsed) = is_absolute_url(url_str);
    if is_abs {
        parsed
    } else {
        None
    }
}

/// Parse an absolute URL and strip the parts pagination never compares:
/// fragment, user info and a trailing path slash.
#[must_use]
pub fn parse_page_url(url_str: &str) -> Option<Url> {
    let mut url = parse_url(url_str)?;
    clean_page_url(&mut url);
    Some(url)
}

/// Remove fragment, user info and trailing path slashes in place.
pub fn clean_page_url(url: &mut Url) {
    url.set_fragment(None);
    // Only fails for URLs that cannot have credentials, which then have none.
    let _ = url.set_username("");
    let _ = url.set_password(None);

    let path = url.path();
    if path.len() > 1 && path.ends_with('/') {
        let trimmed = path.trim_end_matches('/').to_string();
        url.set_path(&trimmed);
    }
}

/// Canonical string form of a page URL.
///
/// A root path is omitted entirely, so `http://host/` and `http://host`
/// both render as `http://host`, and `http://host/?page=2` as
/// `http://host?page=2`.
#[must_use]
pub fn page_url_string(url: &Url) -> String {
    if url.path() == "/" {
        format!(
            "{}{}",
            &url[..Position::BeforePath],
            &url[Position::AfterPath..]
        )
    } else {
        url.as_str().to_string()
    }
}

/// Scheme, host and port of the URL (everything before the path).
#[must_use]
pub fn origin_str(url: &Url) -> &str {
    &url[..Position::BeforePath]
}

/// Check if two URLs share scheme, host and port.
#[must_use]
pub fn same_origin(a: &Url, b: &Url) -> bool {
    a.scheme() == b.scheme() && a.host_str() == b.host_str() && a.port() == b.port()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_urls_need_http_scheme_and_host() {
        assert!(is_absolute_url("http://example.com/a").0);
        assert!(is_absolute_url("HTTPS://example.com").0);
        assert!(!is_absolute_url("/relative/path").0);
        assert!(!is_absolute_url("javascript:void(0)").0);
        assert!(!is_absolute_url("").0);
    }

    #[test]
    fn special_hrefs_are_preserved() {
        let base = Url::parse("http://example.com/a/b").unwrap();
        assert_eq!(create_absolute_url("", &base), "");
        assert_eq!(create_absolute_url("#top", &base), "#top");
        assert_eq!(
            create_absolute_url("javascript:void(0)", &base),
            "javascript:void(0)"
        );
    }

    #[test]
    fn relative_hrefs_resolve_against_base() {
        let base = Url::parse("http://example.com/a/b").unwrap();
        assert_eq!(
            create_absolute_url("/forum?page=2", &base),
            "http://example.com/forum?page=2"
        );
        assert_eq!(create_absolute_url("c", &base), "http://example.com/a/c");
    }

    #[test]
    fn page_url_drops_fragment_userinfo_and_trailing_slash() {
        let url = parse_page_url("http://user:pw@example.com/a/b/#frag").unwrap();
        assert_eq!(page_url_string(&url), "http://example.com/a/b");

        let url = parse_page_url("http://example.com/?page=2").unwrap();
        assert_eq!(page_url_string(&url), "http://example.com?page=2");

        let url = parse_page_url("http://example.com").unwrap();
        assert_eq!(page_url_string(&url), "http://example.com");
    }

    #[test]
    fn origin_compares_scheme_host_and_port() {
        let a = Url::parse("http://example.com/a").unwrap();
        let b = Url::parse("http://example.com:80/b").unwrap();
        let c = Url::parse("http://example.com:8080/a").unwrap();
        assert!(same_origin(&a, &b));
        assert!(!same_origin(&a, &c));
        assert_eq!(origin_str(&c), "http://example.com:8080");
    }
}
