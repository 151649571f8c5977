use crate::url::{extract_host, is_fetchable_scheme};
use crate::UrlError;
use url::Url;

/// Resolves a link found on a page into an absolute URL
///
/// Resolution follows standard URL semantics: relative paths, protocol-relative
/// links (`//host/path`), query-only and fragment-only links are all joined
/// against `base`. Unsupported schemes (`mailto:`, `javascript:`, ...) are NOT
/// rejected here; the crawl driver decides what it is willing to fetch.
///
/// # Arguments
///
/// * `base` - The URL of the page the link was found on
/// * `href` - The raw attribute value
///
/// # Returns
///
/// * `Ok(Url)` - The absolute URL
/// * `Err(UrlError)` - The link could not be joined against the base
///
/// # Examples
///
/// ```
/// use url::Url;
/// use site_mirror::url::resolve_link;
///
/// let base = Url::parse("http://example.test/docs/index").unwrap();
/// assert_eq!(resolve_link(&base, "guide").unwrap().as_str(), "http://example.test/docs/guide");
/// assert_eq!(resolve_link(&base, "/a").unwrap().as_str(), "http://example.test/a");
/// assert_eq!(resolve_link(&base, "//other.test/b").unwrap().as_str(), "http://other.test/b");
/// ```
pub fn resolve_link(base: &Url, href: &str) -> Result<Url, UrlError> {
    base.join(href.trim())
        .map_err(|e| UrlError::Parse(format!("cannot resolve '{}' against {}: {}", href, base, e)))
}

/// Parses and validates the seed URL given on the command line
///
/// The seed must be absolute, use http or https, and carry a hostname; the
/// hostname scopes the whole crawl.
pub fn parse_seed(seed: &str) -> Result<Url, UrlError> {
    let url = Url::parse(seed.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    if !is_fetchable_scheme(&url) {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if extract_host(&url).is_none() {
        return Err(UrlError::MissingHost);
    }

    Ok(url)
}
