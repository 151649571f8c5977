use url::Url;

/// Extracts the hostname from a URL
///
/// This function retrieves the host portion of a URL and converts it to lowercase.
/// The port is never part of the result, so `http://example.test:8080/` and
/// `http://example.test/` share the same hostname.
///
/// # Arguments
///
/// * `url` - The URL to extract the hostname from
///
/// # Returns
///
/// * `Some(String)` - The lowercase hostname
/// * `None` - If the URL has no host (e.g. `mailto:` or `data:` URLs)
///
/// # Examples
///
/// ```
/// use url::Url;
/// use site_mirror::url::extract_host;
///
/// let url = Url::parse("https://example.com/path").unwrap();
/// assert_eq!(extract_host(&url), Some("example.com".to_string()));
///
/// let url = Url::parse("https://EXAMPLE.COM:8443/path").unwrap();
/// assert_eq!(extract_host(&url), Some("example.com".to_string()));
///
/// let url = Url::parse("mailto:someone@example.com").unwrap();
/// assert_eq!(extract_host(&url), None);
/// ```
pub fn extract_host(url: &Url) -> Option<String> {
    url.host_str()
        .filter(|h| !h.is_empty())
        .map(|h| h.to_lowercase())
}

/// Returns true if a URL uses a scheme the fetcher can retrieve (http or https)
pub fn is_fetchable_scheme(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}

/// Returns true if the URL's hostname equals the seed hostname
pub fn is_same_host(url: &Url, seed_host: &str) -> bool {
    extract_host(url).is_some_and(|host| host == seed_host)
}
