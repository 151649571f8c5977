//! URL handling module for Site-Mirror
//!
//! This module provides link resolution, hostname classification and the
//! deterministic URL to mirror path mapping.

mod host;
mod path_map;
mod resolve;

// Re-export main functions
pub use host::{extract_host, is_fetchable_scheme, is_same_host};
pub use path_map::{sanitize_path, PathMapper, SEPARATOR};
pub use resolve::{parse_seed, resolve_link};

/// How the crawl driver treats a discovered link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkScope {
    /// Same hostname as the seed and an http(s) scheme - may be downloaded
    Crawlable,
    /// A different hostname - counted but never fetched
    CrossHost,
    /// Same hostname but a scheme the fetcher cannot retrieve
    UnsupportedScheme,
}

/// Classifies a resolved link relative to the seed hostname
///
/// The hostname check comes first, so a `mailto:` link (which has no host) is
/// reported as cross-host rather than as an unsupported scheme.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use site_mirror::url::{classify_link, LinkScope};
///
/// let link = Url::parse("http://example.test/a").unwrap();
/// assert_eq!(classify_link(&link, "example.test"), LinkScope::Crawlable);
///
/// let link = Url::parse("http://other.test/b").unwrap();
/// assert_eq!(classify_link(&link, "example.test"), LinkScope::CrossHost);
/// ```
pub fn classify_link(link: &::url::Url, seed_host: &str) -> LinkScope {
    if !is_same_host(link, seed_host) {
        LinkScope::CrossHost
    } else if !is_fetchable_scheme(link) {
        LinkScope::UnsupportedScheme
    } else {
        LinkScope::Crawlable
    }
}
