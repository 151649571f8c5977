//! HTML parser for extracting links
//!
//! Parsing is permissive (html5ever error recovery): malformed markup yields
//! whatever links can be recovered and never fails the page.

use crate::url::resolve_link;
use scraper::{Html, Selector};
use url::Url;

/// Extracted information from an HTML page
#[derive(Debug, Clone, Default)]
pub struct ParsedPage {
    /// The page title (from <title> tag)
    pub title: Option<String>,

    /// All hyperlink targets found on the page, resolved against the page URL
    pub links: Vec<Url>,
}

/// Parses page content and extracts its hyperlinks
///
/// # Link Extraction Rules
///
/// - Every `<a href>` and `<area href>` element contributes its target
/// - Elements without an `href` attribute contribute nothing
/// - Targets are resolved against `base_url`; unresolvable targets are dropped
/// - Schemes are NOT filtered here (`mailto:` etc. come back as-is)
///
/// The body is decoded as lossy UTF-8, so binary content simply yields no links.
///
/// # Example
///
/// ```
/// use site_mirror::crawler::parse_page;
/// use url::Url;
///
/// let html = br#"<html><head><title>Test</title></head><body><a href="/page">Link</a></body></html>"#;
/// let base_url = Url::parse("https://example.com/").unwrap();
/// let parsed = parse_page(html, &base_url);
/// assert_eq!(parsed.title, Some("Test".to_string()));
/// assert_eq!(parsed.links[0].as_str(), "https://example.com/page");
/// ```
pub fn parse_page(body: &[u8], base_url: &Url) -> ParsedPage {
    let html = String::from_utf8_lossy(body);
    let document = Html::parse_document(&html);

    ParsedPage {
        title: extract_title(&document),
        links: extract_links(&document, base_url),
    }
}

/// Extracts the page title from the HTML document
fn extract_title(document: &Html) -> Option<String> {
    let title_selector = Selector::parse("title").ok()?;

    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Extracts all hyperlink targets from the HTML document
fn extract_links(document: &Html, base_url: &Url) -> Vec<Url> {
    let mut links = Vec::new();

    let Ok(selector) = Selector::parse("a[href], area[href]") else {
        return links;
    };

    for element in document.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        match resolve_link(base_url, href) {
            Ok(url) => links.push(url),
            Err(e) => tracing::debug!("Dropping link on {}: {}", base_url, e),
        }
    }

    links
}
