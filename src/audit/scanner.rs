//! Mirror scanner accumulating tag usage
//!
//! Every regular file beneath the scanned directory is treated as markup,
//! whatever its name or extension.

use crate::audit::AuditError;
use scraper::{Html, Selector};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// Tag usage accumulated over one audit run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagAudit {
    /// Distinct element names seen
    pub unique_tags: BTreeSet<String>,

    /// Number of `div` elements
    pub div_count: u64,

    /// Number of elements carrying an inline `style` attribute
    pub inline_styles: u64,

    /// A `math` element was found
    pub math_ml_used: bool,

    /// A social-media meta tag was found (`meta[property]`, or `meta[name]` other than viewport)
    pub social_meta_tags: bool,

    /// Files parsed
    pub files_scanned: u64,

    /// Files that could not be read
    pub files_unreadable: u64,
}

impl TagAudit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if `tag` appeared in any scanned document
    pub fn contains(&self, tag: &str) -> bool {
        self.unique_tags.contains(tag)
    }

    /// Parses one document and folds its elements into the audit
    pub fn scan_document(&mut self, html: &str) {
        let document = Html::parse_document(html);
        let Ok(all) = Selector::parse("*") else {
            return;
        };

        for element in document.select(&all) {
            let el = element.value();
            let name = el.name();

            if !self.unique_tags.contains(name) {
                self.unique_tags.insert(name.to_string());
            }

            match name {
                "div" => self.div_count += 1,
                "math" => self.math_ml_used = true,
                "meta" if is_social_meta(el.attr("property"), el.attr("name")) => {
                    self.social_meta_tags = true
                }
                _ => {}
            }

            if let Some(style) = el.attr("style") {
                tracing::debug!("Found a style attribute: {}", style);
                self.inline_styles += 1;
            }
        }

        self.files_scanned += 1;
    }
}

fn is_social_meta(property: Option<&str>, name: Option<&str>) -> bool {
    property.is_some() || name.is_some_and(|n| n != "viewport")
}

/// Recursively scans every regular file beneath `dir`
///
/// Entries are visited in sorted order. Unreadable files are logged and
/// counted, never fatal; a missing or non-directory `dir` is an error.
pub fn scan_mirror(dir: &Path) -> Result<TagAudit, AuditError> {
    if !dir.is_dir() {
        return Err(AuditError::NotADirectory(dir.to_path_buf()));
    }

    let mut audit = TagAudit::new();
    scan_dir(dir, &mut audit)?;

    tracing::info!(
        "Audited {} files under {} ({} distinct tags)",
        audit.files_scanned,
        dir.display(),
        audit.unique_tags.len()
    );

    Ok(audit)
}

fn scan_dir(dir: &Path, audit: &mut TagAudit) -> Result<(), AuditError> {
    let read_dir = fs::read_dir(dir).map_err(|source| AuditError::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut entries: Vec<_> = read_dir.filter_map(|entry| entry.ok()).collect();
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        let path = entry.path();
        let Ok(file_type) = entry.file_type() else {
            continue;
        };

        if file_type.is_dir() {
            scan_dir(&path, audit)?;
        } else if file_type.is_file() {
            match fs::read(&path) {
                Ok(bytes) => audit.scan_document(&String::from_utf8_lossy(&bytes)),
                Err(e) => {
                    tracing::warn!("Cannot read {}: {}", path.display(), e);
                    audit.files_unreadable += 1;
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_scan_document_counts() {
        let mut audit = TagAudit::new();
        audit.scan_document(
            r#"<html><head><meta property="og:title" content="x"></head>
            <body><div style="color:red"><div><span>hi</span></div></div></body></html>"#,
        );

        assert!(audit.contains("html"));
        assert!(audit.contains("span"));
        assert!(audit.contains("meta"));
        assert!(!audit.contains("table"));
        assert_eq!(audit.div_count, 2);
        assert_eq!(audit.inline_styles, 1);
        assert!(audit.social_meta_tags);
        assert!(!audit.math_ml_used);
        assert_eq!(audit.files_scanned, 1);
    }

    #[test]
    fn test_parser_adds_document_skeleton() {
        let mut audit = TagAudit::new();
        audit.scan_document("<p>fragment</p>");
        assert!(audit.contains("html"));
        assert!(audit.contains("head"));
        assert!(audit.contains("body"));
        assert!(audit.contains("p"));
    }

    #[test]
    fn test_viewport_meta_is_not_social() {
        let mut audit = TagAudit::new();
        audit.scan_document(r#"<meta name="viewport" content="width=device-width">"#);
        assert!(!audit.social_meta_tags);

        audit.scan_document(r#"<meta name="description" content="site">"#);
        assert!(audit.social_meta_tags);
    }

    #[test]
    fn test_math_detected() {
        let mut audit = TagAudit::new();
        audit.scan_document("<body><math><mi>x</mi></math></body>");
        assert!(audit.math_ml_used);
    }

    #[test]
    fn test_scan_mirror_recurses_all_files() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("sub");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join("_"), "<div><nav></nav></div>").unwrap();
        fs::write(nested.join("_page_txt"), "<table><tr><td>1</td></tr></table>").unwrap();

        let audit = scan_mirror(dir.path()).unwrap();

        assert_eq!(audit.files_scanned, 2);
        assert!(audit.contains("nav"));
        assert!(audit.contains("td"));
        assert_eq!(audit.div_count, 1);
    }

    #[test]
    fn test_scan_missing_dir() {
        let dir = TempDir::new().unwrap();
        let result = scan_mirror(&dir.path().join("nope"));
        assert!(matches!(result, Err(AuditError::NotADirectory(_))));
    }

    #[test]
    fn test_binary_file_is_tolerated() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("_img"), [0x89u8, b'P', b'N', b'G', 0, 0xff]).unwrap();

        let audit = scan_mirror(dir.path()).unwrap();
        assert_eq!(audit.files_scanned, 1);
        assert_eq!(audit.div_count, 0);
    }
}
