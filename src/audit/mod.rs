//! Markup audit over a completed mirror
//!
//! This module walks the files written by the crawl, records which tags the
//! site uses, and compares the result against a checklist of expected tags.
//! All counters live in a [`TagAudit`] value, so audits are re-entrant.

mod checklist;
mod scanner;

pub use checklist::{AuditReport, Checklist, POINTS_PER_MISSING_TAG};
pub use scanner::{scan_mirror, TagAudit};

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Tags every audited site is expected to use unless configured otherwise
pub const DEFAULT_REQUIRED_TAGS: &[&str] = &[
    "html", "head", "title", "meta", "link", "script", "style", "body", "main", "h1", "h2", "h3",
    "p", "section", "header", "footer", "aside", "nav", "div", "span", "br", "b", "i", "strong",
    "em", "code", "pre", "hr", "a", "img", "picture", "iframe", "audio", "video", "source",
    "canvas", "svg", "ul", "ol", "optgroup", "li", "form", "label", "fieldset", "legend", "input",
    "textarea", "datalist", "select", "option", "details", "summary", "button", "template",
    "table", "tr", "td", "th", "caption", "col", "colgroup", "figure", "figcaption",
];

/// Errors that can occur during the audit pass
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("Mirror directory {0} does not exist or is not a directory")]
    NotADirectory(PathBuf),

    #[error("Failed to read directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Scans `dir` and compares it against `checklist`
pub fn audit_mirror(dir: &Path, checklist: &Checklist) -> Result<AuditReport, AuditError> {
    let audit = scan_mirror(dir)?;
    Ok(checklist.compare(&audit))
}
