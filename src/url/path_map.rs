//! URL to mirror path mapping
//!
//! Every fetched resource lands at `<root>/<hostname>/<sanitized-path>`. The
//! mapping is a pure function of the hostname and the URL path, which is what
//! lets an existing file stand in for "already downloaded" across runs.

use crate::url::extract_host;
use crate::UrlError;
use std::path::{Component, Path, PathBuf};
use url::Url;

/// Character substituted for anything that is not an ASCII letter or digit
pub const SEPARATOR: char = '_';

/// Replaces every non-alphanumeric ASCII character of a URL path with `_`
///
/// # Examples
///
/// ```
/// use site_mirror::url::sanitize_path;
///
/// assert_eq!(sanitize_path("/"), "_");
/// assert_eq!(sanitize_path("/a"), "_a");
/// assert_eq!(sanitize_path("/docs/intro.html"), "_docs_intro_html");
/// ```
pub fn sanitize_path(path: &str) -> String {
    path.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { SEPARATOR })
        .collect()
}

/// Maps absolute URLs to files beneath a mirror root
#[derive(Debug, Clone)]
pub struct PathMapper {
    root: PathBuf,
    extension: Option<String>,
}

impl PathMapper {
    /// Creates a mapper rooted at `root` with no file extension
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extension: None,
        }
    }

    /// Appends `extension` (e.g. `.html`) to every mapped file name
    pub fn with_extension(mut self, extension: Option<String>) -> Self {
        self.extension = extension.filter(|e| !e.is_empty());
        self
    }

    /// The mirror root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The directory holding every file mirrored for `host`
    pub fn host_dir(&self, host: &str) -> Result<PathBuf, UrlError> {
        validate_host_component(host)?;
        Ok(self.root.join(host))
    }

    /// Derives the mirror path for an absolute URL
    ///
    /// Query strings and fragments are ignored, so two URLs that differ only
    /// there map to the same file. The derived path is checked to stay beneath
    /// the root before it is returned.
    pub fn map(&self, url: &Url) -> Result<PathBuf, UrlError> {
        let host = extract_host(url).ok_or(UrlError::MissingHost)?;
        validate_host_component(&host)?;

        let mut file_name = sanitize_path(url.path());
        if let Some(ext) = &self.extension {
            file_name.push_str(ext);
        }

        let relative = Path::new(&host).join(file_name);
        if !relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
        {
            return Err(UrlError::PathEscapesRoot(relative.display().to_string()));
        }

        Ok(self.root.join(relative))
    }
}

fn validate_host_component(host: &str) -> Result<(), UrlError> {
    let mut components = Path::new(host).components();
    let single_normal = matches!(components.next(), Some(Component::Normal(_)))
        && components.next().is_none();

    if host.is_empty() || host.contains(['/', '\\']) || !single_normal {
        return Err(UrlError::InvalidHostDirectory(host.to_string()));
    }

    Ok(())
}
