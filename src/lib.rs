//! Site-Mirror: a bounded single-host website mirror and markup auditor
//!
//! This crate crawls one website from a seed URL up to a fixed depth, saves
//! every same-host resource into a local mirror tree, and then audits the
//! mirrored HTML against a checklist of expected tag names.

pub mod audit;
pub mod config;
pub mod crawler;
pub mod mirror;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Site-Mirror operations
#[derive(Debug, Error)]
pub enum MirrorError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid seed URL '{url}': {reason}")]
    InvalidSeed { url: String, reason: String },

    #[error("Seed URL {url} is unreachable: {reason}")]
    SeedUnreachable { url: String, reason: String },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("Audit error: {0}")]
    Audit(#[from] audit::AuditError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,

    #[error("Host '{0}' cannot be used as a mirror directory")]
    InvalidHostDirectory(String),

    #[error("Derived path {0} escapes the mirror root")]
    PathEscapesRoot(String),
}

// Re-export commonly used types
pub use config::Config;
pub use state::{CrawlReport, NodeOutcome, TraversalState};
pub use url::{extract_host, resolve_link, sanitize_path};
