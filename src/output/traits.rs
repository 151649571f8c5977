//! Output handler traits and types
//!
//! This module defines the trait interface for output handlers and the
//! run summary every handler renders.

use crate::audit::AuditReport;
use crate::state::CrawlReport;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write output to {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Everything known about one invocation once the crawl and audit are done
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub crawl: CrawlReport,

    /// Absent when the audit was disabled or the mirror directory is missing
    pub audit: Option<AuditReport>,

    /// SHA-256 of the configuration file, if one was loaded
    pub config_hash: Option<String>,
}

impl RunSummary {
    pub fn new(crawl: CrawlReport) -> Self {
        Self {
            crawl,
            audit: None,
            config_hash: None,
        }
    }

    pub fn with_audit(mut self, audit: Option<AuditReport>) -> Self {
        self.audit = audit;
        self
    }

    pub fn with_config_hash(mut self, hash: Option<String>) -> Self {
        self.config_hash = hash;
        self
    }

    /// Short status word for the run
    pub fn status(&self) -> &'static str {
        if self.crawl.seed_failure.is_some() {
            "failed"
        } else if self.crawl.cancelled {
            "cancelled"
        } else if self.crawl.error_count() > 0 {
            "partial"
        } else {
            "completed"
        }
    }

    /// Total number of classified links and nodes
    pub fn total_outcomes(&self) -> u64 {
        self.crawl.outcomes.values().sum()
    }

    /// Returns the share of fetch attempts that produced a file, as a percentage
    pub fn success_rate(&self) -> f64 {
        let attempts = self.crawl.files_written() + self.crawl.error_count();
        if attempts == 0 {
            return 0.0;
        }
        (self.crawl.files_written() as f64 / attempts as f64) * 100.0
    }

    /// Returns the share of classified outcomes that were errors, as a percentage
    pub fn error_rate(&self) -> f64 {
        let total = self.total_outcomes();
        if total == 0 {
            return 0.0;
        }
        (self.crawl.error_count() as f64 / total as f64) * 100.0
    }
}

/// Trait for output handlers
///
/// Each handler renders a finished [`RunSummary`] to one destination.
pub trait OutputHandler {
    /// Short name used in log lines
    fn name(&self) -> &str;

    /// Renders the summary
    fn emit(&self, summary: &RunSummary) -> OutputResult<()>;
}
