//! Output module for rendering run results
//!
//! This module handles:
//! - Printing crawl statistics and the tag audit to the console
//! - Writing an optional markdown report file

mod markdown;
pub mod stats;
mod traits;

pub use markdown::{format_markdown_report, generate_markdown_report, MarkdownOutput};
pub use stats::{print_audit_report, print_crawl_report, ConsoleOutput};
pub use traits::{OutputError, OutputHandler, OutputResult, RunSummary};

/// Builds the handlers for one run: always the console, plus markdown if a path is set
pub fn handlers_for(report_path: Option<&str>) -> Vec<Box<dyn OutputHandler>> {
    let mut handlers: Vec<Box<dyn OutputHandler>> = vec![Box::new(ConsoleOutput)];
    if let Some(path) = report_path {
        handlers.push(Box::new(MarkdownOutput::new(path)));
    }
    handlers
}

/// Emits `summary` through every handler
///
/// A failing handler is logged and does not stop the others; the first error
/// is returned once all handlers have run.
pub fn emit_all(handlers: &[Box<dyn OutputHandler>], summary: &RunSummary) -> OutputResult<()> {
    let mut first_error = None;
    for handler in handlers {
        if let Err(e) = handler.emit(summary) {
            tracing::error!("Output handler '{}' failed: {}", handler.name(), e);
            if first_error.is_none() {
                first_error = Some(e);
            }
        }
    }
    match first_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::CrawlReport;
    use tempfile::TempDir;

    #[test]
    fn test_handlers_for() {
        assert_eq!(handlers_for(None).len(), 1);

        let handlers = handlers_for(Some("report.md"));
        let names: Vec<_> = handlers.iter().map(|h| h.name().to_string()).collect();
        assert_eq!(names, vec!["console", "markdown"]);
    }

    #[test]
    fn test_emit_all_reports_failure() {
        let dir = TempDir::new().unwrap();
        // A directory cannot be replaced by the report file
        let blocked = dir.path().to_str().unwrap().to_string();
        let summary = RunSummary::new(CrawlReport::new("http://example.test/", "example.test", 1));

        let result = emit_all(&handlers_for(Some(blocked.as_str())), &summary);
        assert!(matches!(result, Err(OutputError::Write { .. })));
    }
}
