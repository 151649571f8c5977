//! Markdown report generation
//!
//! This module writes a human-readable markdown report of one run,
//! including crawl statistics and, when available, the tag audit.

use crate::output::traits::{OutputError, OutputHandler, OutputResult, RunSummary};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Writes the run summary as a markdown file
#[derive(Debug, Clone)]
pub struct MarkdownOutput {
    path: PathBuf,
}

impl MarkdownOutput {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl OutputHandler for MarkdownOutput {
    fn name(&self) -> &str {
        "markdown"
    }

    fn emit(&self, summary: &RunSummary) -> OutputResult<()> {
        generate_markdown_report(summary, &self.path)?;
        tracing::info!("Report written to {}", self.path.display());
        Ok(())
    }
}

/// Writes a markdown report of `summary` to `output_path`
///
/// Parent directories are created as needed; an existing file is replaced.
pub fn generate_markdown_report(summary: &RunSummary, output_path: &Path) -> OutputResult<()> {
    let markdown = format_markdown_report(summary);

    let write = || -> std::io::Result<()> {
        if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = File::create(output_path)?;
        file.write_all(markdown.as_bytes())
    };

    write().map_err(|source| OutputError::Write {
        path: output_path.display().to_string(),
        source,
    })
}

/// Formats a run summary as markdown
pub fn format_markdown_report(summary: &RunSummary) -> String {
    let crawl = &summary.crawl;
    let mut md = String::new();

    md.push_str("# Site Mirror Report\n\n");

    // Run metadata
    md.push_str("## Run Information\n\n");
    md.push_str(&format!("- **Seed**: {}\n", crawl.seed));
    md.push_str(&format!("- **Host**: {}\n", crawl.seed_host));
    md.push_str(&format!("- **Depth Budget**: {}\n", crawl.max_depth));
    md.push_str(&format!("- **Started**: {}\n", crawl.started_at.to_rfc3339()));
    if let Some(finished) = crawl.finished_at {
        md.push_str(&format!("- **Finished**: {}\n", finished.to_rfc3339()));
    }
    if let Some(secs) = crawl.duration_seconds() {
        md.push_str(&format!("- **Duration**: {:.2} seconds\n", secs));
    }
    md.push_str(&format!("- **Status**: {}\n", summary.status()));
    if let Some(hash) = &summary.config_hash {
        md.push_str(&format!("- **Config Hash**: {}\n", hash));
    }
    md.push('\n');

    // Overall statistics
    md.push_str("## Overall Statistics\n\n");
    md.push_str(&format!("- **Pages Visited**: {}\n", crawl.pages_visited));
    md.push_str(&format!(
        "- **Links Discovered**: {}\n",
        crawl.links_discovered
    ));
    md.push_str(&format!("- **Files Written**: {}\n", crawl.files_written()));
    md.push_str(&format!("- **Bytes Written**: {}\n", crawl.bytes_written));
    md.push_str(&format!("- **Skipped**: {}\n", crawl.skipped_count()));
    md.push_str(&format!("- **Errors**: {}\n", crawl.error_count()));
    md.push_str(&format!(
        "- **Success Rate**: {:.2}%\n",
        summary.success_rate()
    ));
    md.push_str(&format!("- **Error Rate**: {:.2}%\n", summary.error_rate()));
    if let Some(reason) = &crawl.seed_failure {
        md.push_str(&format!("- **Seed Failure**: {}\n", reason));
    }
    md.push('\n');

    // Outcome breakdown
    if !crawl.outcomes.is_empty() {
        md.push_str("## Outcome Breakdown\n\n");
        md.push_str("| Outcome | Count |\n");
        md.push_str("|---------|-------|\n");
        for (outcome, count) in &crawl.outcomes {
            md.push_str(&format!("| {} | {} |\n", outcome, count));
        }
        md.push('\n');
    }

    if let Some(audit) = &summary.audit {
        md.push_str("## Tag Audit\n\n");
        md.push_str(&format!("- **Files Scanned**: {}\n", audit.files_scanned));
        md.push_str(&format!(
            "- **Unreadable Files**: {}\n",
            audit.files_unreadable
        ));
        md.push_str(&format!(
            "- **Required Tags Used**: {} / {}\n",
            audit.total_present(),
            audit.total_needed
        ));
        md.push_str(&format!("- **Penalty**: {} points\n", audit.penalty_points()));
        md.push_str(&format!("- **Div Count**: {}\n", audit.div_count));
        md.push_str(&format!("- **Inline Styles**: {}\n", audit.inline_styles));
        md.push_str(&format!(
            "- **MathML Used**: {}\n",
            if audit.math_ml_used { "yes" } else { "no" }
        ));
        md.push_str(&format!(
            "- **Social Meta Tags**: {}\n\n",
            if audit.social_meta_tags { "yes" } else { "no" }
        ));

        if !audit.missing.is_empty() {
            md.push_str("### Missing Tags\n\n");
            for tag in &audit.missing {
                md.push_str(&format!("- `{}`\n", tag));
            }
            md.push('\n');
        }
    }

    md
}
