//! Console rendering of crawl and audit results

use crate::audit::AuditReport;
use crate::output::traits::{OutputHandler, OutputResult, RunSummary};
use crate::state::{CrawlReport, NodeOutcome};

/// Prints the run summary to stdout
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleOutput;

impl OutputHandler for ConsoleOutput {
    fn name(&self) -> &str {
        "console"
    }

    fn emit(&self, summary: &RunSummary) -> OutputResult<()> {
        print_crawl_report(&summary.crawl);
        if let Some(audit) = &summary.audit {
            println!();
            print_audit_report(audit);
        }
        Ok(())
    }
}

/// Prints crawl statistics to stdout in a formatted manner
pub fn print_crawl_report(report: &CrawlReport) {
    println!("=== Crawl Statistics ===\n");

    println!("Overview:");
    println!("  Seed: {}", report.seed);
    println!("  Host: {}", report.seed_host);
    println!("  Depth budget: {}", report.max_depth);
    println!("  Pages visited: {}", report.pages_visited);
    println!("  Links discovered: {}", report.links_discovered);
    println!("  Files written: {}", report.files_written());
    println!("  Bytes written: {}", report.bytes_written);
    if let Some(secs) = report.duration_seconds() {
        println!("  Duration: {:.2}s", secs);
    }
    println!();

    let total: u64 = report.outcomes.values().sum();
    if total > 0 {
        println!("Outcomes:");
        // Sort by count (descending)
        let mut counts: Vec<_> = report.outcomes.iter().collect();
        counts.sort_by(|a, b| b.1.cmp(a.1));

        for (outcome, count) in counts {
            let percentage = (*count as f64 / total as f64) * 100.0;
            println!("  {}: {} ({:.1}%)", outcome, count, percentage);
        }
        println!();
    }

    if let Some(reason) = &report.seed_failure {
        println!("Seed failed: {}", reason);
    }
    if report.cancelled {
        println!(
            "Crawl was cancelled; {} tasks never ran",
            report.count(NodeOutcome::Cancelled)
        );
    }
    if report.error_count() > 0 {
        println!("Abandoned branches: {}", report.error_count());
    }
}

/// Prints the tag audit to stdout
pub fn print_audit_report(report: &AuditReport) {
    println!("=== Tag Audit ===\n");
    println!("Files scanned: {}", report.files_scanned);
    if report.files_unreadable > 0 {
        println!("Files that could not be read: {}", report.files_unreadable);
    }
    println!(
        "Used {} of {} required tags",
        report.total_present(),
        report.total_needed
    );

    if !report.missing.is_empty() {
        println!("Missing tags ({}):", report.total_missing());
        for tag in &report.missing {
            println!("  - {}", tag);
        }
        println!("Deduct {} points", report.penalty_points());
    }
    println!();

    println!("Number of divs: {}", report.div_count);
    println!("Inline style attributes: {}", report.inline_styles);
    if report.math_ml_used {
        println!("MathML is used");
    } else {
        println!("MathML is not used");
    }
    if report.social_meta_tags {
        println!("Social media meta tags are present");
    } else {
        println!("No social media meta tags found");
    }
}
