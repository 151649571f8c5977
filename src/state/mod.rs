//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `TraversalState`: the (url, remaining depth, seed hostname) tuple handed to each step
//! - `NodeOutcome`: how a single link or node ended (written, skipped, failed)
//! - `CrawlReport`: per-run accumulator of outcomes returned by the driver

mod outcome;
mod report;
mod traversal;

// Re-export main types
pub use outcome::NodeOutcome;
pub use report::CrawlReport;
pub use traversal::TraversalState;
