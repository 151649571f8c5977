//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP probing and fetching with bounded retry
//! - HTML parsing and link extraction
//! - In-run claiming of mirror paths
//! - Overall crawl coordination on a bounded worker pool

mod claims;
mod coordinator;
mod fetcher;
mod parser;

pub use claims::PathClaims;
pub use coordinator::{run_crawl, Coordinator};
pub use fetcher::{backoff_delay, build_http_client, FetchResult, HttpFetcher, ProbeResult};
pub use parser::{parse_page, ParsedPage};
