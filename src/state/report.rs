use crate::state::NodeOutcome;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Accumulated result of one crawl invocation
///
/// The driver owns the only instance and records into it as task results come
/// back, so no counter is ever shared between workers.
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// The seed URL as given
    pub seed: String,

    /// Hostname every fetch was scoped to
    pub seed_host: String,

    /// Initial depth budget
    pub max_depth: u32,

    /// Outcome counts for every processed link or node
    pub outcomes: BTreeMap<NodeOutcome, u64>,

    /// Nodes that passed the liveness probe and had their links extracted
    pub pages_visited: u64,

    /// Hyperlinks extracted across all visited pages
    pub links_discovered: u64,

    /// Total bytes persisted into the mirror
    pub bytes_written: u64,

    /// Set when the seed itself could not be probed or fetched
    pub seed_failure: Option<String>,

    /// Set when the crawl was stopped before the work-list drained
    pub cancelled: bool,

    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl CrawlReport {
    /// Creates an empty report for a crawl starting now
    pub fn new(seed: &str, seed_host: &str, max_depth: u32) -> Self {
        Self {
            seed: seed.to_string(),
            seed_host: seed_host.to_string(),
            max_depth,
            outcomes: BTreeMap::new(),
            pages_visited: 0,
            links_discovered: 0,
            bytes_written: 0,
            seed_failure: None,
            cancelled: false,
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    /// Records one outcome
    pub fn record(&mut self, outcome: NodeOutcome) {
        *self.outcomes.entry(outcome).or_insert(0) += 1;
    }

    /// Number of times an outcome was recorded
    pub fn count(&self, outcome: NodeOutcome) -> u64 {
        self.outcomes.get(&outcome).copied().unwrap_or(0)
    }

    /// Number of mirror files created by this run
    pub fn files_written(&self) -> u64 {
        self.sum_where(NodeOutcome::is_success)
    }

    /// Number of deliberate skip decisions
    pub fn skipped_count(&self) -> u64 {
        self.sum_where(NodeOutcome::is_skipped)
    }

    /// Number of abandoned branches
    pub fn error_count(&self) -> u64 {
        self.sum_where(NodeOutcome::is_error)
    }

    /// True when the crawl ran to completion without abandoning any branch
    pub fn is_clean(&self) -> bool {
        self.seed_failure.is_none() && !self.cancelled && self.error_count() == 0
    }

    /// Marks the report finished
    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Wall-clock duration, if finished
    pub fn duration_seconds(&self) -> Option<f64> {
        self.finished_at
            .map(|end| (end - self.started_at).num_milliseconds() as f64 / 1000.0)
    }

    fn sum_where(&self, pred: fn(&NodeOutcome) -> bool) -> u64 {
        self.outcomes
            .iter()
            .filter(|(outcome, _)| pred(outcome))
            .map(|(_, count)| *count)
            .sum()
    }
}
