//! Crawler coordinator - main crawl orchestration logic
//!
//! The traversal is an explicit work-list of tasks rather than call-stack
//! recursion:
//! - `Visit` probes a node, obtains its content and extracts its links
//! - `Link` decides whether one discovered link is downloaded, writes it into
//!   the mirror and schedules a `Visit` one hop deeper
//!
//! Tasks run on a `JoinSet` bounded by the configured concurrency. Pending
//! tasks live on a LIFO stack, so with a concurrency of one the order is the
//! plain depth-first order: a page's first link is fully explored before the
//! second one is looked at.

use crate::config::Config;
use crate::crawler::claims::PathClaims;
use crate::crawler::fetcher::{FetchResult, HttpFetcher, ProbeResult};
use crate::crawler::parser::parse_page;
use crate::mirror::{write_entry, FsMirror, MirrorStore, WriteOutcome};
use crate::state::{CrawlReport, NodeOutcome, TraversalState};
use crate::url::{classify_link, extract_host, parse_seed, LinkScope, PathMapper};
use crate::MirrorError;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use url::Url;

/// A unit of work on the crawl work-list
#[derive(Debug)]
enum Task {
    /// Probe a node and discover its links
    Visit {
        state: TraversalState,
        /// Content already downloaded for this node, if any
        body: Option<Arc<[u8]>>,
        is_seed: bool,
    },

    /// Process one candidate link found on a page at `state.depth`
    Link {
        state: TraversalState,
        /// Content already in hand (the page's own URL), if any
        body: Option<Arc<[u8]>>,
    },
}

/// What a finished task hands back to the driver
#[derive(Debug, Default)]
struct TaskOutput {
    outcome: Option<NodeOutcome>,
    visited: bool,
    links_discovered: u64,
    bytes_written: u64,
    seed_failure: Option<String>,
    follow_up: Vec<Task>,
}

impl TaskOutput {
    fn outcome(outcome: NodeOutcome) -> Self {
        Self {
            outcome: Some(outcome),
            ..Self::default()
        }
    }
}

/// Everything a task needs, shared between workers
struct Worker {
    fetcher: HttpFetcher,
    mapper: PathMapper,
    store: Arc<dyn MirrorStore>,
    claims: PathClaims,
}

/// Main crawler coordinator structure
pub struct Coordinator {
    worker: Arc<Worker>,
    max_concurrent: usize,
    max_duration: Option<Duration>,
    cancel: CancellationToken,
}

impl Coordinator {
    /// Creates a new coordinator writing into the filesystem mirror
    ///
    /// # Arguments
    ///
    /// * `config` - The crawler configuration
    /// * `cancel` - Token that stops the crawl when cancelled
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(MirrorError)` - The HTTP client could not be built
    pub fn new(config: &Config, cancel: CancellationToken) -> Result<Self, MirrorError> {
        Self::with_store(config, Arc::new(FsMirror::new()), cancel)
    }

    /// Creates a coordinator writing into a caller-provided store
    pub fn with_store(
        config: &Config,
        store: Arc<dyn MirrorStore>,
        cancel: CancellationToken,
    ) -> Result<Self, MirrorError> {
        let fetcher = HttpFetcher::from_config(&config.crawler, &config.user_agent)?;
        let mapper = PathMapper::new(&config.output.mirror_root)
            .with_extension(config.output.file_extension.clone());

        Ok(Self {
            worker: Arc::new(Worker {
                fetcher,
                mapper,
                store,
                claims: PathClaims::new(),
            }),
            max_concurrent: config.crawler.max_concurrent_requests.max(1) as usize,
            max_duration: config
                .crawler
                .max_crawl_duration_secs
                .map(Duration::from_secs),
            cancel,
        })
    }

    /// Runs a crawl from `seed` with the given depth budget
    ///
    /// Branch failures never abort the crawl; they are counted in the
    /// returned report. A failed probe or fetch on the seed itself ends the
    /// crawl immediately with `seed_failure` set.
    pub async fn run(&self, seed: &Url, max_depth: u32) -> Result<CrawlReport, MirrorError> {
        let seed_host = extract_host(seed).ok_or_else(|| MirrorError::InvalidSeed {
            url: seed.to_string(),
            reason: "missing host".to_string(),
        })?;

        tracing::info!(
            "Starting crawl of {} (host {}, depth {})",
            seed,
            seed_host,
            max_depth
        );

        let mut report = CrawlReport::new(seed.as_str(), &seed_host, max_depth);
        let deadline = self.spawn_deadline();

        let mut pending = vec![Task::Visit {
            state: TraversalState::seed(seed.clone(), max_depth, seed_host.as_str()),
            body: None,
            is_seed: true,
        }];
        let mut in_flight = JoinSet::new();

        loop {
            while in_flight.len() < self.max_concurrent && !self.cancel.is_cancelled() {
                let Some(task) = pending.pop() else { break };
                let worker = Arc::clone(&self.worker);
                in_flight.spawn(async move { worker.run_task(task).await });
            }

            if in_flight.is_empty() {
                if self.cancel.is_cancelled() && !pending.is_empty() {
                    tracing::warn!("Crawl cancelled before {} tasks started", pending.len());
                    for _ in 0..pending.len() {
                        report.record(NodeOutcome::Cancelled);
                    }
                    report.cancelled = true;
                }
                break;
            }

            tokio::select! {
                biased;

                _ = self.cancel.cancelled() => {
                    tracing::warn!(
                        "Crawl cancelled, abandoning {} running and {} pending tasks",
                        in_flight.len(),
                        pending.len()
                    );
                    in_flight.abort_all();
                    let drained = drain_cancelled(&mut report, &mut in_flight).await;
                    let abandoned = pending.len() as u64 + drained;
                    for _ in 0..abandoned {
                        report.record(NodeOutcome::Cancelled);
                    }
                    report.cancelled = true;
                    break;
                }

                joined = in_flight.join_next() => match joined {
                    Some(Ok(output)) => {
                        let follow_up = apply_output(&mut report, output);
                        // Reversed so the first discovered link is popped first
                        pending.extend(follow_up.into_iter().rev());
                    }
                    Some(Err(e)) => {
                        tracing::error!("Crawl task failed: {}", e);
                        report.record(NodeOutcome::FetchFailed);
                    }
                    None => {}
                },
            }
        }

        if let Some(handle) = deadline {
            handle.abort();
        }
        report.finish();

        tracing::info!(
            "Crawl completed: {} pages visited, {} files written, {} skipped, {} failed",
            report.pages_visited,
            report.files_written(),
            report.skipped_count(),
            report.error_count()
        );

        Ok(report)
    }

    /// Cancels the crawl once the optional deadline passes
    fn spawn_deadline(&self) -> Option<tokio::task::JoinHandle<()>> {
        let limit = self.max_duration?;
        let cancel = self.cancel.clone();
        Some(tokio::spawn(async move {
            tokio::time::sleep(limit).await;
            tracing::warn!("Crawl deadline of {:?} reached", limit);
            cancel.cancel();
        }))
    }
}

/// Collects the aborted set after a cancel
///
/// Tasks that finished before the abort took effect still have their results
/// recorded; their follow-up tasks never run. Returns the number of tasks
/// (aborted or never started) to count as cancelled.
async fn drain_cancelled(report: &mut CrawlReport, in_flight: &mut JoinSet<TaskOutput>) -> u64 {
    let mut abandoned = 0;
    while let Some(joined) = in_flight.join_next().await {
        match joined {
            Ok(output) => abandoned += apply_output(report, output).len() as u64,
            Err(e) if e.is_cancelled() => abandoned += 1,
            Err(e) => {
                tracing::error!("Crawl task failed: {}", e);
                report.record(NodeOutcome::FetchFailed);
            }
        }
    }
    abandoned
}

/// Folds a task result into the report and returns its follow-up tasks
fn apply_output(report: &mut CrawlReport, output: TaskOutput) -> Vec<Task> {
    if let Some(outcome) = output.outcome {
        report.record(outcome);
    }
    if output.visited {
        report.pages_visited += 1;
    }
    report.links_discovered += output.links_discovered;
    report.bytes_written += output.bytes_written;
    if output.seed_failure.is_some() {
        report.seed_failure = output.seed_failure;
    }
    output.follow_up
}

impl Worker {
    async fn run_task(&self, task: Task) -> TaskOutput {
        match task {
            Task::Visit {
                state,
                body,
                is_seed,
            } => self.visit(state, body, is_seed).await,
            Task::Link { state, body } => self.process_link(state, body).await,
        }
    }

    /// Terminal check, liveness probe, and link discovery for one node
    async fn visit(
        &self,
        state: TraversalState,
        body: Option<Arc<[u8]>>,
        is_seed: bool,
    ) -> TaskOutput {
        if state.is_exhausted() {
            tracing::debug!("Depth budget exhausted at {}", state.url);
            return TaskOutput::outcome(NodeOutcome::DepthExhausted);
        }

        tracing::debug!("Visiting {} (remaining depth {})", state.url, state.depth);

        match self.fetcher.probe(&state.url).await {
            ProbeResult::Alive => {}
            ProbeResult::Dead { status_code } => {
                tracing::info!(
                    "Skipping {} due to non-200 response ({})",
                    state.url,
                    status_code
                );
                return seed_aware(
                    NodeOutcome::ProbeDead,
                    is_seed,
                    format!("Status {}", status_code),
                );
            }
            ProbeResult::Error { error } => {
                tracing::error!("Error checking response for {}: {}", state.url, error);
                return seed_aware(NodeOutcome::ProbeFailed, is_seed, error);
            }
        }

        // Only the seed arrives without a body; it is fetched even when already
        // mirrored, so a repeat run can still discover its links
        let body = match body {
            Some(body) => body,
            None => match self.fetcher.fetch(&state.url).await {
                FetchResult::Success { body, .. } => Arc::from(body),
                failed => {
                    let reason = failed.failure_reason().unwrap_or_default();
                    tracing::error!("Error fetching links from {}: {}", state.url, reason);
                    return seed_aware(NodeOutcome::FetchFailed, is_seed, reason);
                }
            },
        };

        let parsed = parse_page(&body, &state.url);
        let links_discovered = parsed.links.len() as u64;
        if let Some(title) = &parsed.title {
            tracing::debug!("Page {} is titled {:?}", state.url, title);
        }

        // The page itself is a candidate alongside its links
        let mut follow_up: Vec<Task> = parsed
            .links
            .into_iter()
            .map(|link| Task::Link {
                state: TraversalState {
                    url: link,
                    depth: state.depth,
                    seed_host: Arc::clone(&state.seed_host),
                },
                body: None,
            })
            .collect();
        follow_up.push(Task::Link {
            state,
            body: Some(body),
        });

        tracing::debug!("Discovered {} links", links_discovered);

        TaskOutput {
            visited: true,
            links_discovered,
            follow_up,
            ..TaskOutput::default()
        }
    }

    /// Host scoping, path claim, download, and scheduling for one link
    async fn process_link(&self, state: TraversalState, body: Option<Arc<[u8]>>) -> TaskOutput {
        match classify_link(&state.url, &state.seed_host) {
            LinkScope::Crawlable => {}
            LinkScope::CrossHost => {
                tracing::debug!("Skipping cross-host link {}", state.url);
                return TaskOutput::outcome(NodeOutcome::CrossHost);
            }
            LinkScope::UnsupportedScheme => {
                tracing::debug!("Skipping non-http link {}", state.url);
                return TaskOutput::outcome(NodeOutcome::UnsupportedScheme);
            }
        }

        let path = match self.mapper.map(&state.url) {
            Ok(path) => path,
            Err(e) => {
                tracing::warn!("Rejecting mirror path for {}: {}", state.url, e);
                return TaskOutput::outcome(NodeOutcome::RejectedPath);
            }
        };

        if !self.claims.claim(&path) {
            tracing::debug!("Already claimed in this run: {}", path.display());
            return TaskOutput::outcome(NodeOutcome::AlreadyClaimed);
        }

        if self.store.exists(&path) {
            tracing::info!("File already exists: {}", path.display());
            return TaskOutput::outcome(NodeOutcome::AlreadyMaterialized);
        }

        let bytes = match body {
            Some(bytes) => bytes,
            None => match self.fetcher.fetch(&state.url).await {
                FetchResult::Success {
                    final_url,
                    content_type,
                    body,
                } => {
                    if final_url != state.url {
                        tracing::debug!("{} was redirected to {}", state.url, final_url);
                    }
                    tracing::debug!(
                        "Fetched {} ({} bytes, {})",
                        state.url,
                        body.len(),
                        content_type.as_deref().unwrap_or("no content type")
                    );
                    Arc::from(body)
                }
                failed => {
                    tracing::error!(
                        "Error downloading {}: {}",
                        state.url,
                        failed.failure_reason().unwrap_or_default()
                    );
                    return TaskOutput::outcome(NodeOutcome::FetchFailed);
                }
            },
        };

        match write_entry(Arc::clone(&self.store), &path, Arc::clone(&bytes)).await {
            Ok(WriteOutcome::Created(written)) => {
                tracing::info!("Downloaded: {}", path.display());
                let next = state.child(state.url.clone());
                TaskOutput {
                    outcome: Some(NodeOutcome::Written),
                    bytes_written: written,
                    follow_up: vec![Task::Visit {
                        state: next,
                        body: Some(bytes),
                        is_seed: false,
                    }],
                    ..TaskOutput::default()
                }
            }
            Ok(WriteOutcome::AlreadyExists) => {
                tracing::info!("File already exists: {}", path.display());
                TaskOutput::outcome(NodeOutcome::AlreadyMaterialized)
            }
            Err(e) => {
                tracing::error!("Error saving {}: {}", state.url, e);
                TaskOutput::outcome(NodeOutcome::WriteFailed)
            }
        }
    }
}

/// Failure output, flagging the whole crawl when it happened on the seed
fn seed_aware(outcome: NodeOutcome, is_seed: bool, reason: String) -> TaskOutput {
    TaskOutput {
        outcome: Some(outcome),
        seed_failure: is_seed.then_some(reason),
        ..TaskOutput::default()
    }
}

/// Runs a complete crawl for a seed URL string
///
/// # Example
///
/// ```no_run
/// use site_mirror::config::Config;
/// use site_mirror::crawler::run_crawl;
/// use tokio_util::sync::CancellationToken;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let report = run_crawl(&Config::default(), "http://example.test/", CancellationToken::new()).await?;
/// println!("{} files written", report.files_written());
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(
    config: &Config,
    seed: &str,
    cancel: CancellationToken,
) -> Result<CrawlReport, MirrorError> {
    let seed_url = parse_seed(seed).map_err(|e| MirrorError::InvalidSeed {
        url: seed.to_string(),
        reason: e.to_string(),
    })?;

    let coordinator = Coordinator::new(config, cancel)?;
    coordinator.run(&seed_url, config.crawler.max_depth).await
}
