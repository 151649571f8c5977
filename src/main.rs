//! Site-Mirror main entry point
//!
//! This is the command-line interface for the Site-Mirror crawler and tag auditor.

use anyhow::Context;
use clap::Parser;
use site_mirror::audit::{audit_mirror, Checklist};
use site_mirror::config::{load_config_with_hash, validate, Config};
use site_mirror::crawler::run_crawl;
use site_mirror::mirror::check_mirror_dir;
use site_mirror::output::{emit_all, handlers_for, RunSummary};
use site_mirror::url::PathMapper;
use site_mirror::MirrorError;
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

const EXIT_FATAL: u8 = 1;
const EXIT_PARTIAL: u8 = 2;

/// Site-Mirror: a bounded single-host website mirror
///
/// Site-Mirror downloads every same-host resource reachable from a seed URL
/// within a fixed number of link hops, stores it under a per-host directory,
/// and then audits the mirrored markup against a checklist of HTML tags.
#[derive(Parser, Debug)]
#[command(name = "site-mirror")]
#[command(version)]
#[command(about = "A bounded single-host website mirror and tag auditor", long_about = None)]
struct Cli {
    /// Absolute http(s) URL to start crawling from
    #[arg(value_name = "SEED_URL")]
    seed: String,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Depth budget (overrides the config file)
    #[arg(short, long, value_name = "N")]
    depth: Option<u32>,

    /// Mirror root directory (overrides the config file)
    #[arg(short, long, value_name = "DIR")]
    output: Option<String>,

    /// Skip the tag audit after crawling
    #[arg(long)]
    no_audit: bool,

    /// Write a markdown report to this path
    #[arg(long, value_name = "PATH")]
    report: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::from(EXIT_FATAL)
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("site_mirror=info,warn"),
            1 => EnvFilter::new("site_mirror=debug,info"),
            2 => EnvFilter::new("site_mirror=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the configuration file if given and applies command-line overrides
fn load_settings(cli: &Cli) -> anyhow::Result<(Config, Option<String>)> {
    let (mut config, hash) = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (cfg, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (cfg, Some(hash))
        }
        None => (Config::default(), None),
    };

    if let Some(depth) = cli.depth {
        config.crawler.max_depth = depth;
    }
    if let Some(output) = &cli.output {
        config.output.mirror_root = output.clone();
    }
    if cli.no_audit {
        config.audit.enabled = false;
    }
    if let Some(report) = &cli.report {
        config.output.report_path = Some(report.clone());
    }

    validate(&config)
        .map_err(MirrorError::from)
        .context("Invalid settings")?;
    Ok((config, hash))
}

/// Stops the crawl on Ctrl-C
///
/// The returned handle must be aborted once the crawl is over so that a later
/// Ctrl-C terminates the process again.
fn install_ctrl_c(cancel: CancellationToken) -> JoinHandle<()> {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, stopping crawl");
            cancel.cancel();
        }
    })
}

/// Handles the crawl, the audit, and the reports; returns the process exit code
async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let (config, config_hash) = load_settings(&cli)?;

    let cancel = CancellationToken::new();
    let interrupt = install_ctrl_c(cancel.clone());

    let crawled = run_crawl(&config, &cli.seed, cancel).await;
    interrupt.abort();
    let report = crawled?;
    let mut fatal = false;

    if let Some(reason) = &report.seed_failure {
        let err = MirrorError::SeedUnreachable {
            url: report.seed.clone(),
            reason: reason.clone(),
        };
        tracing::error!("{}", err);
        fatal = true;
    }

    let host_dir = PathMapper::new(&config.output.mirror_root)
        .host_dir(&report.seed_host)
        .map_err(MirrorError::from)?;
    let audit = if !check_mirror_dir(&host_dir) {
        fatal = true;
        None
    } else if config.audit.enabled {
        let checklist = Checklist::new(config.audit.required_tags.iter().cloned());
        Some(audit_mirror(&host_dir, &checklist).map_err(MirrorError::from)?)
    } else {
        tracing::info!("Tag audit disabled");
        None
    };

    let clean = report.is_clean();
    let summary = RunSummary::new(report)
        .with_audit(audit)
        .with_config_hash(config_hash);
    let emitted = emit_all(
        &handlers_for(config.output.report_path.as_deref()),
        &summary,
    );

    let code = if fatal {
        EXIT_FATAL
    } else if !clean || emitted.is_err() {
        EXIT_PARTIAL
    } else {
        0
    };
    Ok(ExitCode::from(code))
}
