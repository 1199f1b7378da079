//! Site-Harvest main entry point
//!
//! This is the command-line interface for the Site-Harvest page metadata harvester.

use anyhow::Context;
use clap::Parser;
use site_harvest::config::{load_config, validate, Config};
use site_harvest::crawler::{spawn_crawl, Coordinator, CrawlOutcome, CrawlReport};
use site_harvest::output::FileResultSink;
use site_harvest::progress::TracingSink;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Site-Harvest: a single-seed page metadata harvester
///
/// Site-Harvest fetches one seed page, saves the images it shows, visits every page it
/// links to and exports each page's title and social meta tags as CSV and JSON.
#[derive(Parser, Debug)]
#[command(name = "site-harvest")]
#[command(version)]
#[command(about = "A single-seed page metadata harvester", long_about = None)]
struct Cli {
    /// Seed page whose links are harvested
    #[arg(value_name = "URL")]
    url: String,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Number of linked pages fetched at the same time
    #[arg(long, value_name = "N")]
    workers: Option<usize>,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Directory under which the per-site folder is created
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = build_config(&cli)?;
    tracing::info!(
        "Using {} workers, {}s request timeout, output under {}",
        config.crawler.max_workers,
        config.crawler.request_timeout_secs,
        config.output.root_dir
    );

    let results = Arc::new(FileResultSink::new(&config.output));
    let coordinator = Coordinator::new(config, Arc::new(TracingSink), results)?;
    let handle = spawn_crawl(coordinator, cli.url.as_str());
    let stop = handle.stop_handle();

    let wait = handle.wait();
    tokio::pin!(wait);

    let outcome = tokio::select! {
        outcome = &mut wait => outcome,
        _ = tokio::signal::ctrl_c() => {
            tracing::warn!("Interrupt received, finishing pages already in progress");
            stop.request_stop();
            wait.await
        }
    };

    match outcome.context("crawl did not complete")? {
        CrawlOutcome::Completed(report) => {
            print_summary(&report);
            Ok(ExitCode::SUCCESS)
        }
        CrawlOutcome::Failed {
            site,
            seed_url,
            error,
        } => {
            eprintln!("✗ Could not fetch {} ({}): {}", seed_url, site, error);
            Ok(ExitCode::FAILURE)
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
            0 => EnvFilter::new("site_harvest=info,warn"),
            1 => EnvFilter::new("site_harvest=debug,info"),
            2 => EnvFilter::new("site_harvest=trace,debug"),
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

/// Loads the config file (or the defaults) and applies command-line overrides
fn build_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("failed to load configuration from {}", path.display()))?
        }
        None => Config::default(),
    };

    if let Some(workers) = cli.workers {
        config.crawler.max_workers = workers;
    }
    if let Some(timeout) = cli.timeout {
        config.crawler.request_timeout_secs = timeout;
    }
    if let Some(output) = &cli.output {
        config.output.root_dir = output.to_string_lossy().into_owned();
    }

    validate(&config).context("invalid configuration")?;
    Ok(config)
}

fn print_summary(report: &CrawlReport) {
    println!("\n=== {} ===", report.site);
    println!("  Seed: {}", report.seed_url);
    println!(
        "  Links: {} found, {} scraped",
        report.links_discovered, report.links_dispatched
    );
    println!(
        "  Pages: {} recorded, {} failed",
        report.pages.len(),
        report.failed_pages()
    );
    println!(
        "  Images: {} downloaded, {} failed, {} skipped",
        report.images.downloaded, report.images.failed, report.images.skipped
    );
    if report.stopped_early {
        println!("  Stopped early: remaining links were not scraped");
    }
    println!("  Elapsed: {:.1}s", report.elapsed_secs());
}
