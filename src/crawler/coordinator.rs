//! Crawler coordinator - main crawl orchestration logic
//!
//! This module drives one crawl through its lifecycle:
//! - Fetching the seed page
//! - Collecting its links and downloading its images
//! - Dispatching one fetch+extract task per link to a bounded worker pool
//! - Joining every dispatched task
//! - Handing the results to the result sink

use crate::config::{validate, Config};
use crate::crawler::fetcher::{build_http_client, fetch_page};
use crate::crawler::images::{DownloadedImages, ImageDownloadSummary, ImageDownloader};
use crate::crawler::links::collect_links;
use crate::crawler::metadata::extract_page_info;
use crate::crawler::page_info::PageInfo;
use crate::crawler::report::{CrawlOutcome, CrawlReport};
use crate::crawler::result_set::ResultSet;
use crate::output::{FileResultSink, OutputLayout, ResultSink};
use crate::progress::{ProgressEvent, ProgressSink};
use crate::state::{CrawlState, StopHandle};
use crate::url::SiteIdentity;
use crate::HarvestError;
use chrono::Utc;
use reqwest::Client;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::{JoinHandle, JoinSet};

/// Main crawler coordinator structure
///
/// A coordinator runs exactly one crawl; create a new one for the next seed.
pub struct Coordinator {
    config: Arc<Config>,
    client: Client,
    progress: Arc<dyn ProgressSink>,
    results: Arc<dyn ResultSink>,
    stop: StopHandle,
    state: CrawlState,
}

/// Links handed to the pool and whether a stop request cut dispatch short
struct Dispatch {
    tasks: JoinSet<()>,
    dispatched: usize,
    stopped_early: bool,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `config` - The crawler configuration
    /// * `progress` - Receiver of progress events
    /// * `results` - Receiver of the finished record set
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run
    /// * `Err(HarvestError)` - Invalid configuration or HTTP client setup failure
    pub fn new(
        config: Config,
        progress: Arc<dyn ProgressSink>,
        results: Arc<dyn ResultSink>,
    ) -> Result<Self, HarvestError> {
        validate(&config)?;
        let client = build_http_client(&config.crawler)?;

        Ok(Self {
            config: Arc::new(config),
            client,
            progress,
            results,
            stop: StopHandle::new(),
            state: CrawlState::Idle,
        })
    }

    /// Handle for requesting a cooperative stop of this crawl
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn state(&self) -> CrawlState {
        self.state
    }

    /// Runs the crawl for `seed_url`
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlOutcome::Completed)` - Results were persisted
    /// * `Ok(CrawlOutcome::Failed)` - The seed page could not be fetched; nothing written
    /// * `Err(HarvestError::EmptySeedUrl)` - No URL given; the crawl never started
    /// * `Err(HarvestError)` - Persisting failed or the coordinator was already used
    pub async fn run(&mut self, seed_url: &str) -> Result<CrawlOutcome, HarvestError> {
        let seed_url = seed_url.trim();
        if seed_url.is_empty() {
            return Err(HarvestError::EmptySeedUrl);
        }

        let started_at = Utc::now();
        let site = SiteIdentity::from_seed(seed_url);

        self.transition(CrawlState::FetchingSeed)?;
        self.emit(ProgressEvent::info(format!(
            "Starting scraping for {}...",
            seed_url
        )));

        let seed = match fetch_page(&self.client, seed_url).await {
            Ok(page) => {
                self.emit(ProgressEvent::success(format!(
                    "Fetched seed page {} (HTTP {})",
                    page.final_url, page.status_code
                )));
                page
            }
            Err(error) => {
                self.transition(CrawlState::Failed)?;
                self.emit(ProgressEvent::error(format!(
                    "[ERROR] Failed to fetch links from {}: {}",
                    seed_url, error
                )));
                return Ok(CrawlOutcome::Failed {
                    site,
                    seed_url: seed_url.to_string(),
                    error,
                });
            }
        };

        self.transition(CrawlState::Discovering)?;
        let links = collect_links(&seed.body, &seed.final_url);
        self.emit(ProgressEvent::info(format!(
            "Found {} links on {}",
            links.len(),
            seed.final_url
        )));

        let layout = OutputLayout::new(&self.config.output.root_dir, &site);
        let media_dir = layout.media_dir();
        let seen = DownloadedImages::new();
        let images = match ImageDownloader::new(&self.client, self.progress.as_ref())
            .download_all(&seed.body, &seed.final_url, &media_dir, &seen)
            .await
        {
            Ok(summary) => {
                if !seen.is_empty() {
                    tracing::debug!(
                        "{} distinct images downloaded to {}",
                        seen.len(),
                        media_dir.display()
                    );
                }
                summary
            }
            Err(e) => {
                self.emit(ProgressEvent::error(format!(
                    "Could not create media directory {}: {}",
                    media_dir.display(),
                    e
                )));
                ImageDownloadSummary::default()
            }
        };

        self.transition(CrawlState::Dispatching)?;
        let result_set = Arc::new(ResultSet::new());
        let Dispatch {
            mut tasks,
            dispatched,
            stopped_early,
        } = self.dispatch_links(&links, &result_set).await;

        self.transition(CrawlState::AwaitingCompletion)?;
        while let Some(joined) = tasks.join_next().await {
            if let Err(e) = joined {
                tracing::error!("Link task failed: {}", e);
            }
        }

        self.transition(CrawlState::Persisting)?;
        let report = CrawlReport {
            site,
            seed_url: seed_url.to_string(),
            pages: result_set.take(),
            links_discovered: links.len(),
            links_dispatched: dispatched,
            images,
            stopped_early,
            started_at,
            finished_at: Utc::now(),
        };

        match self.results.persist(&report) {
            Ok(paths) => {
                for path in paths {
                    self.emit(ProgressEvent::success(format!(
                        "Data saved to {}",
                        path.display()
                    )));
                }
            }
            Err(e) => {
                self.emit(ProgressEvent::error(format!(
                    "[ERROR] Failed to save results for {}: {}",
                    report.site, e
                )));
                return Err(e.into());
            }
        }

        self.transition(CrawlState::Done)?;
        self.emit(ProgressEvent::highlight(format!(
            "Web Scraping Complete: {} pages, {} images in {:.1}s",
            report.pages.len(),
            report.images.downloaded,
            report.elapsed_secs()
        )));

        Ok(CrawlOutcome::Completed(report))
    }

    /// Submits one fetch+extract task per link, at most `max_workers` running at once
    ///
    /// The stop flag is checked before waiting for a worker permit and again once the
    /// permit is held, so no link is spawned after a stop request.
    async fn dispatch_links(&self, links: &[String], result_set: &Arc<ResultSet>) -> Dispatch {
        let semaphore = Arc::new(Semaphore::new(self.config.crawler.max_workers));
        let mut tasks = JoinSet::new();
        let mut dispatched = 0;
        let mut stopped_early = false;

        for link in links {
            if self.stop.is_stop_requested() {
                stopped_early = true;
                break;
            }

            let permit = match Arc::clone(&semaphore).acquire_owned().await {
                Ok(permit) => permit,
                Err(e) => {
                    tracing::error!("Worker pool closed: {}", e);
                    break;
                }
            };

            // The wait for a free slot may have outlasted a stop request
            if self.stop.is_stop_requested() {
                drop(permit);
                stopped_early = true;
                break;
            }

            let client = self.client.clone();
            let progress = Arc::clone(&self.progress);
            let result_set = Arc::clone(result_set);
            let url = link.clone();

            tasks.spawn(async move {
                let _permit = permit;
                let page = process_link(&client, &url, progress.as_ref()).await;
                result_set.push(page);
            });
            dispatched += 1;
        }

        if stopped_early {
            self.emit(ProgressEvent::warning(format!(
                "Stopping scraping: {} of {} links were not dispatched",
                links.len() - dispatched,
                links.len()
            )));
        }

        tracing::debug!("Dispatched {} of {} links", dispatched, links.len());

        Dispatch {
            tasks,
            dispatched,
            stopped_early,
        }
    }

    fn transition(&mut self, next: CrawlState) -> Result<(), HarvestError> {
        if !self.state.can_transition_to(next) {
            return Err(HarvestError::InvalidTransition {
                from: self.state,
                to: next,
            });
        }

        tracing::debug!("Crawl state {} -> {}", self.state, next);
        if next.is_terminal() {
            tracing::info!("Crawl finished in state {}", next);
        }
        self.state = next;
        Ok(())
    }

    fn emit(&self, event: ProgressEvent) {
        self.progress.emit(event);
    }
}

/// Fetches one linked page and extracts its metadata
///
/// Always yields a record: a failed fetch becomes the error-sentinel record.
async fn process_link(client: &Client, url: &str, progress: &dyn ProgressSink) -> PageInfo {
    match fetch_page(client, url).await {
        Ok(page) => {
            let info = extract_page_info(url, &page.body);
            progress.emit(ProgressEvent::highlight(format!(
                "Scraped: {} | Title: {}",
                url, info.title
            )));
            info
        }
        Err(error) => {
            progress.emit(ProgressEvent::error(format!(
                "Failed to scrape {}: {}",
                url, error
            )));
            PageInfo::fetch_error(url)
        }
    }
}

/// A crawl running on its own task
pub struct CrawlHandle {
    stop: StopHandle,
    task: JoinHandle<Result<CrawlOutcome, HarvestError>>,
}

impl CrawlHandle {
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Asks the crawl to stop dispatching new links
    pub fn request_stop(&self) {
        self.stop.request_stop();
    }

    /// Waits for the crawl to finish
    pub async fn wait(self) -> Result<CrawlOutcome, HarvestError> {
        self.task.await?
    }

    /// Requests a stop, then waits for already dispatched work to drain
    pub async fn stop_and_wait(self) -> Result<CrawlOutcome, HarvestError> {
        self.request_stop();
        self.wait().await
    }
}

/// Starts a crawl on a background task
///
/// # Example
///
/// ```no_run
/// use site_harvest::config::Config;
/// use site_harvest::crawler::{spawn_crawl, Coordinator};
/// use site_harvest::output::FileResultSink;
/// use site_harvest::progress::TracingSink;
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = Config::default();
/// let sink = Arc::new(FileResultSink::new(&config.output));
/// let coordinator = Coordinator::new(config, Arc::new(TracingSink), sink)?;
/// let handle = spawn_crawl(coordinator, "https://example.com/");
/// let outcome = handle.wait().await?;
/// # Ok(())
/// # }
/// ```
pub fn spawn_crawl(mut coordinator: Coordinator, seed_url: impl Into<String>) -> CrawlHandle {
    let seed_url = seed_url.into();
    let stop = coordinator.stop_handle();
    let task = tokio::spawn(async move { coordinator.run(&seed_url).await });

    CrawlHandle { stop, task }
}

/// Runs a complete crawl and writes the results with the configured file outputs
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `seed_url` - Page whose links are harvested
/// * `progress` - Receiver of progress events
///
/// # Example
///
/// ```no_run
/// use site_harvest::config::Config;
/// use site_harvest::crawler::run_crawl;
/// use site_harvest::progress::TracingSink;
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let outcome = run_crawl(Config::default(), "https://example.com/", Arc::new(TracingSink)).await?;
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(
    config: Config,
    seed_url: &str,
    progress: Arc<dyn ProgressSink>,
) -> Result<CrawlOutcome, HarvestError> {
    let results = Arc::new(FileResultSink::new(&config.output));
    let mut coordinator = Coordinator::new(config, progress, results)?;
    coordinator.run(seed_url).await
}
