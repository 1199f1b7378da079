use crate::crawler::fetcher::FetchError;
use crate::crawler::images::ImageDownloadSummary;
use crate::crawler::page_info::PageInfo;
use crate::url::SiteIdentity;
use chrono::{DateTime, Utc};

/// Everything a finished crawl produced
#[derive(Debug, Clone)]
pub struct CrawlReport {
    pub site: SiteIdentity,
    pub seed_url: String,

    /// One record per dispatched link, in completion order
    pub pages: Vec<PageInfo>,

    /// Href-bearing anchors found on the seed page
    pub links_discovered: usize,

    /// Links handed to the worker pool
    pub links_dispatched: usize,

    /// Seed page image results
    pub images: ImageDownloadSummary,

    /// A stop request prevented some links from being dispatched
    pub stopped_early: bool,

    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl CrawlReport {
    /// Wall-clock duration in seconds
    pub fn elapsed_secs(&self) -> f64 {
        (self.finished_at - self.started_at).num_milliseconds() as f64 / 1000.0
    }

    /// Records whose fetch failed
    pub fn failed_pages(&self) -> usize {
        self.pages.iter().filter(|page| page.is_fetch_error()).count()
    }
}

/// How a crawl ended
#[derive(Debug)]
pub enum CrawlOutcome {
    /// Seed page fetched, links processed and results persisted
    Completed(CrawlReport),

    /// Seed page could not be fetched; nothing was written
    Failed {
        site: SiteIdentity,
        seed_url: String,
        error: FetchError,
    },
}

impl CrawlOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }

    pub fn report(&self) -> Option<&CrawlReport> {
        match self {
            Self::Completed(report) => Some(report),
            Self::Failed { .. } => None,
        }
    }
}
