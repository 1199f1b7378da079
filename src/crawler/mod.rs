//! Crawler module for fetching the seed page and harvesting its links
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with a fixed per-request timeout
//! - Link collection and metadata extraction from HTML
//! - Deduplicated image downloading for the seed page
//! - Bounded-concurrency crawl coordination

mod coordinator;
mod fetcher;
mod images;
mod links;
mod metadata;
mod page_info;
mod report;
mod result_set;

pub use coordinator::{run_crawl, spawn_crawl, CrawlHandle, Coordinator};
pub use fetcher::{build_http_client, fetch_bytes, fetch_page, FetchError, FetchedPage};
pub use images::{DownloadedImages, ImageDownloadSummary, ImageDownloader};
pub use links::collect_links;
pub use metadata::extract_page_info;
pub use page_info::{MetaKey, PageInfo, FIELD_FETCH_ERROR, NO_TITLE, TITLE_FETCH_ERROR};
pub use report::{CrawlOutcome, CrawlReport};
pub use result_set::ResultSet;
