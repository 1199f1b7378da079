//! Site-Harvest: a single-seed page metadata harvester
//!
//! This crate fetches one seed page, downloads the images it references, visits every page
//! it links to with a bounded worker pool, and collects the title and social meta tags of
//! each linked page into an ordered record set.

pub mod config;
pub mod crawler;
pub mod output;
pub mod progress;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Site-Harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("No URL added, a seed URL is required")]
    EmptySeedUrl,

    #[error("Invalid state transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: state::CrawlState,
        to: state::CrawlState,
    },

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Crawl task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for Site-Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{run_crawl, spawn_crawl, Coordinator, CrawlOutcome, CrawlReport, PageInfo};
pub use progress::{ProgressEvent, ProgressSink, Severity};
pub use state::CrawlState;
pub use url::SiteIdentity;
