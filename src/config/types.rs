use serde::Deserialize;

/// Default number of concurrent link workers
pub const DEFAULT_MAX_WORKERS: usize = 10;

/// Default per-request timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Main configuration structure for Site-Harvest
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CrawlerConfig {
    /// Maximum number of linked pages fetched at the same time
    pub max_workers: usize,

    /// Timeout applied to every page and image request (seconds)
    pub request_timeout_secs: u64,

    /// User agent sent with every request
    pub user_agent: String,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_workers: DEFAULT_MAX_WORKERS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            user_agent: format!("site-harvest/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct OutputConfig {
    /// Directory under which one folder per site is created
    pub root_dir: String,

    /// Write the tabular export
    pub csv: bool,

    /// Write the structured export
    pub json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            root_dir: "SITE".to_string(),
            csv: true,
            json: true,
        }
    }
}
