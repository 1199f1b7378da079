//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler:
//! - Building the shared HTTP client with the configured timeout and user agent
//! - GET requests for HTML pages and image bytes
//! - Error classification
//!
//! Every request is a single attempt. Failures are returned as [`FetchError`] values and
//! never retried.

use crate::config::CrawlerConfig;
use reqwest::{Client, Response};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Upper bound for establishing a connection, capped by the request timeout
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Why a single fetch attempt failed
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("HTTP error for {url}: {source}")]
    Request { url: String, source: reqwest::Error },
}

impl FetchError {
    /// The URL the failed attempt was made for
    pub fn url(&self) -> &str {
        match self {
            Self::InvalidUrl { url, .. }
            | Self::Timeout { url }
            | Self::Status { url, .. }
            | Self::Request { url, .. } => url,
        }
    }

    fn from_reqwest(url: &str, error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout {
                url: url.to_string(),
            }
        } else {
            Self::Request {
                url: url.to_string(),
                source: error,
            }
        }
    }
}

/// A successfully fetched HTML page
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after redirects
    pub final_url: Url,

    /// HTTP status code
    pub status_code: u16,

    /// Page body content
    pub body: String,
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The crawler configuration (user agent and request timeout)
///
/// # Example
///
/// ```no_run
/// use site_harvest::config::CrawlerConfig;
/// use site_harvest::crawler::build_http_client;
///
/// let client = build_http_client(&CrawlerConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &CrawlerConfig) -> Result<Client, reqwest::Error> {
    let timeout = Duration::from_secs(config.request_timeout_secs);

    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(timeout)
        .connect_timeout(CONNECT_TIMEOUT.min(timeout))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches an HTML page
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - Absolute URL of the page
///
/// # Returns
///
/// * `Ok(FetchedPage)` - 2xx response with its body decoded as text
/// * `Err(FetchError)` - Invalid URL, network failure, timeout or non-2xx status
pub async fn fetch_page(client: &Client, url: &str) -> Result<FetchedPage, FetchError> {
    let response = send(client, url).await?;
    let final_url = response.url().clone();
    let status_code = response.status().as_u16();

    let body = response
        .text()
        .await
        .map_err(|e| FetchError::from_reqwest(url, e))?;

    Ok(FetchedPage {
        final_url,
        status_code,
        body,
    })
}

/// Fetches the raw bytes behind a URL (used for images)
pub async fn fetch_bytes(client: &Client, url: &str) -> Result<Vec<u8>, FetchError> {
    let response = send(client, url).await?;

    let bytes = response
        .bytes()
        .await
        .map_err(|e| FetchError::from_reqwest(url, e))?;

    Ok(bytes.to_vec())
}

/// Sends one GET request and rejects non-2xx responses
async fn send(client: &Client, url: &str) -> Result<Response, FetchError> {
    let parsed = Url::parse(url).map_err(|source| FetchError::InvalidUrl {
        url: url.to_string(),
        source,
    })?;

    tracing::debug!("GET {}", parsed);

    let response = client
        .get(parsed)
        .send()
        .await
        .map_err(|e| FetchError::from_reqwest(url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    Ok(response)
}
