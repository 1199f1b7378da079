//! Output handler traits and types
//!
//! This module defines the trait interface for result sinks and the errors they report.

use crate::crawler::CrawlReport;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Trait for result sinks
///
/// A result sink receives the finished report of a crawl that reached the persisting
/// phase. Implementations must be thread-safe; a crawl may run on any runtime thread.
pub trait ResultSink: Send + Sync {
    /// Persists the report
    ///
    /// # Returns
    ///
    /// The files written, for progress reporting
    fn persist(&self, report: &CrawlReport) -> OutputResult<Vec<PathBuf>>;
}
