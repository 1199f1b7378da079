//! Crawl lifecycle state definitions
//!
//! This module defines the states a single crawl moves through and which moves between
//! them are legal.

use std::fmt;

/// Represents the current phase of one crawl
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlState {
    // ===== Start State =====
    /// Crawl has been created but not started
    Idle,

    // ===== Active States =====
    /// Seed page is being fetched
    FetchingSeed,

    /// Links are being collected and seed images downloaded
    Discovering,

    /// Link tasks are being submitted to the worker pool
    Dispatching,

    /// Waiting for every dispatched link task to finish
    AwaitingCompletion,

    /// Handing results to the result sink
    Persisting,

    // ===== Terminal States =====
    /// Crawl finished and results were persisted
    Done,

    /// Seed page could not be fetched; nothing was written
    Failed,
}

impl CrawlState {
    /// Returns true if this is a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }

    /// Returns true if moving from `self` to `next` is a legal transition
    pub fn can_transition_to(&self, next: CrawlState) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::FetchingSeed)
                | (Self::FetchingSeed, Self::Discovering)
                | (Self::FetchingSeed, Self::Failed)
                | (Self::Discovering, Self::Dispatching)
                | (Self::Dispatching, Self::AwaitingCompletion)
                | (Self::AwaitingCompletion, Self::Persisting)
                | (Self::Persisting, Self::Done)
        )
    }

    /// Short lowercase name used in log lines
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::FetchingSeed => "fetching_seed",
            Self::Discovering => "discovering",
            Self::Dispatching => "dispatching",
            Self::AwaitingCompletion => "awaiting_completion",
            Self::Persisting => "persisting",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for CrawlState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
