//! Progress reporting for running crawls
//!
//! A crawl reports every fetch attempt and phase change as a short human-readable
//! [`ProgressEvent`] tagged with a [`Severity`]. How the events are rendered is up to the
//! [`ProgressSink`] the caller provides.

use std::fmt;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// How an event should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Routine status line
    Info,
    /// Something was fetched or written
    Success,
    /// Something was skipped or cut short
    Warning,
    /// A fetch or write failed
    Error,
    /// Per-page results and the completion line
    Highlight,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Highlight => "highlight",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single status line emitted by a crawl
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressEvent {
    pub message: String,
    pub severity: Severity,
}

impl ProgressEvent {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Severity::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(Severity::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    pub fn highlight(message: impl Into<String>) -> Self {
        Self::new(Severity::Highlight, message)
    }
}

/// Receiver of crawl progress events
///
/// Events are emitted from worker tasks concurrently, so implementations must be
/// thread-safe and must not block for long.
pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: ProgressEvent);
}

impl<F> ProgressSink for F
where
    F: Fn(ProgressEvent) + Send + Sync,
{
    fn emit(&self, event: ProgressEvent) {
        self(event)
    }
}

/// Forwards progress events to `tracing`
///
/// Errors are logged at `error`, warnings at `warn`, everything else at `info`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl ProgressSink for TracingSink {
    fn emit(&self, event: ProgressEvent) {
        match event.severity {
            Severity::Error => tracing::error!("{}", event.message),
            Severity::Warning => tracing::warn!("{}", event.message),
            severity => tracing::info!(severity = severity.as_str(), "{}", event.message),
        }
    }
}

/// Sends progress events over a tokio channel
///
/// Useful when a separate task renders progress. Events emitted after the receiver has
/// been dropped are discarded.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: UnboundedSender<ProgressEvent>,
}

impl ChannelSink {
    /// Creates a sink together with the receiving end of its channel
    pub fn new() -> (Self, UnboundedReceiver<ProgressEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl ProgressSink for ChannelSink {
    fn emit(&self, event: ProgressEvent) {
        if self.tx.send(event).is_err() {
            tracing::debug!("Progress receiver dropped, discarding event");
        }
    }
}
