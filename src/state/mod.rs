//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `CrawlState`: the lifecycle phase of a single crawl and its legal transitions
//! - `StopHandle`: the cooperative stop flag shared between a crawl and its caller

mod crawl_state;
mod stop;

// Re-export main types
pub use crawl_state::CrawlState;
pub use stop::StopHandle;
