//! Output module for persisting crawl results
//!
//! This module handles:
//! - The result sink interface a crawl hands its finished report to
//! - The per-site directory layout for exports and media
//! - CSV and JSON exports of the collected page records

mod csv_output;
mod file_sink;
mod json_output;
mod layout;
mod traits;

pub use csv_output::{write_csv, write_csv_to, CSV_HEADERS};
pub use file_sink::FileResultSink;
pub use json_output::{write_json, write_json_to};
pub use layout::OutputLayout;
pub use traits::{OutputError, OutputResult, ResultSink};
