//! Structured export of crawl results

use crate::crawler::{CrawlReport, PageInfo};
use crate::output::traits::OutputResult;
use crate::url::SiteIdentity;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;
use std::path::Path;

#[derive(Serialize)]
struct JsonExport<'a> {
    site: &'a SiteIdentity,
    seed_url: &'a str,
    crawled_at: DateTime<Utc>,
    page_count: usize,
    pages: &'a [PageInfo],
}

impl<'a> From<&'a CrawlReport> for JsonExport<'a> {
    fn from(report: &'a CrawlReport) -> Self {
        Self {
            site: &report.site,
            seed_url: &report.seed_url,
            crawled_at: report.started_at,
            page_count: report.pages.len(),
            pages: &report.pages,
        }
    }
}

/// Writes the report as pretty-printed JSON to `path`
pub fn write_json(path: &Path, report: &CrawlReport) -> OutputResult<()> {
    let file = std::fs::File::create(path)?;
    write_json_to(std::io::BufWriter::new(file), report)
}

/// Writes the JSON export to any writer
pub fn write_json_to<W: Write>(mut writer: W, report: &CrawlReport) -> OutputResult<()> {
    serde_json::to_writer_pretty(&mut writer, &JsonExport::from(report))?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}
