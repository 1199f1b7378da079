//! Tabular export of crawl results

use crate::crawler::PageInfo;
use crate::output::traits::OutputResult;
use std::io::Write;
use std::path::Path;

/// Column headers, in the order `PageInfo::to_row` produces values
pub const CSV_HEADERS: [&str; 8] = [
    "URL",
    "Page Title",
    "Meta Description",
    "Keywords",
    "OG Title",
    "OG Description",
    "Twitter Title",
    "Twitter Description",
];

/// Writes one header row and one row per page to `path`
pub fn write_csv(path: &Path, pages: &[PageInfo]) -> OutputResult<()> {
    let file = std::fs::File::create(path)?;
    write_csv_to(file, pages)
}

/// Writes the CSV export to any writer
pub fn write_csv_to<W: Write>(writer: W, pages: &[PageInfo]) -> OutputResult<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(CSV_HEADERS)?;

    for page in pages {
        writer.write_record(page.to_row())?;
    }

    writer.flush()?;
    Ok(())
}
