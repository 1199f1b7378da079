use crate::config::OutputConfig;
use crate::crawler::CrawlReport;
use crate::output::csv_output::write_csv;
use crate::output::json_output::write_json;
use crate::output::layout::OutputLayout;
use crate::output::traits::{OutputResult, ResultSink};
use std::path::PathBuf;

/// Writes CSV and/or JSON exports under `<root>/<site>/`
#[derive(Debug, Clone)]
pub struct FileResultSink {
    root_dir: PathBuf,
    csv: bool,
    json: bool,
}

impl FileResultSink {
    pub fn new(config: &OutputConfig) -> Self {
        Self {
            root_dir: PathBuf::from(&config.root_dir),
            csv: config.csv,
            json: config.json,
        }
    }
}

impl ResultSink for FileResultSink {
    fn persist(&self, report: &CrawlReport) -> OutputResult<Vec<PathBuf>> {
        let layout = OutputLayout::new(&self.root_dir, &report.site);
        std::fs::create_dir_all(layout.site_dir())?;

        let mut written = Vec::new();

        if self.csv {
            let path = layout.csv_path();
            write_csv(&path, &report.pages)?;
            tracing::debug!("Wrote {} rows to {}", report.pages.len(), path.display());
            written.push(path);
        }

        if self.json {
            let path = layout.json_path();
            write_json(&path, report)?;
            tracing::debug!("Wrote {} pages to {}", report.pages.len(), path.display());
            written.push(path);
        }

        Ok(written)
    }
}
