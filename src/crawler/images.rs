//! Image downloading for the seed page
//!
//! Finds `<img>` references in a document, keeps the ones with an allowed image
//! extension, and writes each distinct image URL to the media directory once per crawl.

use crate::crawler::fetcher::{fetch_bytes, FetchError};
use crate::progress::{ProgressEvent, ProgressSink};
use crate::url::{has_image_extension, image_filename, resolve_reference};
use reqwest::Client;
use scraper::{Html, Selector};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use thiserror::Error;
use url::Url;

/// Why a single image could not be saved
#[derive(Debug, Error)]
enum ImageError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Image URLs already downloaded during the current crawl
///
/// `claim` checks and inserts under one lock, so two concurrent downloaders can never
/// both fetch the same URL.
#[derive(Debug, Default)]
pub struct DownloadedImages {
    urls: Mutex<HashSet<String>>,
}

impl DownloadedImages {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the URL as taken; returns false if it was already taken
    pub fn claim(&self, url: &str) -> bool {
        self.lock().insert(url.to_string())
    }

    /// Gives a claimed URL back after its download failed
    pub fn release(&self, url: &str) {
        self.lock().remove(url);
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashSet<String>> {
        self.urls.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Counts from one `download_all` pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImageDownloadSummary {
    /// Images fetched and written
    pub downloaded: usize,

    /// Images whose fetch or write failed
    pub failed: usize,

    /// References skipped: disallowed extension, unresolvable or already downloaded
    pub skipped: usize,
}

/// Downloads the images referenced by a page
pub struct ImageDownloader<'a> {
    client: &'a Client,
    progress: &'a dyn ProgressSink,
}

impl<'a> ImageDownloader<'a> {
    pub fn new(client: &'a Client, progress: &'a dyn ProgressSink) -> Self {
        Self { client, progress }
    }

    /// Downloads every eligible, not yet downloaded image referenced by `html`
    ///
    /// # Flow
    ///
    /// 1. Create `dest_dir` if needed
    /// 2. For each `<img>` in document order, read `src` (falling back to `data-src`)
    /// 3. Resolve against `base_url` and keep only allowed extensions
    /// 4. Claim the URL in `seen`; skip it if already claimed
    /// 5. Fetch, write under the sanitized last path segment, report the result
    ///
    /// A failed image is reported and released from `seen`; the remaining images are
    /// still processed.
    ///
    /// # Returns
    ///
    /// * `Ok(ImageDownloadSummary)` - Counts for this pass
    /// * `Err(std::io::Error)` - The destination directory could not be created
    pub async fn download_all(
        &self,
        html: &str,
        base_url: &Url,
        dest_dir: &Path,
        seen: &DownloadedImages,
    ) -> std::io::Result<ImageDownloadSummary> {
        let mut summary = ImageDownloadSummary::default();
        let candidates = image_references(html, base_url);

        tokio::fs::create_dir_all(dest_dir).await?;

        for reference in candidates {
            let Some(image_url) = reference else {
                summary.skipped += 1;
                continue;
            };

            if !has_image_extension(&image_url) {
                tracing::debug!("Skipping non-image extension: {}", image_url);
                summary.skipped += 1;
                continue;
            }

            let Some(filename) = image_filename(&image_url) else {
                summary.skipped += 1;
                continue;
            };

            let url_str = image_url.as_str();
            if !seen.claim(url_str) {
                tracing::debug!("Already downloaded: {}", url_str);
                summary.skipped += 1;
                continue;
            }

            let target = dest_dir.join(&filename);
            match self.download_one(url_str, &target).await {
                Ok(()) => {
                    summary.downloaded += 1;
                    self.progress.emit(ProgressEvent::success(format!(
                        "Downloaded Image: {}",
                        target.display()
                    )));
                }
                Err(error) => {
                    seen.release(url_str);
                    summary.failed += 1;
                    self.progress.emit(ProgressEvent::error(format!(
                        "Error downloading {}: {}",
                        url_str, error
                    )));
                }
            }
        }

        Ok(summary)
    }

    async fn download_one(&self, url: &str, target: &Path) -> Result<(), ImageError> {
        let bytes = fetch_bytes(self.client, url).await?;

        tokio::fs::write(target, &bytes)
            .await
            .map_err(|source| ImageError::Write {
                path: target.to_path_buf(),
                source,
            })
    }
}

/// Resolved image references in document order
///
/// `None` marks a reference that could not be resolved against `base_url`.
fn image_references(html: &str, base_url: &Url) -> Vec<Option<Url>> {
    let document = Html::parse_document(html);
    let mut references = Vec::new();

    if let Ok(img_selector) = Selector::parse("img") {
        for element in document.select(&img_selector) {
            let attrs = element.value();
            let source = attrs
                .attr("src")
                .filter(|src| !src.is_empty())
                .or_else(|| attrs.attr("data-src"))
                .filter(|src| !src.is_empty());

            if let Some(source) = source {
                references.push(resolve_reference(base_url, source));
            }
        }
    }

    references
}
