use super::filename::sanitize_filename;
use serde::Serialize;
use std::fmt;
use url::Url;

/// Label used when the seed URL has no usable host
pub const UNKNOWN_SITE: &str = "Unknown_Site";

/// Short site label derived from the seed URL's host
///
/// Names the per-site output folder, the media subfolder and the result files.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SiteIdentity(String);

impl SiteIdentity {
    /// Derives the site label from a seed URL string
    ///
    /// A leading `www.` is dropped and the first dot-separated label of the remaining
    /// host is kept, lowercased and made safe for use as a directory name. Seeds that do
    /// not parse or carry no host map to [`UNKNOWN_SITE`].
    ///
    /// # Examples
    ///
    /// ```
    /// use site_harvest::url::SiteIdentity;
    ///
    /// assert_eq!(SiteIdentity::from_seed("https://www.example.com/").as_str(), "example");
    /// assert_eq!(SiteIdentity::from_seed("https://blog.example.com/").as_str(), "blog");
    /// assert_eq!(SiteIdentity::from_seed("not a url").as_str(), "Unknown_Site");
    /// ```
    pub fn from_seed(seed: &str) -> Self {
        Url::parse(seed.trim())
            .ok()
            .and_then(|url| Self::from_url(&url))
            .unwrap_or_else(Self::unknown)
    }

    /// Derives the site label from a parsed URL, if it has a host
    pub fn from_url(url: &Url) -> Option<Self> {
        let host = url.host_str()?.to_lowercase();
        let host = host.strip_prefix("www.").unwrap_or(host.as_str());
        let label = host.split('.').next().filter(|label| !label.is_empty())?;
        Some(Self(sanitize_filename(label)))
    }

    /// The fallback identity for unparseable seeds
    pub fn unknown() -> Self {
        Self(UNKNOWN_SITE.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SiteIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
