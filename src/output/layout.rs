use crate::url::SiteIdentity;
use std::path::{Path, PathBuf};

/// Where a site's artifacts live under the output root
///
/// ```text
/// <root>/<site>/<site>_data.csv
/// <root>/<site>/<site>_data.json
/// <root>/<site>/Media/<site>/<image files>
/// ```
#[derive(Debug, Clone)]
pub struct OutputLayout {
    site_dir: PathBuf,
    site: SiteIdentity,
}

impl OutputLayout {
    pub fn new(root: impl AsRef<Path>, site: &SiteIdentity) -> Self {
        Self {
            site_dir: root.as_ref().join(site.as_str()),
            site: site.clone(),
        }
    }

    pub fn site_dir(&self) -> &Path {
        &self.site_dir
    }

    pub fn media_dir(&self) -> PathBuf {
        self.site_dir.join("Media").join(self.site.as_str())
    }

    pub fn csv_path(&self) -> PathBuf {
        self.site_dir.join(format!("{}_data.csv", self.site))
    }

    pub fn json_path(&self) -> PathBuf {
        self.site_dir.join(format!("{}_data.json", self.site))
    }
}
