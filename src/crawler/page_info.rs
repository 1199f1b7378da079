use serde::Serialize;

/// Title value when the page has no usable `<title>`
pub const NO_TITLE: &str = "No Title";

/// Title value when the page could not be fetched
pub const TITLE_FETCH_ERROR: &str = "Error Fetching Data";

/// Value of every meta field when the page could not be fetched
pub const FIELD_FETCH_ERROR: &str = "Error";

/// The meta tags collected from every page
///
/// Keys match the `name`/`property` attribute value of the tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetaKey {
    Description,
    Keywords,
    OgTitle,
    OgDescription,
    TwitterTitle,
    TwitterDescription,
}

impl MetaKey {
    pub const ALL: [MetaKey; 6] = [
        Self::Description,
        Self::Keywords,
        Self::OgTitle,
        Self::OgDescription,
        Self::TwitterTitle,
        Self::TwitterDescription,
    ];

    /// Looks up a key by its attribute value (exact, case-sensitive)
    pub fn from_attr(value: &str) -> Option<Self> {
        match value {
            "description" => Some(Self::Description),
            "keywords" => Some(Self::Keywords),
            "og:title" => Some(Self::OgTitle),
            "og:description" => Some(Self::OgDescription),
            "twitter:title" => Some(Self::TwitterTitle),
            "twitter:description" => Some(Self::TwitterDescription),
            _ => None,
        }
    }

    pub fn as_attr(&self) -> &'static str {
        match self {
            Self::Description => "description",
            Self::Keywords => "keywords",
            Self::OgTitle => "og:title",
            Self::OgDescription => "og:description",
            Self::TwitterTitle => "twitter:title",
            Self::TwitterDescription => "twitter:description",
        }
    }

    /// Value used when the page has no tag for this key
    pub fn missing_value(&self) -> &'static str {
        match self {
            Self::Description => "No Description",
            Self::Keywords => "No Keywords",
            Self::OgTitle => "No OG Title",
            Self::OgDescription => "No OG Description",
            Self::TwitterTitle => "No Twitter Title",
            Self::TwitterDescription => "No Twitter Description",
        }
    }
}

/// Extracted metadata for one fetched URL
///
/// Every field always holds a value: either what the page declared, the per-field
/// "No ..." default when the page declared nothing, or the fetch-error sentinels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub url: String,
    pub title: String,
    pub description: String,
    pub keywords: String,
    #[serde(rename = "og:title")]
    pub og_title: String,
    #[serde(rename = "og:description")]
    pub og_description: String,
    #[serde(rename = "twitter:title")]
    pub twitter_title: String,
    #[serde(rename = "twitter:description")]
    pub twitter_description: String,
}

impl PageInfo {
    /// A record for a page that declared no title and no recognized meta tags
    pub fn with_defaults(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: NO_TITLE.to_string(),
            description: MetaKey::Description.missing_value().to_string(),
            keywords: MetaKey::Keywords.missing_value().to_string(),
            og_title: MetaKey::OgTitle.missing_value().to_string(),
            og_description: MetaKey::OgDescription.missing_value().to_string(),
            twitter_title: MetaKey::TwitterTitle.missing_value().to_string(),
            twitter_description: MetaKey::TwitterDescription.missing_value().to_string(),
        }
    }

    /// The record produced when a linked page could not be fetched
    pub fn fetch_error(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: TITLE_FETCH_ERROR.to_string(),
            description: FIELD_FETCH_ERROR.to_string(),
            keywords: FIELD_FETCH_ERROR.to_string(),
            og_title: FIELD_FETCH_ERROR.to_string(),
            og_description: FIELD_FETCH_ERROR.to_string(),
            twitter_title: FIELD_FETCH_ERROR.to_string(),
            twitter_description: FIELD_FETCH_ERROR.to_string(),
        }
    }

    /// Returns true if this record carries the fetch-error sentinels
    pub fn is_fetch_error(&self) -> bool {
        self.title == TITLE_FETCH_ERROR
            && MetaKey::ALL
                .iter()
                .all(|key| self.meta(*key) == FIELD_FETCH_ERROR)
    }

    pub fn meta(&self, key: MetaKey) -> &str {
        match key {
            MetaKey::Description => &self.description,
            MetaKey::Keywords => &self.keywords,
            MetaKey::OgTitle => &self.og_title,
            MetaKey::OgDescription => &self.og_description,
            MetaKey::TwitterTitle => &self.twitter_title,
            MetaKey::TwitterDescription => &self.twitter_description,
        }
    }

    pub(crate) fn set_meta(&mut self, key: MetaKey, value: String) {
        let slot = match key {
            MetaKey::Description => &mut self.description,
            MetaKey::Keywords => &mut self.keywords,
            MetaKey::OgTitle => &mut self.og_title,
            MetaKey::OgDescription => &mut self.og_description,
            MetaKey::TwitterTitle => &mut self.twitter_title,
            MetaKey::TwitterDescription => &mut self.twitter_description,
        };
        *slot = value;
    }

    /// The record as one export row, in column order
    pub fn to_row(&self) -> [&str; 8] {
        [
            self.url.as_str(),
            self.title.as_str(),
            self.description.as_str(),
            self.keywords.as_str(),
            self.og_title.as_str(),
            self.og_description.as_str(),
            self.twitter_title.as_str(),
            self.twitter_description.as_str(),
        ]
    }
}
