//! URL handling module for Site-Harvest
//!
//! This module derives the site identity used for output naming, resolves references
//! found in HTML against their page, and turns image URLs into safe file names.

mod filename;
mod site;

use url::Url;

// Re-export main functions
pub use filename::{has_image_extension, image_filename, sanitize_filename, IMAGE_EXTENSIONS};
pub use site::{SiteIdentity, UNKNOWN_SITE};

/// Resolves a reference found in a document against the document's URL
///
/// Follows the same rules a browser applies to `href`/`src` attributes: fragments,
/// scheme-relative (`//host/...`), absolute-path and relative-path references are all
/// handled by [`Url::join`].
///
/// # Examples
///
/// ```
/// use site_harvest::url::resolve_reference;
/// use url::Url;
///
/// let base = Url::parse("https://example.com/docs/intro").unwrap();
/// assert_eq!(
///     resolve_reference(&base, "../about").unwrap().as_str(),
///     "https://example.com/about"
/// );
/// ```
pub fn resolve_reference(base: &Url, reference: &str) -> Option<Url> {
    base.join(reference).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://example.com/docs/page.html").unwrap()
    }

    #[test]
    fn test_resolve_fragment() {
        assert_eq!(
            resolve_reference(&base(), "#top").unwrap().as_str(),
            "https://example.com/docs/page.html#top"
        );
    }

    #[test]
    fn test_resolve_scheme_relative() {
        assert_eq!(
            resolve_reference(&base(), "//cdn.example.net/a").unwrap().as_str(),
            "https://cdn.example.net/a"
        );
    }

    #[test]
    fn test_resolve_absolute_path() {
        assert_eq!(
            resolve_reference(&base(), "/a").unwrap().as_str(),
            "https://example.com/a"
        );
    }

    #[test]
    fn test_resolve_relative_path() {
        assert_eq!(
            resolve_reference(&base(), "other.html").unwrap().as_str(),
            "https://example.com/docs/other.html"
        );
    }

    #[test]
    fn test_resolve_absolute_url() {
        assert_eq!(
            resolve_reference(&base(), "http://x.test/b").unwrap().as_str(),
            "http://x.test/b"
        );
    }

    #[test]
    fn test_resolve_invalid() {
        assert!(resolve_reference(&base(), "http://[::1").is_none());
    }
}
