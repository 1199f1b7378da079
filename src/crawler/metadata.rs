//! HTML metadata extraction
//!
//! Reads the page title and the description, keywords, Open Graph and Twitter card meta
//! tags from a fetched document.

use crate::crawler::page_info::{MetaKey, PageInfo, NO_TITLE};
use scraper::{ElementRef, Html, Selector};

/// Extracts the title and recognized meta tags of a page
///
/// # Extraction Rules
///
/// - Title: text of the first `<title>`, trimmed; "No Title" when absent or blank
/// - A meta tag is identified by its `name` attribute, or by `property` when `name` is
///   absent or empty (Open Graph and Twitter cards use `property`)
/// - A recognized tag's `content` (trimmed, empty when missing) replaces the field value;
///   when a key appears more than once the last tag in document order wins
///
/// Malformed HTML is parsed best-effort; extraction never fails.
///
/// # Example
///
/// ```
/// use site_harvest::crawler::extract_page_info;
///
/// let html = r#"<html><head><title>Home</title>
///     <meta property="og:title" content="Welcome"></head></html>"#;
/// let info = extract_page_info("https://example.com/", html);
/// assert_eq!(info.title, "Home");
/// assert_eq!(info.og_title, "Welcome");
/// assert_eq!(info.description, "No Description");
/// ```
pub fn extract_page_info(url: &str, html: &str) -> PageInfo {
    let document = Html::parse_document(html);
    let mut info = PageInfo::with_defaults(url);

    info.title = extract_title(&document).unwrap_or_else(|| NO_TITLE.to_string());

    if let Ok(meta_selector) = Selector::parse("meta") {
        for element in document.select(&meta_selector) {
            if let Some((key, content)) = recognized_meta(element) {
                info.set_meta(key, content);
            }
        }
    }

    info
}

/// Extracts the page title from the HTML document
fn extract_title(document: &Html) -> Option<String> {
    let title_selector = Selector::parse("title").ok()?;

    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Returns the key and trimmed content of a meta element we collect
fn recognized_meta(element: ElementRef<'_>) -> Option<(MetaKey, String)> {
    let attrs = element.value();

    let identifier = attrs
        .attr("name")
        .filter(|name| !name.is_empty())
        .or_else(|| attrs.attr("property"))?;

    let key = MetaKey::from_attr(identifier)?;
    let content = attrs.attr("content").unwrap_or_default().trim().to_string();

    Some((key, content))
}
