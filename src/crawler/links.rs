//! Outbound link collection

use crate::url::resolve_reference;
use scraper::{Html, Selector};
use url::Url;

/// Collects the absolute URL of every anchor on a page
///
/// # Link Extraction Rules
///
/// - Every `<a>` with a non-empty `href` yields exactly one entry, in document order
/// - Anchors without `href` (or with `href=""`) are skipped
/// - Each href is resolved against `base_url` the way a browser resolves it
/// - An href that cannot be resolved is kept verbatim, so it still gets one fetch
///   attempt (which fails) and one record
/// - No deduplication and no scheme filtering
///
/// # Example
///
/// ```
/// use site_harvest::crawler::collect_links;
/// use url::Url;
///
/// let html = r#"<a href="/a">A</a><a name="anchor">no href</a><a href="http://x.test/b">B</a>"#;
/// let base = Url::parse("https://example.com/").unwrap();
/// assert_eq!(
///     collect_links(html, &base),
///     vec!["https://example.com/a", "http://x.test/b"]
/// );
/// ```
pub fn collect_links(html: &str, base_url: &Url) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut links = Vec::new();

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            let Some(href) = element.value().attr("href") else {
                continue;
            };

            if href.is_empty() {
                continue;
            }

            match resolve_reference(base_url, href) {
                Some(absolute_url) => links.push(absolute_url.to_string()),
                None => {
                    tracing::debug!("Could not resolve href '{}' against {}", href, base_url);
                    links.push(href.to_string());
                }
            }
        }
    }

    links
}
