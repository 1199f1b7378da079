use url::Url;

/// Image extensions eligible for download (lowercase, without the dot)
pub const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "gif", "webp"];

/// Replaces characters that are invalid in file names on common filesystems
///
/// Each of `< > : " / \ | ? *` becomes `_`.
///
/// # Examples
///
/// ```
/// use site_harvest::url::sanitize_filename;
///
/// assert_eq!(sanitize_filename("a<b>c.png"), "a_b_c.png");
/// ```
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '_',
            other => other,
        })
        .collect()
}

/// Returns the last segment of the URL path, or `None` when it is empty
pub fn last_path_segment(url: &Url) -> Option<&str> {
    url.path_segments()
        .and_then(|segments| segments.last())
        .filter(|segment| !segment.is_empty())
}

/// Returns true if the URL path ends in an allowed image extension
///
/// The check is case-insensitive and ignores the query string and fragment.
pub fn has_image_extension(url: &Url) -> bool {
    let Some(segment) = last_path_segment(url) else {
        return false;
    };

    match segment.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => {
            let ext = ext.to_ascii_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        }
        _ => false,
    }
}

/// Builds the on-disk file name for an image URL
pub fn image_filename(url: &Url) -> Option<String> {
    last_path_segment(url).map(sanitize_filename)
}
