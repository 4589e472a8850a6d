//! File name extraction from a bundle URL path.

use url::Url;

/// Extracts the last path segment of `url` (query and fragment ignored).
///
/// Returns `None` if the path is empty/root or ends in a dot segment.
pub fn file_name_from_url(url: &Url) -> Option<String> {
    let segment = url.path().split('/').filter(|s| !s.is_empty()).last()?;
    if segment == "." || segment == ".." {
        return None;
    }
    Some(segment.to_string())
}
