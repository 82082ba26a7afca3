use url::Url;

/// Resolves an image `src` value to an absolute URL
///
/// Returns None if the value should be skipped:
/// - empty values and fragment-only references
/// - `javascript:` and `data:` URIs
/// - values that do not resolve against the page URL
/// - non-HTTP(S) URLs after resolution
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sumi_sieve::url::resolve_source;
///
/// let page = Url::parse("https://example.com/gallery/").unwrap();
/// assert_eq!(
///     resolve_source("thumbs/a.png", &page),
///     Some("https://example.com/gallery/thumbs/a.png".to_string())
/// );
/// assert_eq!(resolve_source("data:image/png;base64,AAAA", &page), None);
/// ```
pub fn resolve_source(src: &str, base_url: &Url) -> Option<String> {
    let src = src.trim();

    if src.is_empty() || src.starts_with('#') {
        return None;
    }

    let lowered = src.to_ascii_lowercase();
    if lowered.starts_with("javascript:") || lowered.starts_with("data:") {
        return None;
    }

    match base_url.join(src) {
        Ok(absolute) if absolute.scheme() == "http" || absolute.scheme() == "https" => {
            Some(absolute.to_string())
        }
        _ => None,
    }
}
