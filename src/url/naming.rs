use url::Url;

/// File stem used when a URL has no path beyond `/`
pub const INDEX_FILE_STEM: &str = "index";

/// Fallback name for images whose URL ends without a file name
const DEFAULT_IMAGE_STEM: &str = "image";

/// Derives the result file stem from a URL path
///
/// The leading `/` is dropped, the remaining separators become hyphens and any
/// trailing hyphens are trimmed. A root path maps to [`INDEX_FILE_STEM`].
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sumi_sieve::url::file_stem;
///
/// let url = Url::parse("https://example.com/a/b/").unwrap();
/// assert_eq!(file_stem(&url), "a-b");
///
/// let root = Url::parse("https://example.com").unwrap();
/// assert_eq!(file_stem(&root), "index");
/// ```
pub fn file_stem(url: &Url) -> String {
    let path = url.path();
    let path = path.strip_prefix('/').unwrap_or(path);

    let stem = path.replace('/', "-");
    let stem = stem.trim_end_matches('-');

    if stem.is_empty() {
        INDEX_FILE_STEM.to_string()
    } else {
        stem.to_string()
    }
}

/// Splits a file name into its stem and extension (dot included)
///
/// Only the last dot counts, and a leading dot is part of the stem.
pub fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) if idx > 0 => (&name[..idx], &name[idx..]),
        _ => (name, ""),
    }
}

/// Derives the on-disk file name of a downloaded image
///
/// Uses the last path segment of the image URL. Query strings and fragments
/// never end up in the name.
pub fn image_file_name(url: &Url) -> String {
    let segment = url
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_IMAGE_STEM);

    let (stem, extension) = split_extension(segment);
    let stem = if stem.is_empty() || stem == "." {
        DEFAULT_IMAGE_STEM
    } else {
        stem
    };

    format!("{}{}", stem, extension)
}
