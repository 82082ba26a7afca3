//! URL handling module for Sumi-Sieve
//!
//! This module validates target URLs, resolves image sources against the page
//! they were found on, and derives the on-disk names used for results.

mod domain;
mod naming;
mod resolve;

use crate::{InputError, InputResult};
use url::Url;

// Re-export main functions
pub use domain::{extract_domain, site_folder_name};
pub use naming::{file_stem, image_file_name, split_extension, INDEX_FILE_STEM};
pub use resolve::resolve_source;

/// Parses and validates a scrape target URL
///
/// A target must be an absolute HTTP(S) URL with a non-empty host.
///
/// # Examples
///
/// ```
/// use sumi_sieve::url::parse_target_url;
///
/// assert!(parse_target_url("https://www.example.com/gallery").is_ok());
/// assert!(parse_target_url("www.example.com").is_err());
/// assert!(parse_target_url("ftp://example.com/").is_err());
/// ```
pub fn parse_target_url(raw: &str) -> InputResult<Url> {
    let raw = raw.trim();

    let url = Url::parse(raw).map_err(|e| InputError::InvalidUrl {
        url: raw.to_string(),
        message: e.to_string(),
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(InputError::InvalidScheme(url.scheme().to_string()));
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(InputError::MissingHost(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_https_url() {
        let url = parse_target_url("https://example.com/page").unwrap();
        assert_eq!(url.host_str(), Some("example.com"));
    }

    #[test]
    fn test_parse_http_url() {
        assert!(parse_target_url("http://127.0.0.1:8080/").is_ok());
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let url = parse_target_url("  https://example.com/  ").unwrap();
        assert_eq!(url.as_str(), "https://example.com/");
    }

    #[test]
    fn test_reject_relative_url() {
        let err = parse_target_url("/just/a/path").unwrap_err();
        assert!(matches!(err, InputError::InvalidUrl { .. }));
    }

    #[test]
    fn test_reject_missing_scheme() {
        assert!(parse_target_url("example.com").is_err());
    }

    #[test]
    fn test_reject_non_http_scheme() {
        assert_eq!(
            parse_target_url("mailto:someone@example.com").unwrap_err(),
            InputError::InvalidScheme("mailto".to_string())
        );
    }
}
