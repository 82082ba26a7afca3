//! HTML extraction of the title and image candidates
//!
//! The selector is handed to `scraper` literally; this module never
//! interprets it.

use crate::url::resolve_source;
use scraper::{Html, Selector};
use thiserror::Error;
use url::Url;

/// Attribute read from every matched element
pub const IMAGE_SOURCE_ATTR: &str = "src";

/// Extracted information from an HTML page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedPage {
    /// Text of the `<title>` element, empty if absent
    pub title: String,

    /// Absolute image source URLs of the matched elements, first-seen order
    pub candidates: Vec<String>,
}

/// The selector could not be applied to the document
///
/// Carries what was extracted before the failure so the caller can carry on.
#[derive(Debug, Error)]
#[error("Invalid selector '{selector}': {message}")]
pub struct ExtractError {
    pub selector: String,
    pub message: String,
    pub partial: ParsedPage,
}

/// Extracts the title and image candidates from an HTML document
///
/// Matched elements without a `src` attribute are skipped. Relative sources
/// are resolved against `base_url`; duplicates are collapsed.
///
/// # Example
///
/// ```
/// use sumi_sieve::pipeline::extract;
/// use url::Url;
///
/// let html = r#"<html><head><title>Demo</title></head>
///     <body><img class="hero" src="/x.png"></body></html>"#;
/// let base_url = Url::parse("https://example.com/").unwrap();
///
/// let page = extract(html, "img.hero", &base_url).unwrap();
/// assert_eq!(page.title, "Demo");
/// assert_eq!(page.candidates, vec!["https://example.com/x.png".to_string()]);
/// ```
pub fn extract(html: &str, selector: &str, base_url: &Url) -> Result<ParsedPage, ExtractError> {
    let document = Html::parse_document(html);

    let mut page = ParsedPage {
        title: extract_title(&document),
        candidates: Vec::new(),
    };

    let parsed_selector = match Selector::parse(selector) {
        Ok(s) => s,
        Err(e) => {
            return Err(ExtractError {
                selector: selector.to_string(),
                message: format!("{:?}", e),
                partial: page,
            })
        }
    };

    for element in document.select(&parsed_selector) {
        let Some(src) = element.value().attr(IMAGE_SOURCE_ATTR) else {
            continue;
        };

        match resolve_source(src, base_url) {
            Some(candidate) => {
                if !page.candidates.contains(&candidate) {
                    page.candidates.push(candidate);
                }
            }
            None => tracing::debug!("Skipping unusable image source '{}'", src),
        }
    }

    Ok(page)
}

/// Extracts the page title from the HTML document
fn extract_title(document: &Html) -> String {
    let Ok(title_selector) = Selector::parse("title") else {
        return String::new();
    };

    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}
