//! Core data types flowing through the scrape pipeline

use crate::url::parse_target_url;
use crate::InputResult;
use serde::{Deserialize, Serialize};
use url::Url;

/// One (URL, selector) pair to scrape
///
/// The URL is validated on construction, so a target always carries an
/// absolute HTTP(S) URL with a host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeTarget {
    url: Url,
    raw_url: String,
    selector: String,
}

impl ScrapeTarget {
    /// Creates a target from a raw URL string and a selector
    pub fn new(raw_url: &str, selector: impl Into<String>) -> InputResult<Self> {
        let url = parse_target_url(raw_url)?;
        Ok(Self {
            url,
            raw_url: raw_url.trim().to_string(),
            selector: selector.into(),
        })
    }

    /// The parsed target URL
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The URL exactly as it was submitted
    ///
    /// This is the value recorded in the result, so output files show what the
    /// user typed rather than the normalized form.
    pub fn raw_url(&self) -> &str {
        &self.raw_url
    }

    /// The selector, passed through literally to the extractor
    pub fn selector(&self) -> &str {
        &self.selector
    }
}

/// The outcome of scraping one target
///
/// Field names match the JSON layout of persisted results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapeResult {
    /// Document title, empty if the page had none
    pub title: String,

    /// The target URL as submitted
    pub url: String,

    /// The selector used for extraction
    pub selector: String,

    /// Image URLs that passed validation, in document order
    #[serde(rename = "img_urls")]
    pub image_urls: Vec<String>,
}

impl ScrapeResult {
    /// Starts a result for a target with no images yet
    pub fn for_target(target: &ScrapeTarget, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: target.raw_url().to_string(),
            selector: target.selector().to_string(),
            image_urls: Vec::new(),
        }
    }
}
