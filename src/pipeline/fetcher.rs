//! HTTP fetcher implementation
//!
//! This module handles the page requests of the scrape stage:
//! - Building the shared HTTP client with the configured user agent
//! - GET requests for target pages, read to completion
//! - Transport error classification

use crate::config::HttpConfig;
use crate::SieveError;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// A fetched page, body fully read
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after redirects, used to resolve relative image sources
    pub final_url: Url,

    /// HTTP status code
    pub status_code: u16,

    /// Content-Type header value, if any
    pub content_type: Option<String>,

    /// Decoded page body
    pub body: String,
}

/// Builds an HTTP client with proper configuration
///
/// The client is cloned into every task; clones share one connection pool.
///
/// # Example
///
/// ```no_run
/// use sumi_sieve::config::HttpConfig;
/// use sumi_sieve::pipeline::build_http_client;
///
/// let config = HttpConfig {
///     user_agent: "sumi-sieve/1.0".to_string(),
///     timeout_secs: Some(30),
/// };
///
/// let client = build_http_client(&config).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder()
        .user_agent(config.user_agent.as_str())
        .gzip(true)
        .brotli(true);

    if let Some(secs) = config.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }

    builder.build()
}

/// Fetches a page and reads its whole body
///
/// No retries. A non-success status is not an error here: the body is still
/// returned so the caller can extract whatever the server sent.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The page URL
///
/// # Returns
///
/// * `Ok(FetchedPage)` - The response was received and drained
/// * `Err(SieveError::Transport)` - Connection, DNS, timeout or body read failure
pub async fn fetch_page(client: &Client, url: &Url) -> Result<FetchedPage, SieveError> {
    let transport = |source| SieveError::Transport {
        url: url.to_string(),
        source,
    };

    let response = client.get(url.clone()).send().await.map_err(transport)?;

    let status = response.status();
    let final_url = response.url().clone();

    if !status.is_success() {
        tracing::warn!("Page {} returned HTTP {}", url, status.as_u16());
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let body = response.text().await.map_err(transport)?;

    Ok(FetchedPage {
        final_url,
        status_code: status.as_u16(),
        content_type,
        body,
    })
}

/// Short description of a transport failure for logs and reports
pub fn describe_transport_error(err: &reqwest::Error) -> &'static str {
    if err.is_timeout() {
        "Request timeout"
    } else if err.is_connect() {
        "Connection failed"
    } else if err.is_body() || err.is_decode() {
        "Failed to read response body"
    } else if err.is_redirect() {
        "Redirect error"
    } else {
        "Request failed"
    }
}
