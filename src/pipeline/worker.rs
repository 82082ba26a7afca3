//! Per-target scrape worker
//!
//! A worker runs fetch → extract → validate for one target and emits at most
//! one result. Only a failed fetch aborts it; an extraction error degrades to
//! the partial page and rejected images are simply left out.

use crate::model::{ScrapeResult, ScrapeTarget};
use crate::output::TargetFailure;
use crate::pipeline::extractor::extract;
use crate::pipeline::fetcher::{describe_transport_error, fetch_page};
use crate::pipeline::validator::{validate_image, ImageCheck};
use crate::SieveError;
use reqwest::Client;
use tokio::sync::mpsc;

/// Scrapes one target into a result
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `target` - The target to scrape
///
/// # Returns
///
/// * `Ok(ScrapeResult)` - The page was fetched (extraction may have been partial)
/// * `Err(SieveError::Transport)` - The page could not be fetched
pub async fn scrape_target(
    client: &Client,
    target: &ScrapeTarget,
) -> Result<ScrapeResult, SieveError> {
    tracing::info!("Scraping the website: {}", target.raw_url());

    let page = fetch_page(client, target.url()).await?;
    tracing::debug!(
        "Fetched {} (HTTP {}, {})",
        page.final_url,
        page.status_code,
        page.content_type.as_deref().unwrap_or("no content type")
    );

    let parsed = match extract(&page.body, target.selector(), &page.final_url) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::warn!("Error parsing the html content of {}: {}", target.raw_url(), e);
            e.partial
        }
    };

    tracing::debug!(
        "Found {} image candidate(s) on {}",
        parsed.candidates.len(),
        target.raw_url()
    );

    let mut result = ScrapeResult::for_target(target, parsed.title);
    for candidate in parsed.candidates {
        match validate_image(client, &candidate).await {
            ImageCheck::Confirmed => result.image_urls.push(candidate),
            ImageCheck::Rejected(reason) => {
                tracing::info!("Image url {} rejected: {}", candidate, reason);
            }
        }
    }

    Ok(result)
}

/// Runs a worker and sends its result to the collector
///
/// The send waits for buffer space in the completion channel.
pub async fn run_worker(
    client: Client,
    target: ScrapeTarget,
    results: mpsc::Sender<ScrapeResult>,
) -> Result<(), TargetFailure> {
    let result = match scrape_target(&client, &target).await {
        Ok(result) => result,
        Err(e) => {
            tracing::warn!("Error fetching the website: {}", e);
            let reason = match &e {
                SieveError::Transport { source, .. } => {
                    format!("{}: {}", describe_transport_error(source), source)
                }
                other => other.to_string(),
            };
            return Err(TargetFailure {
                url: target.raw_url().to_string(),
                reason,
            });
        }
    };

    results.send(result).await.map_err(|_| TargetFailure {
        url: target.raw_url().to_string(),
        reason: "Result collector stopped before the result was delivered".to_string(),
    })
}
