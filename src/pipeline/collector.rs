//! Fan-out of scrape workers and fan-in of their results
//!
//! The supervisor task owns the scrape stage: it spawns one worker per
//! target, joins every one of them and only then drops its sender, which
//! closes the completion channel. The collector drains that channel and hands
//! each result to its own persistence task.

use crate::config::OutputConfig;
use crate::model::{ScrapeResult, ScrapeTarget};
use crate::output::{download_images, persist_result, DownloadSummary, ResultOutcome, TargetFailure};
use crate::pipeline::worker::run_worker;
use reqwest::Client;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::{JoinHandle, JoinSet};

/// Spawns the scrape stage and returns its supervisor
///
/// The supervisor resolves to the targets that produced no result.
pub fn spawn_scrape_stage(
    client: Client,
    targets: Vec<ScrapeTarget>,
    results: mpsc::Sender<ScrapeResult>,
) -> JoinHandle<Vec<TargetFailure>> {
    tokio::spawn(async move {
        let mut workers = JoinSet::new();
        for target in targets {
            workers.spawn(run_worker(client.clone(), target, results.clone()));
        }

        let mut failures = Vec::new();
        while let Some(joined) = workers.join_next().await {
            match joined {
                Ok(Ok(())) => {}
                Ok(Err(failure)) => failures.push(failure),
                Err(e) => tracing::error!("Scrape worker failed: {}", e),
            }
        }

        tracing::debug!("All scrape workers finished, closing the result stream");
        drop(results);

        failures
    })
}

/// Drains the completion channel until it closes
///
/// Every received result gets its own task; all of them are joined before
/// this returns.
pub async fn collect_results(
    mut results: mpsc::Receiver<ScrapeResult>,
    client: Client,
    output: Arc<OutputConfig>,
) -> Vec<ResultOutcome> {
    let mut handlers = JoinSet::new();

    while let Some(result) = results.recv().await {
        tracing::debug!("Collected result for {}", result.url);
        let client = client.clone();
        let output = Arc::clone(&output);
        handlers.spawn(async move { handle_result(&client, result, &output).await });
    }

    let mut outcomes = Vec::with_capacity(handlers.len());
    while let Some(joined) = handlers.join_next().await {
        match joined {
            Ok(outcome) => outcomes.push(outcome),
            Err(e) => tracing::error!("Result handler failed: {}", e),
        }
    }

    outcomes
}

/// Persists one result and, if enabled, downloads its images
///
/// Images are only fetched once the result file exists.
pub async fn handle_result(
    client: &Client,
    result: ScrapeResult,
    output: &OutputConfig,
) -> ResultOutcome {
    let url = result.url.clone();
    let format = output.format;
    let results_dir = output.results_dir.clone();

    let persisted = tokio::task::spawn_blocking(move || {
        let location = persist_result(&result, format, &results_dir);
        (result, location)
    })
    .await;

    let (result, location) = match persisted {
        Ok((result, Ok(location))) => (result, location),
        Ok((_, Err(e))) => {
            tracing::warn!("Error saving the scrape result for {}: {}", url, e);
            return ResultOutcome {
                url,
                file: None,
                error: Some(e.to_string()),
                images: DownloadSummary::default(),
            };
        }
        Err(e) => {
            tracing::error!("Persistence task for {} failed: {}", url, e);
            return ResultOutcome {
                url,
                file: None,
                error: Some(e.to_string()),
                images: DownloadSummary::default(),
            };
        }
    };

    let images = if output.download_images {
        download_images(client, &result.image_urls, &location.images_dir()).await
    } else {
        DownloadSummary::default()
    };

    ResultOutcome {
        url,
        file: Some(location.file_path),
        error: None,
        images,
    }
}
