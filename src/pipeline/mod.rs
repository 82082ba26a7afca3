//! Scrape pipeline
//!
//! This module contains the concurrent core, including:
//! - HTTP fetching of target pages
//! - Title and image candidate extraction
//! - Header-only image validation
//! - One worker task per target, fanned in through a completion channel
//! - One persistence task per result, with optional image downloads

mod collector;
mod extractor;
mod fetcher;
mod validator;
mod worker;

pub use collector::{collect_results, handle_result, spawn_scrape_stage};
pub use extractor::{extract, ExtractError, ParsedPage, IMAGE_SOURCE_ATTR};
pub use fetcher::{build_http_client, describe_transport_error, fetch_page, FetchedPage};
pub use validator::{classify_response, validate_image, ImageCheck, RejectReason, ALLOWED_IMAGE_TYPES};
pub use worker::{run_worker, scrape_target};

use crate::config::{Config, OutputConfig};
use crate::model::ScrapeTarget;
use crate::output::RunReport;
use crate::SieveError;
use reqwest::Client;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;

/// Capacity of the completion channel between workers and the collector
const RESULT_BUFFER: usize = 32;

/// Owns the shared HTTP client and output settings of a run
pub struct Pipeline {
    output: Arc<OutputConfig>,
    client: Client,
}

impl Pipeline {
    /// Creates a new pipeline instance
    ///
    /// # Returns
    ///
    /// * `Ok(Pipeline)` - Ready to run
    /// * `Err(SieveError)` - The HTTP client could not be built
    pub fn new(config: &Config) -> Result<Self, SieveError> {
        let client = build_http_client(&config.http)?;
        Ok(Self {
            output: Arc::new(config.output.clone()),
            client,
        })
    }

    /// Runs both stages for the given targets
    ///
    /// 1. Creates the results directory (failure aborts the run)
    /// 2. Spawns the supervised scrape stage
    /// 3. Collects, persists and optionally downloads every result
    /// 4. Joins the supervisor for the list of dropped targets
    pub async fn run(&self, targets: Vec<ScrapeTarget>) -> Result<RunReport, SieveError> {
        let start_time = Instant::now();
        let targets_submitted = targets.len();

        let results_dir = &self.output.results_dir;
        tokio::fs::create_dir_all(results_dir)
            .await
            .map_err(|source| SieveError::ResultsDir {
                path: results_dir.display().to_string(),
                source,
            })?;

        tracing::info!(
            "Scraping {} target(s) into {} as {}",
            targets_submitted,
            results_dir.display(),
            self.output.format
        );

        let (tx, rx) = mpsc::channel(RESULT_BUFFER);
        let supervisor = spawn_scrape_stage(self.client.clone(), targets, tx);

        let outcomes = collect_results(rx, self.client.clone(), Arc::clone(&self.output)).await;

        let target_failures = match supervisor.await {
            Ok(failures) => failures,
            Err(e) => {
                tracing::error!("Scrape supervisor failed: {}", e);
                Vec::new()
            }
        };

        let report = RunReport {
            targets_submitted,
            target_failures,
            outcomes,
            elapsed: start_time.elapsed(),
        };

        tracing::info!(
            "Scrape completed: {} result(s) from {} target(s) in {:?}",
            report.results_emitted(),
            report.targets_submitted,
            report.elapsed
        );

        Ok(report)
    }
}

/// Runs a complete scrape operation
///
/// # Example
///
/// ```no_run
/// use sumi_sieve::config::load_config;
/// use sumi_sieve::pipeline::run_scrape;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("sieve.toml"))?;
/// let targets = config.scrape_targets()?;
/// let report = run_scrape(&config, targets).await?;
/// println!("{} files written", report.files_written().len());
/// # Ok(())
/// # }
/// ```
pub async fn run_scrape(
    config: &Config,
    targets: Vec<ScrapeTarget>,
) -> Result<RunReport, SieveError> {
    Pipeline::new(config)?.run(targets).await
}
