//! End-of-run summary
//!
//! Failures are never retried or re-raised; they are only collected here so
//! the user can see which targets produced no output.

use crate::output::DownloadSummary;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// A target that produced no result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetFailure {
    /// The target URL as submitted
    pub url: String,

    /// Why the target was dropped
    pub reason: String,
}

/// What happened to one emitted result in the persistence stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultOutcome {
    /// The result's URL
    pub url: String,

    /// Result file path, if it was written
    pub file: Option<PathBuf>,

    /// Persistence error, if it was not
    pub error: Option<String>,

    /// Image download counts (zero when downloads are disabled)
    pub images: DownloadSummary,
}

/// Summary of a complete pipeline run
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    /// Number of targets handed to the scrape stage
    pub targets_submitted: usize,

    /// Targets dropped in the scrape stage
    pub target_failures: Vec<TargetFailure>,

    /// One entry per result received by the collector
    pub outcomes: Vec<ResultOutcome>,

    /// Wall-clock time of the run
    pub elapsed: Duration,
}

impl RunReport {
    /// Number of results that made it through the completion channel
    pub fn results_emitted(&self) -> usize {
        self.outcomes.len()
    }

    /// Paths of all result files written
    pub fn files_written(&self) -> Vec<&Path> {
        self.outcomes
            .iter()
            .filter_map(|outcome| outcome.file.as_deref())
            .collect()
    }

    /// Results that were emitted but could not be written
    pub fn persist_failures(&self) -> Vec<TargetFailure> {
        self.outcomes
            .iter()
            .filter_map(|outcome| {
                outcome.error.as_ref().map(|reason| TargetFailure {
                    url: outcome.url.clone(),
                    reason: reason.clone(),
                })
            })
            .collect()
    }

    pub fn images_saved(&self) -> usize {
        self.outcomes.iter().map(|o| o.images.saved).sum()
    }

    pub fn images_failed(&self) -> usize {
        self.outcomes.iter().map(|o| o.images.failed).sum()
    }

    /// True when every target ended up with a result file
    pub fn is_complete(&self) -> bool {
        self.target_failures.is_empty()
            && self.files_written().len() == self.targets_submitted
    }
}

/// Prints a run report to stdout in a formatted manner
///
/// # Arguments
///
/// * `report` - The report to display
pub fn print_report(report: &RunReport) {
    println!("=== Scrape Summary ===\n");

    println!("Overview:");
    println!("  Targets submitted: {}", report.targets_submitted);
    println!("  Results emitted: {}", report.results_emitted());
    println!("  Files written: {}", report.files_written().len());
    println!(
        "  Images downloaded: {} ({} failed)",
        report.images_saved(),
        report.images_failed()
    );
    println!("  Elapsed: {:.2}s", report.elapsed.as_secs_f64());
    println!();

    if !report.target_failures.is_empty() {
        println!("Dropped Targets ({}):", report.target_failures.len());
        for failure in &report.target_failures {
            println!("  - {}: {}", failure.url, failure.reason);
        }
        println!();
    }

    let persist_failures = report.persist_failures();
    if !persist_failures.is_empty() {
        println!("Unwritten Results ({}):", persist_failures.len());
        for failure in &persist_failures {
            println!("  - {}: {}", failure.url, failure.reason);
        }
        println!();
    }

    let success_rate = if report.targets_submitted > 0 {
        (report.files_written().len() as f64 / report.targets_submitted as f64) * 100.0
    } else {
        0.0
    };

    println!(
        "Success Rate: {:.1}% ({} / {} targets written)",
        success_rate,
        report.files_written().len(),
        report.targets_submitted
    );
}
