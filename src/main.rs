//! Sumi-Sieve main entry point
//!
//! This is the command-line interface for the Sumi-Sieve image scraper.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use sumi_sieve::config::{load_config_with_hash, validate, Config, Overrides};
use sumi_sieve::input::{read_targets, Session};
use sumi_sieve::output::{print_report, ResultLocation};
use sumi_sieve::pipeline::Pipeline;
use sumi_sieve::ScrapeTarget;
use tracing_subscriber::EnvFilter;

/// Sumi-Sieve: a concurrent image scraper
///
/// Fetches every target page, keeps the image sources matched by the target's
/// selector that really serve an image, and writes one result file per page.
#[derive(Parser, Debug)]
#[command(name = "sumi-sieve")]
#[command(version)]
#[command(about = "A concurrent image scraper", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Result file format: txt, csv, json or xml
    #[arg(long, value_name = "FORMAT")]
    output_file_format: Option<String>,

    /// Download confirmed images next to each result file (true or false)
    #[arg(
        long,
        visible_alias = "download",
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    download_images: Option<bool>,

    /// Root directory for result files
    #[arg(long, value_name = "DIR")]
    results_dir: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Show the configuration and planned output files without scraping
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (cfg, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            cfg
        }
        None => Config::default(),
    };

    config.apply_overrides(&Overrides {
        format: cli.output_file_format.clone(),
        download_images: cli.download_images,
        results_dir: cli.results_dir.clone(),
    });
    validate(&config).context("Invalid command-line options")?;

    let targets = config.scrape_targets()?;
    let targets = if targets.is_empty() {
        match collect_interactive_targets().await? {
            Session::Start(targets) => targets,
            Session::Exit => return Ok(()),
        }
    } else {
        tracing::info!("Using {} target(s) from the configuration file", targets.len());
        targets
    };

    if cli.dry_run {
        return handle_dry_run(&config, &targets);
    }

    handle_scrape(&config, targets).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sumi_sieve=info,warn"),
            1 => EnvFilter::new("sumi_sieve=debug,info"),
            2 => EnvFilter::new("sumi_sieve=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Runs the line prompt on stdin without blocking the runtime
async fn collect_interactive_targets() -> anyhow::Result<Session> {
    let session = tokio::task::spawn_blocking(|| {
        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        read_targets(stdin.lock(), stdout.lock())
    })
    .await
    .context("Input task failed")?
    .context("Failed to read targets from standard input")?;

    Ok(session)
}

/// Handles the --dry-run mode: shows the effective settings and planned files
fn handle_dry_run(config: &Config, targets: &[ScrapeTarget]) -> anyhow::Result<()> {
    println!("=== Sumi-Sieve Dry Run ===\n");

    println!("Output:");
    println!("  Results directory: {}", config.output.results_dir.display());
    println!("  Format: {}", config.output.format);
    println!("  Download images: {}", config.output.download_images);

    println!("\nHTTP:");
    println!("  User agent: {}", config.http.user_agent);
    match config.http.timeout_secs {
        Some(secs) => println!("  Timeout: {}s", secs),
        None => println!("  Timeout: none"),
    }

    println!("\nTargets ({}):", targets.len());
    for target in targets {
        println!("  - {} [{}]", target.raw_url(), target.selector());
        match ResultLocation::for_url(target.url(), config.output.format, &config.output.results_dir)
        {
            Ok(location) => println!("    -> {}", location.file_path.display()),
            Err(e) => println!("    -> not writable: {}", e),
        }
    }

    println!("\n✓ Configuration is valid");
    println!("✓ Would start scraping {} target(s)", targets.len());

    Ok(())
}

/// Handles the main scrape operation
async fn handle_scrape(config: &Config, targets: Vec<ScrapeTarget>) -> anyhow::Result<()> {
    if targets.is_empty() {
        tracing::warn!("No targets to scrape");
    }

    let pipeline = Pipeline::new(config).context("Failed to set up the HTTP client")?;

    match pipeline.run(targets).await {
        Ok(report) => {
            print_report(&report);
            tracing::info!("Scrape completed successfully");
            Ok(())
        }
        Err(e) => {
            tracing::error!("Scrape failed: {}", e);
            Err(e.into())
        }
    }
}
