//! Sumi-Sieve: a concurrent image scraper
//!
//! This crate fetches a set of pages, picks out the elements matching a selector
//! on each page, keeps the image sources that really point at images, and writes
//! one result file per site (optionally downloading the images next to it).

pub mod config;
pub mod input;
pub mod model;
pub mod output;
pub mod pipeline;
pub mod url;

use thiserror::Error;

/// Main error type for Sumi-Sieve operations
#[derive(Debug, Error)]
pub enum SieveError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Transport { url: String, source: reqwest::Error },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Failed to create results directory {path}: {source}")]
    ResultsDir {
        path: String,
        source: std::io::Error,
    },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Errors raised while reading scrape targets
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("Empty input line")]
    Empty,

    #[error("Missing selector after URL '{0}'")]
    MissingSelector(String),

    #[error("Failed to parse URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL '{0}'")]
    MissingHost(String),
}

/// Result type alias for Sumi-Sieve operations
pub type Result<T> = std::result::Result<T, SieveError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for target parsing
pub type InputResult<T> = std::result::Result<T, InputError>;

// Re-export commonly used types
pub use config::Config;
pub use model::{ScrapeResult, ScrapeTarget};
pub use output::OutputFormat;
pub use pipeline::{run_scrape, Pipeline};
