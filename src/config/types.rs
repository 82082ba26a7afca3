use crate::input::TargetSet;
use crate::model::ScrapeTarget;
use crate::output::OutputFormat;
use crate::ConfigError;
use serde::Deserialize;
use std::path::PathBuf;

/// Default directory that receives all result files
pub const DEFAULT_RESULTS_DIR: &str = "scrape-results";

/// Main configuration structure for Sumi-Sieve
///
/// Every section is optional; a missing file behaves like an empty one.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default, rename = "target")]
    pub targets: Vec<TargetEntry>,
}

/// Where and how results are written
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Root directory for per-site result folders
    #[serde(rename = "results-dir", default = "default_results_dir")]
    pub results_dir: PathBuf,

    /// Result file format
    #[serde(default)]
    pub format: OutputFormat,

    /// Download confirmed images next to each result file
    #[serde(rename = "download-images", default)]
    pub download_images: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            results_dir: default_results_dir(),
            format: OutputFormat::default(),
            download_images: false,
        }
    }
}

fn default_results_dir() -> PathBuf {
    PathBuf::from(DEFAULT_RESULTS_DIR)
}

/// HTTP client settings
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout in seconds (transport default when unset)
    #[serde(rename = "timeout-secs", default)]
    pub timeout_secs: Option<u64>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: None,
        }
    }
}

fn default_user_agent() -> String {
    format!("sumi-sieve/{}", env!("CARGO_PKG_VERSION"))
}

/// A scrape target as written in the config file
#[derive(Debug, Clone, Deserialize)]
pub struct TargetEntry {
    pub url: String,
    pub selector: String,
}

/// Command-line values that take precedence over the config file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub format: Option<String>,
    pub download_images: Option<bool>,
    pub results_dir: Option<PathBuf>,
}

impl Config {
    /// Applies command-line overrides on top of the loaded file
    ///
    /// Unset overrides keep whatever the file says.
    pub fn apply_overrides(&mut self, overrides: &Overrides) {
        if let Some(name) = &overrides.format {
            self.output.format = OutputFormat::from_name(name);
        }
        if let Some(download_images) = overrides.download_images {
            self.output.download_images = download_images;
        }
        if let Some(dir) = &overrides.results_dir {
            self.output.results_dir = dir.clone();
        }
    }

    /// Builds the deduplicated target list from the `[[target]]` entries
    pub fn scrape_targets(&self) -> Result<Vec<ScrapeTarget>, ConfigError> {
        let mut set = TargetSet::new();
        for entry in &self.targets {
            let target = ScrapeTarget::new(&entry.url, entry.selector.trim()).map_err(|e| {
                ConfigError::InvalidUrl(format!("Invalid target URL '{}': {}", entry.url, e))
            })?;
            set.insert(target);
        }
        Ok(set.into_targets())
    }
}
