//! Output module for persisting scrape results
//!
//! This module handles:
//! - Deriving the per-site file layout under the results directory
//! - Encoding results as plain text, CSV, JSON or XML
//! - Downloading confirmed images next to each result file
//! - Summarizing a finished run

mod downloader;
mod encoders;
mod persister;
pub mod report;

pub use downloader::{download_image, download_images, DownloadError, DownloadSummary};
pub use encoders::{
    parse_xml_result, CsvEncoder, JsonEncoder, ResultEncoder, TextEncoder, XmlEncoder,
};
pub use persister::{persist_result, ResultLocation};
pub use report::{print_report, ResultOutcome, RunReport, TargetFailure};

use serde::{Deserialize, Deserializer};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while persisting a result
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Invalid result URL {url}: {source}")]
    InvalidUrl { url: String, source: url::ParseError },

    #[error("Result URL has no host: {0}")]
    MissingHost(String),

    #[error("Failed to create directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to create file {}: {source}", .path.display())]
    CreateFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to encode result as {format}: {message}")]
    Encode {
        format: OutputFormat,
        message: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Supported result file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputFormat {
    /// Labeled plain-text block
    #[default]
    Txt,
    /// Header row plus one row per image URL
    Csv,
    /// Object with a nested image URL list
    Json,
    /// Document with a wrapped image URL list
    Xml,
}

impl OutputFormat {
    /// Resolves a format name, falling back to plain text
    ///
    /// Names are case-insensitive. An unknown name is logged and treated as
    /// `txt`, so the result is still written somewhere readable.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "" | "txt" => Self::Txt,
            "csv" => Self::Csv,
            "json" => Self::Json,
            "xml" => Self::Xml,
            other => {
                tracing::warn!("Unknown output format '{}', falling back to txt", other);
                Self::Txt
            }
        }
    }

    /// File extension (without the dot) for this format
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Txt => "txt",
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Xml => "xml",
        }
    }

    /// Returns the encoder that writes this format
    pub fn encoder(&self) -> &'static dyn ResultEncoder {
        match self {
            Self::Txt => &TextEncoder,
            Self::Csv => &CsvEncoder,
            Self::Json => &JsonEncoder,
            Self::Xml => &XmlEncoder,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl<'de> Deserialize<'de> for OutputFormat {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        Ok(Self::from_name(&name))
    }
}
