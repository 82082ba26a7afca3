//! Writes scrape results to per-site files

use crate::model::ScrapeResult;
use crate::output::{OutputError, OutputFormat, OutputResult};
use crate::url::{file_stem, site_folder_name};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use url::Url;

/// Where one result lives on disk
///
/// ```text
/// <base_dir>/<site-folder>/<file-stem>.<ext>
/// <base_dir>/<site-folder>/<file-stem>/      (downloaded images)
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultLocation {
    /// Per-site folder under the results directory
    pub site_dir: PathBuf,

    /// File name without extension, also used for the image folder
    pub file_stem: String,

    /// Full path of the result file
    pub file_path: PathBuf,
}

impl ResultLocation {
    /// Derives the location for a URL without touching the filesystem
    pub fn for_url(url: &Url, format: OutputFormat, base_dir: &Path) -> OutputResult<Self> {
        let folder =
            site_folder_name(url).ok_or_else(|| OutputError::MissingHost(url.to_string()))?;
        let stem = file_stem(url);

        let site_dir = base_dir.join(folder);
        let file_path = site_dir.join(format!("{}.{}", stem, format.extension()));

        Ok(Self {
            site_dir,
            file_stem: stem,
            file_path,
        })
    }

    /// Derives the location for a result from its recorded URL
    pub fn for_result(
        result: &ScrapeResult,
        format: OutputFormat,
        base_dir: &Path,
    ) -> OutputResult<Self> {
        let url = Url::parse(&result.url).map_err(|source| OutputError::InvalidUrl {
            url: result.url.clone(),
            source,
        })?;
        Self::for_url(&url, format, base_dir)
    }

    /// Folder that receives this result's downloaded images
    pub fn images_dir(&self) -> PathBuf {
        self.site_dir.join(&self.file_stem)
    }
}

/// Persists a result to its per-site file
///
/// Missing parent directories are created first. An existing file is
/// truncated and rewritten, so persisting the same result twice leaves the
/// same content behind.
///
/// # Arguments
///
/// * `result` - The result to write
/// * `format` - Output file format
/// * `base_dir` - The results directory
///
/// # Returns
///
/// * `Ok(ResultLocation)` - Where the result was written
/// * `Err(OutputError)` - Directory creation, file creation or encoding failed
pub fn persist_result(
    result: &ScrapeResult,
    format: OutputFormat,
    base_dir: &Path,
) -> OutputResult<ResultLocation> {
    let location = ResultLocation::for_result(result, format, base_dir)?;

    fs::create_dir_all(&location.site_dir).map_err(|source| OutputError::CreateDir {
        path: location.site_dir.clone(),
        source,
    })?;

    let file = File::create(&location.file_path).map_err(|source| OutputError::CreateFile {
        path: location.file_path.clone(),
        source,
    })?;

    let mut writer = BufWriter::new(file);
    format.encoder().encode(result, &mut writer)?;
    writer.flush()?;

    tracing::info!(
        "Scrape result saved to file: {}",
        location.file_path.display()
    );

    Ok(location)
}
