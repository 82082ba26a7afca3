//! Concurrent image downloads for persisted results

use crate::url::{image_file_name, split_extension};
use reqwest::Client;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::task::JoinSet;
use url::Url;

/// Errors that abort a single image download
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("Invalid image URL {url}: {source}")]
    InvalidUrl { url: String, source: url::ParseError },

    #[error("HTTP error for {url}: {source}")]
    Transport { url: String, source: reqwest::Error },

    #[error("Unexpected status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Counts of finished image downloads for one result
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DownloadSummary {
    pub saved: usize,
    pub failed: usize,
}

/// Downloads every image of a result into `images_dir`
///
/// One task is spawned per image and all of them are joined before this
/// returns. A failed image is logged and counted; it never affects its
/// siblings.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `image_urls` - Confirmed image URLs of one result
/// * `images_dir` - Destination folder, created if missing
pub async fn download_images(
    client: &Client,
    image_urls: &[String],
    images_dir: &Path,
) -> DownloadSummary {
    let mut summary = DownloadSummary::default();
    if image_urls.is_empty() {
        return summary;
    }

    if let Err(e) = tokio::fs::create_dir_all(images_dir).await {
        tracing::warn!(
            "Error creating the images directory {}: {}",
            images_dir.display(),
            e
        );
        summary.failed = image_urls.len();
        return summary;
    }

    let mut used_names = HashSet::new();
    let mut downloads = JoinSet::new();

    for image_url in image_urls {
        let name = match Url::parse(image_url) {
            Ok(url) => unique_name(image_file_name(&url), &mut used_names),
            Err(source) => {
                let err = DownloadError::InvalidUrl {
                    url: image_url.clone(),
                    source,
                };
                tracing::warn!("Error downloading the image: {}", err);
                summary.failed += 1;
                continue;
            }
        };

        let client = client.clone();
        let image_url = image_url.clone();
        let destination = images_dir.join(name);

        downloads.spawn(async move { download_image(&client, &image_url, &destination).await });
    }

    while let Some(joined) = downloads.join_next().await {
        match joined {
            Ok(Ok(path)) => {
                tracing::debug!("Saved image to {}", path.display());
                summary.saved += 1;
            }
            Ok(Err(e)) => {
                tracing::warn!("Error downloading the image: {}", e);
                summary.failed += 1;
            }
            Err(e) => {
                tracing::error!("Image download task failed: {}", e);
                summary.failed += 1;
            }
        }
    }

    tracing::info!(
        "Scrape result images saved to folder: {} ({} saved, {} failed)",
        images_dir.display(),
        summary.saved,
        summary.failed
    );

    summary
}

/// Fetches one image and streams it to `destination`
///
/// A partially written file is removed when the transfer fails midway.
pub async fn download_image(
    client: &Client,
    image_url: &str,
    destination: &Path,
) -> Result<PathBuf, DownloadError> {
    let transport = |source| DownloadError::Transport {
        url: image_url.to_string(),
        source,
    };

    let mut response = client.get(image_url).send().await.map_err(transport)?;

    let status = response.status();
    if !status.is_success() {
        return Err(DownloadError::Status {
            url: image_url.to_string(),
            status: status.as_u16(),
        });
    }

    let write_error = |source| DownloadError::Write {
        path: destination.to_path_buf(),
        source,
    };

    let mut file = tokio::fs::File::create(destination)
        .await
        .map_err(write_error)?;

    let copied: Result<(), DownloadError> = async {
        while let Some(chunk) = response.chunk().await.map_err(transport)? {
            file.write_all(&chunk).await.map_err(write_error)?;
        }
        file.flush().await.map_err(write_error)
    }
    .await;

    if let Err(e) = copied {
        drop(file);
        let _ = tokio::fs::remove_file(destination).await;
        return Err(e);
    }

    Ok(destination.to_path_buf())
}

/// Makes an image file name unique within one result's folder
///
/// Two URLs ending in the same file name would otherwise race on one file.
fn unique_name(name: String, used: &mut HashSet<String>) -> String {
    if used.insert(name.clone()) {
        return name;
    }

    let (stem, extension) = split_extension(&name);
    let mut counter = 2;
    loop {
        let candidate = format!("{}-{}{}", stem, counter, extension);
        if used.insert(candidate.clone()) {
            return candidate;
        }
        counter += 1;
    }
}
