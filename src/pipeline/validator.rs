//! Header-only image validation
//!
//! A candidate is confirmed when a HEAD request succeeds with a 2xx status
//! and an allow-listed `Content-Type`. Everything else is a rejection, which
//! is a classification outcome and never an error of the containing worker.

use reqwest::Client;
use std::fmt;

/// Content types accepted as images, matched exactly
pub const ALLOWED_IMAGE_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/gif"];

/// Why a candidate was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    /// The HEAD request failed outright
    Transport(String),

    /// The status was outside 200..300
    Status(u16),

    /// The content type was missing or not allow-listed
    ContentType(Option<String>),
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(error) => write!(f, "request failed: {}", error),
            Self::Status(status) => write!(f, "HTTP {}", status),
            Self::ContentType(Some(content_type)) => {
                write!(f, "not an image (content type '{}')", content_type)
            }
            Self::ContentType(None) => write!(f, "not an image (no content type)"),
        }
    }
}

/// Result of validating one image candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageCheck {
    Confirmed,
    Rejected(RejectReason),
}

impl ImageCheck {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, Self::Confirmed)
    }
}

/// Classifies a HEAD response by status and declared content type
///
/// # Examples
///
/// ```
/// use sumi_sieve::pipeline::{classify_response, ImageCheck, RejectReason};
///
/// assert_eq!(classify_response(200, Some("image/png")), ImageCheck::Confirmed);
/// assert_eq!(
///     classify_response(404, Some("image/png")),
///     ImageCheck::Rejected(RejectReason::Status(404))
/// );
/// ```
pub fn classify_response(status: u16, content_type: Option<&str>) -> ImageCheck {
    if !(200..300).contains(&status) {
        return ImageCheck::Rejected(RejectReason::Status(status));
    }

    match content_type {
        Some(ct) if ALLOWED_IMAGE_TYPES.contains(&ct) => ImageCheck::Confirmed,
        other => ImageCheck::Rejected(RejectReason::ContentType(other.map(str::to_string))),
    }
}

/// Validates an image URL with a HEAD request
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `image_url` - Absolute URL of the candidate
pub async fn validate_image(client: &Client, image_url: &str) -> ImageCheck {
    let response = match client.head(image_url).send().await {
        Ok(response) => response,
        Err(e) => return ImageCheck::Rejected(RejectReason::Transport(e.to_string())),
    };

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());

    classify_response(response.status().as_u16(), content_type)
}
