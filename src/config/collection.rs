//! Collection API and gallery configuration
//!
//! - Api: endpoint, image template, image widths, request timeout
//! - Gallery: page size for the incremental loader

use serde::Deserialize;

use crate::api::image::{DEFAULT_IMAGE_URL, DEFAULT_IMAGE_WIDTH};

/// Default collection endpoint
pub const DEFAULT_API_URL: &str = "https://api.artic.edu/api/v1";

// ─────────────────────────────────────────────────────────────────────────────
// API Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Remote collection endpoints
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    /// Base URL of the collection API (without trailing slash)
    pub api_url: String,
    /// Image URL template with `{image_id}` and `{width}` placeholders
    pub image_url: String,
    /// Width substituted into links and clipboard copies
    pub image_width: u32,
    /// Width requested for the terminal preview (smaller = faster)
    pub preview_width: u32,
    /// Per-request timeout
    pub request_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            image_url: DEFAULT_IMAGE_URL.to_string(),
            image_width: DEFAULT_IMAGE_WIDTH,
            preview_width: 200,
            request_timeout_secs: 15,
        }
    }
}

/// API settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileApi {
    pub api_url: Option<String>,
    pub image_url: Option<String>,
    pub image_width: Option<u32>,
    pub preview_width: Option<u32>,
    pub request_timeout_secs: Option<u64>,
}

impl ApiConfig {
    /// Create from file config with defaults
    pub fn from_file(file: Option<FileApi>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            api_url: file.api_url.unwrap_or(defaults.api_url),
            image_url: file.image_url.unwrap_or(defaults.image_url),
            image_width: file.image_width.unwrap_or(defaults.image_width),
            preview_width: file.preview_width.unwrap_or(defaults.preview_width),
            request_timeout_secs: file
                .request_timeout_secs
                .unwrap_or(defaults.request_timeout_secs),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Gallery Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Gallery loader settings
#[derive(Debug, Clone, PartialEq)]
pub struct GalleryConfig {
    /// Records requested per page
    pub page_size: u32,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self { page_size: 12 }
    }
}

/// Gallery settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileGallery {
    pub page_size: Option<u32>,
}

impl GalleryConfig {
    /// Create from file config with defaults (page size is at least 1)
    pub fn from_file(file: Option<FileGallery>) -> Self {
        let file = file.unwrap_or_default();

        Self {
            page_size: file
                .page_size
                .filter(|&n| n > 0)
                .unwrap_or(Self::default().page_size),
        }
    }
}
