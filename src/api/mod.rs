// API module - HTTP collaborators for the museum collection
//
// Three remote endpoints are consumed:
// - Paginated listing: GET {api_url}/artworks?page=N&limit=M
// - Single record:     GET {api_url}/artworks/{id}
// - Image service:     templated IIIF URL built from an image_id
//
// Every failure (transport, non-2xx, undecodable body) surfaces as a
// FetchError. Callers collapse it into a message string; nothing here
// retries or caches.

pub mod image;
pub mod models;

use crate::config::ApiConfig;
use anyhow::{Context, Result};
use models::{Artwork, ArtworkEnvelope, ArtworkId, ArtworkPage, ARTWORK_FIELDS};
use serde::de::DeserializeOwned;
use std::fmt;
use std::future::Future;
use std::time::Duration;

/// Errors that can occur while talking to the collection API
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Request never produced a response (DNS, connect, timeout, body read)
    Network(String),
    /// Server answered with a non-2xx status
    Status(u16),
    /// Body was not the JSON (or image) we expected
    Decode(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(msg) => write!(f, "Network error: {}", msg),
            Self::Status(code) => write!(f, "Request failed with HTTP status {}", code),
            Self::Decode(msg) => write!(f, "Failed to decode response: {}", msg),
        }
    }
}

impl std::error::Error for FetchError {}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) => Self::Status(status.as_u16()),
            None => Self::Network(e.to_string()),
        }
    }
}

/// Source of paginated collection pages
///
/// The gallery loader only needs this one operation, which keeps it
/// testable against an in-memory source.
pub trait CollectionSource {
    fn fetch_page(
        &self,
        page: u32,
        limit: u32,
    ) -> impl Future<Output = Result<ArtworkPage, FetchError>> + Send;
}

/// Client for the collection API
///
/// Cheap to clone: reqwest::Client is reference counted internally, so
/// each background fetch task gets its own handle.
#[derive(Debug, Clone)]
pub struct ArticClient {
    client: reqwest::Client,
    base_url: String,
    image_url: String,
}

impl ArticClient {
    /// Build a client from API configuration
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(concat!("artic-tui/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            image_url: config.image_url.clone(),
        })
    }

    /// Fetch one page of the listing endpoint
    pub async fn list_artworks(&self, page: u32, limit: u32) -> Result<ArtworkPage, FetchError> {
        let url = format!("{}/artworks", self.base_url);
        let page_param = page.to_string();
        let limit_param = limit.to_string();

        tracing::debug!("GET {} page={} limit={}", url, page, limit);

        let request = self.client.get(&url).query(&[
            ("page", page_param.as_str()),
            ("limit", limit_param.as_str()),
            ("fields", ARTWORK_FIELDS),
        ]);

        self.get_json(request).await
    }

    /// Fetch a single record
    ///
    /// `Ok(None)` means the server answered 2xx with `"data": null`.
    /// A 404 is an error, not an absent record.
    pub async fn get_artwork(&self, id: ArtworkId) -> Result<Option<Artwork>, FetchError> {
        let url = format!("{}/artworks/{}", self.base_url, id);

        tracing::debug!("GET {}", url);

        let request = self.client.get(&url).query(&[("fields", ARTWORK_FIELDS)]);
        let envelope: ArtworkEnvelope = self.get_json(request).await?;
        Ok(envelope.data)
    }

    /// Fetch raw image bytes from the image service
    pub async fn get_image(&self, image_id: &str, width: u32) -> Result<Vec<u8>, FetchError> {
        let url = self.image_url(image_id, width);

        tracing::debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }

    /// Public image URL for an image reference
    pub fn image_url(&self, image_id: &str, width: u32) -> String {
        image::image_url(&self.image_url, image_id, width)
    }

    /// Send a request and decode a JSON body
    ///
    /// The body is read as bytes first so a bad payload is reported as
    /// a decode failure rather than a transport failure.
    async fn get_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, FetchError> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            tracing::warn!("Collection API returned {} for {}", status, response.url());
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| FetchError::Decode(e.to_string()))
    }
}

impl CollectionSource for ArticClient {
    fn fetch_page(
        &self,
        page: u32,
        limit: u32,
    ) -> impl Future<Output = Result<ArtworkPage, FetchError>> + Send {
        self.list_artworks(page, limit)
    }
}
