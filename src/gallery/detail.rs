//! Detail fetch for a single artwork
//!
//! Stateless request/render pair: each mount issues one fresh request and
//! lands in exactly one of Loading, Error, NotFound or Ready. A 404 or an
//! undecodable body is an Error; only a successful response with a null
//! record is NotFound.
//!
//! Completions carry the sequence number of the mount that issued them.
//! When the view has been closed or replaced, the completion is dropped
//! instead of updating a discarded view.

use crate::api::image::Preview;
use crate::api::models::{Artwork, ArtworkId};
use crate::api::FetchError;

/// Render state of the detail view
#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    Loading,
    Error(String),
    NotFound,
    Ready(Box<Artwork>),
}

impl DetailState {
    /// Map a fetch result onto the three terminal states
    pub fn from_result(result: Result<Option<Artwork>, FetchError>) -> Self {
        match result {
            Ok(Some(artwork)) => Self::Ready(Box::new(artwork)),
            Ok(None) => Self::NotFound,
            Err(e) => Self::Error(e.to_string()),
        }
    }
}

/// Image preview state, tracked separately from the record
#[derive(Debug, Clone, Default)]
pub enum PreviewState {
    /// Record not loaded yet
    #[default]
    Pending,
    Loading,
    Ready(Preview),
    /// No image reference, or the image failed to load (placeholder shown)
    Unavailable,
}

/// One mounted detail view
#[derive(Debug, Clone)]
pub struct DetailView {
    pub id: ArtworkId,
    seq: u64,
    state: DetailState,
    preview: PreviewState,
}

impl DetailView {
    /// Mount a view for `id`; starts Loading
    pub fn mount(id: ArtworkId, seq: u64) -> Self {
        Self {
            id,
            seq,
            state: DetailState::Loading,
            preview: PreviewState::Pending,
        }
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    pub fn preview(&self) -> &PreviewState {
        &self.preview
    }

    pub fn artwork(&self) -> Option<&Artwork> {
        match &self.state {
            DetailState::Ready(artwork) => Some(artwork),
            _ => None,
        }
    }

    /// Apply the record fetch; returns false if it belongs to another mount
    pub fn complete(&mut self, seq: u64, result: Result<Option<Artwork>, FetchError>) -> bool {
        if seq != self.seq || self.state != DetailState::Loading {
            return false;
        }

        self.state = DetailState::from_result(result);
        if let DetailState::Error(msg) = &self.state {
            tracing::warn!("Failed to load artwork {}: {}", self.id, msg);
        }
        true
    }

    /// Image reference to fetch next, moving the preview to Loading
    ///
    /// Records without an image go straight to the placeholder.
    pub fn begin_preview(&mut self) -> Option<String> {
        if !matches!(self.preview, PreviewState::Pending) {
            return None;
        }

        let image_id = self.artwork()?.image_ref().map(str::to_string);
        self.preview = match image_id {
            Some(_) => PreviewState::Loading,
            None => PreviewState::Unavailable,
        };
        image_id
    }

    /// Apply the image fetch; failures fall back to the placeholder
    pub fn complete_preview(&mut self, seq: u64, result: Result<Preview, FetchError>) -> bool {
        if seq != self.seq || !matches!(self.preview, PreviewState::Loading) {
            return false;
        }

        self.preview = match result {
            Ok(preview) => PreviewState::Ready(preview),
            Err(e) => {
                tracing::debug!("Image for artwork {} unavailable: {}", self.id, e);
                PreviewState::Unavailable
            }
        };
        true
    }
}

/// Plain-text rendering of a record (clipboard and headless output)
pub fn describe(artwork: &Artwork, image_url: Option<&str>) -> String {
    let mut out = format!("{}\n", artwork.full_title());

    if let Some(artist) = artwork.artist_title.as_deref().filter(|a| !a.is_empty()) {
        out.push_str(&format!("Various works by {}\n", artist));
    }

    out.push('\n');
    for (label, value) in artwork.detail_fields() {
        out.push_str(&format!("{}: {}\n", label, value));
    }

    match image_url {
        Some(url) => out.push_str(&format!("Image: {}\n", url)),
        None => out.push_str("Image not available\n"),
    }

    out.push_str(&format!("Id: {}\n", artwork.id));
    out
}
