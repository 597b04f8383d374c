//! Wire models for the collection API
//!
//! Only the fields the gallery and detail views consume are modelled.
//! Everything except `id` is optional on the wire: the collection has many
//! records with null titles, missing images, or no artist attribution.

use serde::{Deserialize, Deserializer, Serialize};

/// Fields requested from the API (keeps list payloads small)
pub const ARTWORK_FIELDS: &str = "id,title,artist_title,image_id,date_display,medium_display,\
dimensions,credit_line,place_of_origin,department_title,term_titles";

/// Maximum title length shown in a gallery cell before truncation
pub const TITLE_MAX_CHARS: usize = 30;

/// Stable record identifier assigned by the collection
pub type ArtworkId = u64;

/// A single artwork record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artwork {
    pub id: ArtworkId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub artist_title: Option<String>,
    #[serde(default)]
    pub image_id: Option<String>,
    #[serde(default)]
    pub date_display: Option<String>,
    #[serde(default)]
    pub medium_display: Option<String>,
    #[serde(default)]
    pub dimensions: Option<String>,
    #[serde(default)]
    pub credit_line: Option<String>,
    #[serde(default)]
    pub place_of_origin: Option<String>,
    #[serde(default)]
    pub department_title: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub term_titles: Vec<String>,
}

impl Artwork {
    /// Image reference, if present and non-empty
    pub fn image_ref(&self) -> Option<&str> {
        self.image_id.as_deref().filter(|id| !id.is_empty())
    }

    /// Whether this record can be displayed in the gallery
    pub fn has_image(&self) -> bool {
        self.image_ref().is_some()
    }

    /// Title for a gallery cell: truncated with "..." past 30 chars, "Untitled" when absent
    pub fn display_title(&self) -> String {
        match self.title.as_deref().filter(|t| !t.is_empty()) {
            Some(title) if title.chars().count() > TITLE_MAX_CHARS => {
                let truncated: String = title.chars().take(TITLE_MAX_CHARS).collect();
                format!("{}...", truncated)
            }
            Some(title) => title.to_string(),
            None => "Untitled".to_string(),
        }
    }

    /// Full title, "Untitled" when absent
    pub fn full_title(&self) -> &str {
        self.title
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or("Untitled")
    }

    /// Artist line, "Unknown artist" when absent
    pub fn display_artist(&self) -> &str {
        self.artist_title
            .as_deref()
            .filter(|a| !a.is_empty())
            .unwrap_or("Unknown artist")
    }

    /// Labelled detail fields in display order, skipping the absent ones
    pub fn detail_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = Vec::new();
        let mut push = |label: &'static str, value: &Option<String>| {
            if let Some(v) = value.as_deref().filter(|v| !v.is_empty()) {
                fields.push((label, v.to_string()));
            }
        };

        push("Date", &self.date_display);
        push("Medium", &self.medium_display);
        push("Dimensions", &self.dimensions);
        push("Credit Line", &self.credit_line);
        push("Place of Origin", &self.place_of_origin);
        push("Department", &self.department_title);

        if !self.term_titles.is_empty() {
            fields.push(("Terms", self.term_titles.join(", ")));
        }

        fields
    }
}

/// Pagination block of a listing response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u32,
}

impl Pagination {
    /// Whether the source reports no pages after this one
    pub fn is_last(&self) -> bool {
        self.current_page >= self.total_pages
    }
}

/// One page of the paginated listing endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtworkPage {
    pub data: Vec<Artwork>,
    pub pagination: Pagination,
}

/// Single-record endpoint envelope (`data` may be null)
#[derive(Debug, Clone, Deserialize)]
pub struct ArtworkEnvelope {
    #[serde(default)]
    pub data: Option<Artwork>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}
