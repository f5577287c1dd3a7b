//! Metadata record types assembled from a scraped product page
//!
//! Every field is optional: a missing element on the page produces `None`
//! (or an empty list), never an error, so callers handle absence uniformly.

use serde::{Deserialize, Serialize};

/// Star rating on the site's fixed scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub value: f32,
    /// Maximum of the site's rating scale (5.00 for MGStage).
    pub max: f32,
}

impl Rating {
    pub fn new(value: f32, max: f32) -> Self {
        Self { value, max }
    }
}

/// A resolved artwork URL plus the cover-crop flag.
///
/// `crop_cover` marks a combined front/back case image that a downstream
/// image-processing step must crop to isolate the front cover. References are
/// created during extraction and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtworkRef {
    pub url: String,
    #[serde(rename = "cropCover")]
    pub crop_cover: bool,
}

impl ArtworkRef {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            crop_cover: false,
        }
    }

    pub fn with_crop(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            crop_cover: true,
        }
    }
}

/// Performer credit. MGStage lists names only, so role and thumbnail stay
/// blank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub name: String,
    pub role: Option<String>,
    pub thumb: Option<ArtworkRef>,
}

impl Actor {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: None,
            thumb: None,
        }
    }
}

/// One entry from a search listing page: the product URL plus whatever label
/// and thumbnail the listing carried.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub url: String,
    pub label: Option<String>,
    pub thumbnail: Option<ArtworkRef>,
}

impl SearchHit {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            label: None,
            thumbnail: None,
        }
    }
}

/// Complete metadata record for one catalog item.
///
/// Extraction always yields a full record; fields the page (or the site as a
/// whole) does not provide are blank. `sort_title`, `outline` and `tagline`
/// are blank by design on MGStage, `directors` is always empty, and
/// `extra_fanart` is currently always empty as well.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub title: Option<String>,
    #[serde(rename = "originalTitle")]
    pub original_title: Option<String>,
    #[serde(rename = "sortTitle")]
    pub sort_title: Option<String>,
    pub set: Option<String>,
    pub rating: Option<Rating>,
    pub votes: Option<u32>,
    /// ISO `YYYY-MM-DD`.
    #[serde(rename = "releaseDate")]
    pub release_date: Option<String>,
    pub year: Option<i32>,
    #[serde(rename = "runtimeMinutes")]
    pub runtime_minutes: Option<u32>,
    pub outline: Option<String>,
    pub plot: Option<String>,
    pub tagline: Option<String>,
    #[serde(rename = "trailerUrl")]
    pub trailer_url: Option<String>,
    pub poster: Option<ArtworkRef>,
    pub fanart: Vec<ArtworkRef>,
    #[serde(rename = "extraFanart")]
    pub extra_fanart: Vec<ArtworkRef>,
    /// Fixed adult content classification.
    #[serde(rename = "contentRating")]
    pub content_rating: Option<String>,
    /// Canonical `LETTERS-NUMBERS` catalog identifier.
    pub id: Option<String>,
    pub genres: Vec<String>,
    pub actors: Vec<Actor>,
    pub directors: Vec<String>,
    pub studio: Option<String>,
}
