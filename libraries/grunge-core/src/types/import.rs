//! Catalog import document
//!
//! The HTTP surface is read-only for artists, albums and tracks, so the
//! catalog is loaded from a nested JSON document instead.

use super::{AlbumId, ArtistId, TrackId};
use serde::{Deserialize, Serialize};

/// Root of an import document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogImport {
    #[serde(default)]
    pub artists: Vec<ImportArtist>,
}

/// Artist to import; a uuid is generated when none is given
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportArtist {
    pub uuid: Option<ArtistId>,
    pub name: String,
    #[serde(default)]
    pub albums: Vec<ImportAlbum>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportAlbum {
    pub uuid: Option<AlbumId>,
    pub name: String,
    #[serde(default)]
    pub tracks: Vec<ImportTrack>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportTrack {
    pub uuid: Option<TrackId>,
    pub name: String,
    pub track_number: Option<i32>,
    pub duration_seconds: Option<f64>,
}

/// Row counts written by an import
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub artists: usize,
    pub albums: usize,
    pub tracks: usize,
}
