//! Track types

use super::{AlbumSummary, TrackId};
use serde::{Deserialize, Serialize};

/// A track with its album and the album's artist loaded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub uuid: TrackId,
    pub name: String,
    pub track_number: Option<i32>,
    pub duration_seconds: Option<f64>,
    pub album: AlbumSummary,
}

/// Track as embedded in an album representation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackSummary {
    pub uuid: TrackId,
    pub name: String,
    pub track_number: Option<i32>,
    pub duration_seconds: Option<f64>,
}
