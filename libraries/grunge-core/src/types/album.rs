//! Album types

use super::{AlbumId, Artist, TrackSummary};
use serde::{Deserialize, Serialize};

/// An album with its artist and tracks loaded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Album {
    pub uuid: AlbumId,
    pub name: String,
    pub artist: Artist,
    /// Ordered by track number, then insertion order
    pub tracks: Vec<TrackSummary>,
}

/// Album as embedded in a track representation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlbumSummary {
    pub uuid: AlbumId,
    pub name: String,
    pub artist: Artist,
}
