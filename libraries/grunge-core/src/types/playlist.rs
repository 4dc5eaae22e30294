//! Playlist types
//!
//! A playlist never references tracks directly: each membership row carries
//! the track and its `sequence_number`, unique within the playlist.

use super::{PlaylistId, TrackId};
use serde::{Deserialize, Serialize};

/// Playlist with its ordered track membership
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    pub uuid: PlaylistId,
    pub name: String,
    pub created_at: String,
    pub updated_at: String,

    /// Ordered by `sequence_number`
    pub tracks: Vec<PlaylistTrack>,
}

impl Playlist {
    /// Track ids in playlist order
    pub fn track_ids(&self) -> Vec<TrackId> {
        self.tracks.iter().map(|t| t.track_id).collect()
    }
}

/// Track in a playlist with denormalized data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistTrack {
    #[serde(rename = "id")]
    pub track_id: TrackId,
    pub sequence_number: i32,

    /// Denormalized field for display
    pub name: String,
}

/// One requested membership: which track sits at which position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistEntry {
    #[serde(rename = "id")]
    pub track_id: TrackId,
    pub sequence_number: i32,
}

impl PlaylistEntry {
    pub fn new(track_id: TrackId, sequence_number: i32) -> Self {
        Self {
            track_id,
            sequence_number,
        }
    }
}

/// Data for creating a new playlist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatePlaylist {
    pub uuid: PlaylistId,
    pub name: String,
    /// Applied in order after the playlist row is inserted
    #[serde(default)]
    pub tracks: Vec<PlaylistEntry>,
}

/// Data for updating a playlist
///
/// The track list always replaces the current membership; an empty list
/// clears the playlist.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdatePlaylist {
    pub name: Option<String>,
    #[serde(default)]
    pub tracks: Vec<PlaylistEntry>,
}
