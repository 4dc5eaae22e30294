//! Grunge Core
//!
//! Domain types, the storage trait and error handling for the Grunge music
//! catalog service.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Artist`, `Album`, `Track`, `Playlist` and their
//!   uuid-backed identifiers
//! - **Query Types**: exact-match filters and `limit`/`offset` pagination
//! - **Storage Trait**: `CatalogStore`, implemented by `grunge-storage`
//! - **Error Handling**: `GrungeError` with stable codes and parameters
//!
//! # Example
//!
//! ```rust
//! use grunge_core::types::{CreatePlaylist, PlaylistEntry, PlaylistId, TrackId};
//!
//! let playlist = CreatePlaylist {
//!     uuid: PlaylistId::generate(),
//!     name: "Road Trip".to_string(),
//!     tracks: vec![PlaylistEntry::new(TrackId::generate(), 1)],
//! };
//! assert_eq!(playlist.tracks[0].sequence_number, 1);
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod storage;
pub mod types;

// Re-export commonly used types
pub use error::{GrungeError, Result};
pub use storage::CatalogStore;

pub use types::{
    Album, AlbumFilter, AlbumId, AlbumSummary, Artist, ArtistFilter, ArtistId, CatalogImport,
    CreatePlaylist, ImportSummary, Page, PageRequest, Pagination, Playlist, PlaylistEntry,
    PlaylistId, PlaylistTrack, Track, TrackFilter, TrackId, TrackSummary, UpdatePlaylist,
};
