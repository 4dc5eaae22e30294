//! Storage trait for the catalog and playlists

use crate::error::Result;
use crate::types::{
    Album, AlbumFilter, AlbumId, Artist, ArtistFilter, ArtistId, CreatePlaylist, Page,
    Pagination, Playlist, PlaylistId, Track, TrackFilter, TrackId, UpdatePlaylist,
};
use async_trait::async_trait;

/// Storage context providing access to database operations
///
/// All lookups take external uuids; internal keys never cross this trait.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    // ========================================================================
    // Artists
    // ========================================================================

    /// List artists matching `filter`
    async fn list_artists(&self, filter: &ArtistFilter, page: Pagination) -> Result<Page<Artist>>;

    /// Get artist by uuid
    async fn get_artist(&self, id: ArtistId) -> Result<Option<Artist>>;

    // ========================================================================
    // Albums
    // ========================================================================

    /// List albums matching `filter`, each with artist and tracks loaded
    async fn list_albums(&self, filter: &AlbumFilter, page: Pagination) -> Result<Page<Album>>;

    /// Get album by uuid with artist and tracks loaded
    async fn get_album(&self, id: AlbumId) -> Result<Option<Album>>;

    // ========================================================================
    // Tracks
    // ========================================================================

    /// List tracks matching `filter`, each with album and album artist loaded
    async fn list_tracks(&self, filter: &TrackFilter, page: Pagination) -> Result<Page<Track>>;

    /// Get track by uuid with album and album artist loaded
    async fn get_track(&self, id: TrackId) -> Result<Option<Track>>;

    // ========================================================================
    // Playlists
    // ========================================================================

    /// List playlists with their tracks
    async fn list_playlists(&self, page: Pagination) -> Result<Page<Playlist>>;

    /// Get playlist with tracks
    async fn get_playlist(&self, id: PlaylistId) -> Result<Option<Playlist>>;

    /// Create a playlist and its track membership atomically
    async fn create_playlist(&self, playlist: CreatePlaylist) -> Result<Playlist>;

    /// Update a playlist and replace its track membership atomically
    async fn update_playlist(&self, id: PlaylistId, update: UpdatePlaylist) -> Result<Playlist>;

    /// Delete playlist; returns whether a row existed
    async fn delete_playlist(&self, id: PlaylistId) -> Result<bool>;
}
