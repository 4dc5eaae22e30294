use crate::{albums, artists, import, playlists, tracks};
use async_trait::async_trait;
use grunge_core::{error::Result, storage::CatalogStore, types::*};
use sqlx::SqlitePool;

/// Local storage context using `SQLite`
#[derive(Clone)]
pub struct LocalStorageContext {
    pool: SqlitePool,
}

impl LocalStorageContext {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (creating if needed) the database at `database_url` and migrate it
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = crate::create_pool(database_url).await?;
        crate::run_migrations(&pool)
            .await
            .map_err(|e| grunge_core::GrungeError::Database(e.to_string()))?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Round-trip a trivial query
    pub async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Load a catalog document in one transaction
    pub async fn import_catalog(&self, doc: &CatalogImport) -> Result<ImportSummary> {
        import::load(&self.pool, doc).await
    }
}

#[async_trait]
impl CatalogStore for LocalStorageContext {
    // Artists
    async fn list_artists(&self, filter: &ArtistFilter, page: Pagination) -> Result<Page<Artist>> {
        artists::get_all(&self.pool, filter, page).await
    }

    async fn get_artist(&self, id: ArtistId) -> Result<Option<Artist>> {
        artists::get_by_id(&self.pool, id).await
    }

    // Albums
    async fn list_albums(&self, filter: &AlbumFilter, page: Pagination) -> Result<Page<Album>> {
        albums::get_all(&self.pool, filter, page).await
    }

    async fn get_album(&self, id: AlbumId) -> Result<Option<Album>> {
        albums::get_by_id(&self.pool, id).await
    }

    // Tracks
    async fn list_tracks(&self, filter: &TrackFilter, page: Pagination) -> Result<Page<Track>> {
        tracks::get_all(&self.pool, filter, page).await
    }

    async fn get_track(&self, id: TrackId) -> Result<Option<Track>> {
        tracks::get_by_id(&self.pool, id).await
    }

    // Playlists
    async fn list_playlists(&self, page: Pagination) -> Result<Page<Playlist>> {
        playlists::get_all(&self.pool, page).await
    }

    async fn get_playlist(&self, id: PlaylistId) -> Result<Option<Playlist>> {
        playlists::get_by_id(&self.pool, id).await
    }

    async fn create_playlist(&self, playlist: CreatePlaylist) -> Result<Playlist> {
        playlists::create(&self.pool, playlist).await
    }

    async fn update_playlist(&self, id: PlaylistId, update: UpdatePlaylist) -> Result<Playlist> {
        playlists::update(&self.pool, id, update).await
    }

    async fn delete_playlist(&self, id: PlaylistId) -> Result<bool> {
        playlists::delete(&self.pool, id).await
    }
}
