/// Read-only catalog routes (artists, albums, tracks)
///
/// Each entity implements [`CatalogResource`] once; the `list` and
/// `retrieve` handlers are generic over it.
use crate::{
    api::extract::ApiQuery,
    error::{Result, ServerError},
    state::AppState,
};
use async_trait::async_trait;
use axum::{
    extract::{Path, State},
    Json,
};
use grunge_core::{
    storage::CatalogStore,
    types::{
        Album, AlbumFilter, AlbumId, Artist, ArtistFilter, ArtistId, Page, PageRequest,
        Pagination, Track, TrackFilter, TrackId,
    },
};
use serde::{de::DeserializeOwned, Serialize};
use std::{fmt::Display, str::FromStr};

/// Listing and lookup by external uuid for one catalog entity
#[async_trait]
pub trait CatalogResource: Send + Sync + 'static {
    /// Entity name used in not-found errors
    const ENTITY: &'static str;

    type Id: FromStr + Display + Copy + Send + Sync;
    type Filter: DeserializeOwned + Send + Sync;
    type Item: Serialize + Send;

    async fn list(
        db: &dyn CatalogStore,
        filter: &Self::Filter,
        page: Pagination,
    ) -> grunge_core::Result<Page<Self::Item>>;

    async fn fetch(db: &dyn CatalogStore, id: Self::Id) -> grunge_core::Result<Option<Self::Item>>;
}

pub struct Artists;

#[async_trait]
impl CatalogResource for Artists {
    const ENTITY: &'static str = "artist";

    type Id = ArtistId;
    type Filter = ArtistFilter;
    type Item = Artist;

    async fn list(
        db: &dyn CatalogStore,
        filter: &ArtistFilter,
        page: Pagination,
    ) -> grunge_core::Result<Page<Artist>> {
        db.list_artists(filter, page).await
    }

    async fn fetch(db: &dyn CatalogStore, id: ArtistId) -> grunge_core::Result<Option<Artist>> {
        db.get_artist(id).await
    }
}

/// Albums come with their artist and tracks
pub struct Albums;

#[async_trait]
impl CatalogResource for Albums {
    const ENTITY: &'static str = "album";

    type Id = AlbumId;
    type Filter = AlbumFilter;
    type Item = Album;

    async fn list(
        db: &dyn CatalogStore,
        filter: &AlbumFilter,
        page: Pagination,
    ) -> grunge_core::Result<Page<Album>> {
        db.list_albums(filter, page).await
    }

    async fn fetch(db: &dyn CatalogStore, id: AlbumId) -> grunge_core::Result<Option<Album>> {
        db.get_album(id).await
    }
}

/// Tracks come with their album and the album's artist
pub struct Tracks;

#[async_trait]
impl CatalogResource for Tracks {
    const ENTITY: &'static str = "track";

    type Id = TrackId;
    type Filter = TrackFilter;
    type Item = Track;

    async fn list(
        db: &dyn CatalogStore,
        filter: &TrackFilter,
        page: Pagination,
    ) -> grunge_core::Result<Page<Track>> {
        db.list_tracks(filter, page).await
    }

    async fn fetch(db: &dyn CatalogStore, id: TrackId) -> grunge_core::Result<Option<Track>> {
        db.get_track(id).await
    }
}

/// GET /{entities}?<filters>&limit=&offset=
pub async fn list<R: CatalogResource>(
    State(app_state): State<AppState>,
    ApiQuery(filter): ApiQuery<R::Filter>,
    ApiQuery(page): ApiQuery<PageRequest>,
) -> Result<Json<Page<R::Item>>> {
    let page = app_state.pagination(page);
    tracing::debug!(entity = R::ENTITY, ?page, "Listing catalog entities");

    let items = R::list(app_state.db.as_ref(), &filter, page).await?;
    Ok(Json(items))
}

/// GET /{entities}/:uuid
///
/// A malformed uuid cannot match anything, so it is a 404 like any other
/// unknown id.
pub async fn retrieve<R: CatalogResource>(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<R::Item>> {
    let Ok(parsed) = id.parse::<R::Id>() else {
        return Err(ServerError::not_found(R::ENTITY, id));
    };

    R::fetch(app_state.db.as_ref(), parsed)
        .await?
        .map(Json)
        .ok_or_else(|| ServerError::not_found(R::ENTITY, parsed))
}
