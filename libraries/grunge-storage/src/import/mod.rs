//! Bulk catalog load from a [`CatalogImport`] document

use grunge_core::{error::Result, types::*};
use sqlx::SqlitePool;

/// Insert every artist, album and track of `doc` in one transaction
///
/// Missing uuids are generated. A duplicate uuid anywhere in the document
/// (or already in the database) fails the whole import.
pub async fn load(pool: &SqlitePool, doc: &CatalogImport) -> Result<ImportSummary> {
    let mut tx = pool.begin().await?;
    let mut summary = ImportSummary::default();

    for artist in &doc.artists {
        let artist_id = artist.uuid.unwrap_or_else(ArtistId::generate);
        crate::artists::create(&mut tx, artist_id, &artist.name).await?;
        summary.artists += 1;

        for album in &artist.albums {
            let album_id = album.uuid.unwrap_or_else(AlbumId::generate);
            crate::albums::create(&mut tx, album_id, artist_id, &album.name).await?;
            summary.albums += 1;

            for track in &album.tracks {
                crate::tracks::create(
                    &mut tx,
                    track.uuid.unwrap_or_else(TrackId::generate),
                    album_id,
                    &track.name,
                    track.track_number,
                    track.duration_seconds,
                )
                .await?;
                summary.tracks += 1;
            }
        }
    }

    tx.commit().await?;

    tracing::info!(
        artists = summary.artists,
        albums = summary.albums,
        tracks = summary.tracks,
        "Imported catalog"
    );

    Ok(summary)
}
