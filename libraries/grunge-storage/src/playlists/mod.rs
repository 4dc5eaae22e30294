//! Playlists and their ordered track membership
//!
//! Create and update each run in one transaction: the playlist row change,
//! the removal of the old membership and every insert of the new one commit
//! together or not at all.

use grunge_core::{error::Result, types::*, GrungeError};
use sqlx::{sqlite::SqliteRow, QueryBuilder, Row, Sqlite, SqliteConnection, SqlitePool};
use std::collections::HashMap;

const SELECT_PLAYLIST: &str =
    "SELECT p.id AS playlist_pk, p.uuid, p.name, p.created_at, p.updated_at FROM playlists p";

fn from_row(row: &SqliteRow, tracks: Vec<PlaylistTrack>) -> sqlx::Result<Playlist> {
    Ok(Playlist {
        uuid: row.try_get("uuid")?,
        name: row.try_get("name")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
        tracks,
    })
}

/// Load the membership of several playlists in one statement
async fn get_tracks(
    pool: &SqlitePool,
    playlist_pks: &[i64],
) -> Result<HashMap<i64, Vec<PlaylistTrack>>> {
    let mut by_playlist: HashMap<i64, Vec<PlaylistTrack>> = HashMap::new();
    if playlist_pks.is_empty() {
        return Ok(by_playlist);
    }

    let mut query = QueryBuilder::<Sqlite>::new(
        "SELECT pt.playlist_id, pt.sequence_number, t.uuid AS track_uuid, t.name AS track_name
         FROM playlist_tracks pt
         INNER JOIN tracks t ON pt.track_id = t.id
         WHERE pt.playlist_id IN (",
    );
    let mut ids = query.separated(", ");
    for pk in playlist_pks {
        ids.push_bind(*pk);
    }
    ids.push_unseparated(") ORDER BY pt.playlist_id, pt.sequence_number");

    for row in query.build().fetch_all(pool).await? {
        let playlist_pk: i64 = row.try_get("playlist_id")?;
        by_playlist.entry(playlist_pk).or_default().push(PlaylistTrack {
            track_id: row.try_get("track_uuid")?,
            sequence_number: row.try_get("sequence_number")?,
            name: row.try_get("track_name")?,
        });
    }

    Ok(by_playlist)
}

async fn with_tracks(pool: &SqlitePool, rows: &[SqliteRow]) -> Result<Vec<Playlist>> {
    let playlist_pks = rows
        .iter()
        .map(|row| row.try_get::<i64, _>("playlist_pk"))
        .collect::<sqlx::Result<Vec<_>>>()?;

    let mut tracks = get_tracks(pool, &playlist_pks).await?;

    rows.iter()
        .zip(playlist_pks)
        .map(|(row, pk)| -> Result<Playlist> {
            Ok(from_row(row, tracks.remove(&pk).unwrap_or_default())?)
        })
        .collect()
}

/// Get all playlists with their tracks
pub async fn get_all(pool: &SqlitePool, page: Pagination) -> Result<Page<Playlist>> {
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM playlists")
        .fetch_one(pool)
        .await?;

    let rows = sqlx::query(&format!("{SELECT_PLAYLIST} ORDER BY p.id LIMIT ? OFFSET ?"))
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(pool)
        .await?;

    Ok(Page {
        total,
        results: with_tracks(pool, &rows).await?,
    })
}

/// Get playlist with tracks ordered by sequence number
pub async fn get_by_id(pool: &SqlitePool, id: PlaylistId) -> Result<Option<Playlist>> {
    let Some(row) = sqlx::query(&format!("{SELECT_PLAYLIST} WHERE p.uuid = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?
    else {
        return Ok(None);
    };

    Ok(with_tracks(pool, &[row]).await?.pop())
}

/// Create a playlist together with its track list
///
/// On any failure nothing from this call is persisted, including the
/// playlist row itself.
pub async fn create(pool: &SqlitePool, playlist: CreatePlaylist) -> Result<Playlist> {
    let mut tx = pool.begin().await?;

    let inserted = sqlx::query("INSERT INTO playlists (uuid, name) VALUES (?, ?)")
        .bind(playlist.uuid)
        .bind(&playlist.name)
        .execute(&mut *tx)
        .await;

    let playlist_pk = match inserted {
        Ok(done) => done.last_insert_rowid(),
        Err(err) if crate::is_unique_violation(&err) => {
            return Err(GrungeError::duplicate("playlist", playlist.uuid));
        }
        Err(err) => return Err(err.into()),
    };

    // Dropping `tx` on an early return rolls back the playlist insert too
    replace_tracks(&mut tx, playlist_pk, &playlist.tracks).await?;
    tx.commit().await?;

    tracing::info!(
        playlist = %playlist.uuid,
        tracks = playlist.tracks.len(),
        "Created playlist"
    );

    get_by_id(pool, playlist.uuid)
        .await?
        .ok_or_else(|| GrungeError::Database("Failed to retrieve created playlist".to_string()))
}

/// Update a playlist's attributes and replace its track list
///
/// The existing membership is always removed, so an empty `tracks` clears
/// the playlist. On failure the previous name and tracks are left intact.
pub async fn update(pool: &SqlitePool, id: PlaylistId, update: UpdatePlaylist) -> Result<Playlist> {
    let mut tx = pool.begin().await?;

    let playlist_pk: Option<i64> = sqlx::query_scalar("SELECT id FROM playlists WHERE uuid = ?")
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;
    let Some(playlist_pk) = playlist_pk else {
        return Err(GrungeError::playlist_not_found(id));
    };

    sqlx::query(
        "UPDATE playlists SET name = COALESCE(?, name), updated_at = datetime('now') WHERE id = ?",
    )
    .bind(update.name.as_deref())
    .bind(playlist_pk)
    .execute(&mut *tx)
    .await?;

    replace_tracks(&mut tx, playlist_pk, &update.tracks).await?;
    tx.commit().await?;

    tracing::info!(
        playlist = %id,
        tracks = update.tracks.len(),
        "Updated playlist"
    );

    get_by_id(pool, id)
        .await?
        .ok_or_else(|| GrungeError::playlist_not_found(id))
}

/// Delete playlist; memberships go with it through the cascade
///
/// Returns `false` when no such playlist existed.
pub async fn delete(pool: &SqlitePool, id: PlaylistId) -> Result<bool> {
    let result = sqlx::query("DELETE FROM playlists WHERE uuid = ?")
        .bind(id)
        .execute(pool)
        .await?;

    let deleted = result.rows_affected() > 0;
    if deleted {
        tracing::info!(playlist = %id, "Deleted playlist");
    } else {
        tracing::debug!(playlist = %id, "Delete of unknown playlist ignored");
    }

    Ok(deleted)
}

/// Make `entries` the exact membership of the playlist
///
/// Removes the current membership, then inserts entries in input order. The
/// first entry naming an unknown track, or a position already taken, aborts
/// with an error naming that entry's track. Callers run this inside a
/// transaction so an abort leaves no partial membership behind.
pub async fn replace_tracks(
    conn: &mut SqliteConnection,
    playlist_pk: i64,
    entries: &[PlaylistEntry],
) -> Result<()> {
    let removed = sqlx::query("DELETE FROM playlist_tracks WHERE playlist_id = ?")
        .bind(playlist_pk)
        .execute(&mut *conn)
        .await?
        .rows_affected();

    tracing::debug!(playlist_pk, removed, requested = entries.len(), "Replacing playlist tracks");

    for entry in entries {
        let Some(track_pk) = crate::tracks::find_pk(conn, entry.track_id).await? else {
            return Err(GrungeError::TrackNotFound(entry.track_id));
        };

        let inserted = sqlx::query(
            "INSERT INTO playlist_tracks (playlist_id, track_id, sequence_number)
             VALUES (?, ?, ?)",
        )
        .bind(playlist_pk)
        .bind(track_pk)
        .bind(entry.sequence_number)
        .execute(&mut *conn)
        .await;

        match inserted {
            Ok(_) => {}
            Err(err) if crate::is_unique_violation(&err) => {
                return Err(GrungeError::DuplicateSequenceNumber {
                    track_id: entry.track_id,
                    sequence_number: entry.sequence_number,
                });
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}
