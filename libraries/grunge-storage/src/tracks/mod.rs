use grunge_core::{error::Result, types::*, GrungeError};
use sqlx::{sqlite::SqliteRow, QueryBuilder, Row, Sqlite, SqliteConnection, SqlitePool};
use std::collections::HashMap;

// Album and album artist come from the same statement
const SELECT_TRACK: &str = "SELECT t.uuid AS track_uuid, t.name AS track_name, t.track_number,
        t.duration_seconds, al.uuid AS album_uuid, al.name AS album_name,
        ar.uuid AS artist_uuid, ar.name AS artist_name
 FROM tracks t
 INNER JOIN albums al ON t.album_id = al.id
 INNER JOIN artists ar ON al.artist_id = ar.id";

fn from_row(row: &SqliteRow) -> sqlx::Result<Track> {
    let summary = summary_from_row(row)?;
    Ok(Track {
        uuid: summary.uuid,
        name: summary.name,
        track_number: summary.track_number,
        duration_seconds: summary.duration_seconds,
        album: crate::albums::summary_from_row(row)?,
    })
}

fn summary_from_row(row: &SqliteRow) -> sqlx::Result<TrackSummary> {
    Ok(TrackSummary {
        uuid: row.try_get("track_uuid")?,
        name: row.try_get("track_name")?,
        track_number: row.try_get("track_number")?,
        duration_seconds: row.try_get("duration_seconds")?,
    })
}

fn push_filter(qb: &mut QueryBuilder<'_, Sqlite>, filter: &TrackFilter) {
    qb.push(" WHERE 1 = 1");
    if let Some(name) = &filter.name {
        qb.push(" AND t.name = ").push_bind(name.clone());
    }
    if let Some(album) = filter.album {
        qb.push(" AND al.uuid = ").push_bind(album);
    }
    if let Some(artist) = filter.artist {
        qb.push(" AND ar.uuid = ").push_bind(artist);
    }
}

pub async fn get_all(
    pool: &SqlitePool,
    filter: &TrackFilter,
    page: Pagination,
) -> Result<Page<Track>> {
    let mut count = QueryBuilder::new(
        "SELECT COUNT(*)
         FROM tracks t
         INNER JOIN albums al ON t.album_id = al.id
         INNER JOIN artists ar ON al.artist_id = ar.id",
    );
    push_filter(&mut count, filter);
    let total: i64 = count.build_query_scalar().fetch_one(pool).await?;

    let mut query = QueryBuilder::new(SELECT_TRACK);
    push_filter(&mut query, filter);
    query
        .push(" ORDER BY t.id LIMIT ")
        .push_bind(page.limit)
        .push(" OFFSET ")
        .push_bind(page.offset);

    let rows = query.build().fetch_all(pool).await?;
    let results = rows.iter().map(from_row).collect::<sqlx::Result<Vec<_>>>()?;

    Ok(Page { total, results })
}

pub async fn get_by_id(pool: &SqlitePool, id: TrackId) -> Result<Option<Track>> {
    let row = sqlx::query(&format!("{SELECT_TRACK} WHERE t.uuid = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.as_ref().map(from_row).transpose()?)
}

/// Load the tracks of several albums in one statement, keyed by album row id
pub(crate) async fn get_by_albums(
    pool: &SqlitePool,
    album_pks: &[i64],
) -> Result<HashMap<i64, Vec<TrackSummary>>> {
    let mut by_album: HashMap<i64, Vec<TrackSummary>> = HashMap::new();
    if album_pks.is_empty() {
        return Ok(by_album);
    }

    let mut query = QueryBuilder::<Sqlite>::new(
        "SELECT t.album_id, t.uuid AS track_uuid, t.name AS track_name, t.track_number,
                t.duration_seconds
         FROM tracks t
         WHERE t.album_id IN (",
    );
    let mut ids = query.separated(", ");
    for pk in album_pks {
        ids.push_bind(*pk);
    }
    ids.push_unseparated(") ORDER BY t.album_id, t.track_number, t.id");

    for row in query.build().fetch_all(pool).await? {
        let album_pk: i64 = row.try_get("album_id")?;
        by_album
            .entry(album_pk)
            .or_default()
            .push(summary_from_row(&row)?);
    }

    Ok(by_album)
}

/// Resolve a track uuid to its row id
pub(crate) async fn find_pk(conn: &mut SqliteConnection, id: TrackId) -> Result<Option<i64>> {
    let pk = sqlx::query_scalar("SELECT id FROM tracks WHERE uuid = ?")
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(pk)
}

pub async fn create(
    conn: &mut SqliteConnection,
    id: TrackId,
    album: AlbumId,
    name: &str,
    track_number: Option<i32>,
    duration_seconds: Option<f64>,
) -> Result<()> {
    let result = sqlx::query(
        "INSERT INTO tracks (uuid, name, track_number, duration_seconds, album_id)
         SELECT ?, ?, ?, ?, id FROM albums WHERE uuid = ?",
    )
    .bind(id)
    .bind(name)
    .bind(track_number)
    .bind(duration_seconds)
    .bind(album)
    .execute(&mut *conn)
    .await;

    match result {
        Ok(done) if done.rows_affected() == 0 => Err(GrungeError::not_found("album", album)),
        Ok(_) => Ok(()),
        Err(err) if crate::is_unique_violation(&err) => Err(GrungeError::duplicate("track", id)),
        Err(err) => Err(err.into()),
    }
}
