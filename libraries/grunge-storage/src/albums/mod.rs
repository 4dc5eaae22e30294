use grunge_core::{error::Result, types::*, GrungeError};
use sqlx::{sqlite::SqliteRow, QueryBuilder, Row, Sqlite, SqliteConnection, SqlitePool};

const SELECT_ALBUM: &str = "SELECT al.id AS album_pk, al.uuid AS album_uuid, al.name AS album_name,
        ar.uuid AS artist_uuid, ar.name AS artist_name
 FROM albums al
 INNER JOIN artists ar ON al.artist_id = ar.id";

/// Map the `album_*` and `artist_*` columns; shared with track reads
pub(crate) fn summary_from_row(row: &SqliteRow) -> sqlx::Result<AlbumSummary> {
    Ok(AlbumSummary {
        uuid: row.try_get("album_uuid")?,
        name: row.try_get("album_name")?,
        artist: crate::artists::from_row(row)?,
    })
}

fn push_filter(qb: &mut QueryBuilder<'_, Sqlite>, filter: &AlbumFilter) {
    qb.push(" WHERE 1 = 1");
    if let Some(name) = &filter.name {
        qb.push(" AND al.name = ").push_bind(name.clone());
    }
    if let Some(artist) = filter.artist {
        qb.push(" AND ar.uuid = ").push_bind(artist);
    }
}

/// Attach tracks to album rows with a single follow-up query
async fn with_tracks(pool: &SqlitePool, rows: &[SqliteRow]) -> Result<Vec<Album>> {
    let album_pks = rows
        .iter()
        .map(|row| row.try_get::<i64, _>("album_pk"))
        .collect::<sqlx::Result<Vec<_>>>()?;

    let mut tracks = crate::tracks::get_by_albums(pool, &album_pks).await?;

    rows.iter()
        .zip(album_pks)
        .map(|(row, pk)| -> Result<Album> {
            let summary = summary_from_row(row)?;
            Ok(Album {
                uuid: summary.uuid,
                name: summary.name,
                artist: summary.artist,
                tracks: tracks.remove(&pk).unwrap_or_default(),
            })
        })
        .collect()
}

pub async fn get_all(
    pool: &SqlitePool,
    filter: &AlbumFilter,
    page: Pagination,
) -> Result<Page<Album>> {
    let mut count = QueryBuilder::new(
        "SELECT COUNT(*) FROM albums al INNER JOIN artists ar ON al.artist_id = ar.id",
    );
    push_filter(&mut count, filter);
    let total: i64 = count.build_query_scalar().fetch_one(pool).await?;

    let mut query = QueryBuilder::new(SELECT_ALBUM);
    push_filter(&mut query, filter);
    query
        .push(" ORDER BY al.id LIMIT ")
        .push_bind(page.limit)
        .push(" OFFSET ")
        .push_bind(page.offset);

    let rows = query.build().fetch_all(pool).await?;
    let results = with_tracks(pool, &rows).await?;

    Ok(Page { total, results })
}

pub async fn get_by_id(pool: &SqlitePool, id: AlbumId) -> Result<Option<Album>> {
    let Some(row) = sqlx::query(&format!("{SELECT_ALBUM} WHERE al.uuid = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?
    else {
        return Ok(None);
    };

    Ok(with_tracks(pool, &[row]).await?.pop())
}

pub async fn create(
    conn: &mut SqliteConnection,
    id: AlbumId,
    artist: ArtistId,
    name: &str,
) -> Result<()> {
    let result = sqlx::query(
        "INSERT INTO albums (uuid, name, artist_id)
         SELECT ?, ?, id FROM artists WHERE uuid = ?",
    )
    .bind(id)
    .bind(name)
    .bind(artist)
    .execute(&mut *conn)
    .await;

    match result {
        Ok(done) if done.rows_affected() == 0 => Err(GrungeError::not_found("artist", artist)),
        Ok(_) => Ok(()),
        Err(err) if crate::is_unique_violation(&err) => Err(GrungeError::duplicate("album", id)),
        Err(err) => Err(err.into()),
    }
}
