use grunge_core::{error::Result, types::*, GrungeError};
use sqlx::{sqlite::SqliteRow, QueryBuilder, Row, Sqlite, SqliteConnection, SqlitePool};

const SELECT_ARTIST: &str = "SELECT ar.uuid AS artist_uuid, ar.name AS artist_name FROM artists ar";

/// Map the `artist_uuid`/`artist_name` columns; shared by album and track reads
pub(crate) fn from_row(row: &SqliteRow) -> sqlx::Result<Artist> {
    Ok(Artist {
        uuid: row.try_get("artist_uuid")?,
        name: row.try_get("artist_name")?,
    })
}

fn push_filter(qb: &mut QueryBuilder<'_, Sqlite>, filter: &ArtistFilter) {
    qb.push(" WHERE 1 = 1");
    if let Some(name) = &filter.name {
        qb.push(" AND ar.name = ").push_bind(name.clone());
    }
}

pub async fn get_all(
    pool: &SqlitePool,
    filter: &ArtistFilter,
    page: Pagination,
) -> Result<Page<Artist>> {
    let mut count = QueryBuilder::new("SELECT COUNT(*) FROM artists ar");
    push_filter(&mut count, filter);
    let total: i64 = count.build_query_scalar().fetch_one(pool).await?;

    let mut query = QueryBuilder::new(SELECT_ARTIST);
    push_filter(&mut query, filter);
    query
        .push(" ORDER BY ar.id LIMIT ")
        .push_bind(page.limit)
        .push(" OFFSET ")
        .push_bind(page.offset);

    let rows = query.build().fetch_all(pool).await?;
    let results = rows.iter().map(from_row).collect::<sqlx::Result<Vec<_>>>()?;

    Ok(Page { total, results })
}

pub async fn get_by_id(pool: &SqlitePool, id: ArtistId) -> Result<Option<Artist>> {
    let row = sqlx::query(&format!("{SELECT_ARTIST} WHERE ar.uuid = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.as_ref().map(from_row).transpose()?)
}

pub async fn create(conn: &mut SqliteConnection, id: ArtistId, name: &str) -> Result<()> {
    let result = sqlx::query("INSERT INTO artists (uuid, name) VALUES (?, ?)")
        .bind(id)
        .bind(name)
        .execute(&mut *conn)
        .await;

    match result {
        Ok(_) => Ok(()),
        Err(err) if crate::is_unique_violation(&err) => Err(GrungeError::duplicate("artist", id)),
        Err(err) => Err(err.into()),
    }
}
