//! Grunge Storage
//!
//! `SQLite` persistence for the Grunge music catalog.
//!
//! # Architecture
//!
//! - **Vertical Slicing**: each entity module owns its own queries and row
//!   mapping (`artists`, `albums`, `tracks`, `playlists`)
//! - **Eager Loading**: album and track reads join or batch-load their
//!   related rows, never one query per row
//! - **Transactional Writes**: playlist create/update and catalog import each
//!   run in a single transaction
//!
//! # Example
//!
//! ```rust,no_run
//! use grunge_storage::{LocalStorageContext, create_pool, run_migrations};
//! use grunge_core::{storage::CatalogStore, types::{ArtistFilter, Pagination}};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool("sqlite://grunge.db").await?;
//! run_migrations(&pool).await?;
//!
//! let storage = LocalStorageContext::new(pool);
//! let artists = storage
//!     .list_artists(&ArtistFilter::default(), Pagination::default())
//!     .await?;
//! # Ok(())
//! # }
//! ```

mod context;

// Vertical slices
pub mod albums;
pub mod artists;
pub mod import;
pub mod playlists;
pub mod tracks;

pub use context::LocalStorageContext;

// Name used by the server's application state
pub type Database = LocalStorageContext;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// This should be called once when the application starts to ensure
/// the database schema is up to date.
///
/// # Errors
///
/// Returns an error if migrations fail to run
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `<sqlite://grunge.db>`)
///
/// # Errors
///
/// Returns an error if the connection fails
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    tracing::debug!(database_url, "Creating SQLite pool");

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        // Playlist deletion relies on ON DELETE CASCADE
        .foreign_keys(true)
        .busy_timeout(std::time::Duration::from_secs(30));

    // create_if_missing only creates the file, not its directory
    if let Some(parent) = options.get_filename().parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
            tracing::info!(path = %parent.display(), "Created database directory");
        }
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    tracing::info!("SQLite pool ready");

    Ok(pool)
}

/// True when `err` is a UNIQUE constraint violation
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}
