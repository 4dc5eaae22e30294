//! Common test utilities and fixtures
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use grunge_core::types::{AlbumId, ArtistId, TrackId};
use grunge_server::{config::ApiSettings, create_router, AppState};
use grunge_storage::Database;
use serde_json::Value;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

/// Router backed by a throwaway SQLite file
///
/// Keep the `TempDir` alive for as long as the router is used.
pub struct TestApp {
    pub router: Router,
    pub db: Arc<Database>,
    _temp_dir: TempDir,
}

/// Catalog rows every test starts with
pub struct Fixtures {
    pub artist: ArtistId,
    pub other_artist: ArtistId,
    pub album: AlbumId,
    pub other_album: AlbumId,
    /// Tracks 1-3 on `album`, numbered in order
    pub tracks: Vec<TrackId>,
    /// Single track on `other_album`
    pub other_track: TrackId,
}

/// Create a test app with migrations applied and the catalog seeded
pub async fn create_test_app() -> (TestApp, Fixtures) {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_url = format!("sqlite://{}", temp_dir.path().join("test.db").display());

    let db = Database::connect(&db_url)
        .await
        .expect("Failed to open test database");
    let fixtures = seed_catalog(&db).await;

    let db = Arc::new(db);
    let api = ApiSettings {
        prefix: "/api/v1".to_string(),
        default_page_size: 50,
        max_page_size: 100,
    };
    let router = create_router(AppState::new(Arc::clone(&db), api));

    (
        TestApp {
            router,
            db,
            _temp_dir: temp_dir,
        },
        fixtures,
    )
}

async fn seed_catalog(db: &Database) -> Fixtures {
    let mut conn = db.pool().acquire().await.expect("Failed to acquire connection");

    let artist = ArtistId::generate();
    let other_artist = ArtistId::generate();
    grunge_storage::artists::create(&mut conn, artist, "Nirvana").await.unwrap();
    grunge_storage::artists::create(&mut conn, other_artist, "Soundgarden")
        .await
        .unwrap();

    let album = AlbumId::generate();
    let other_album = AlbumId::generate();
    grunge_storage::albums::create(&mut conn, album, artist, "Nevermind")
        .await
        .unwrap();
    grunge_storage::albums::create(&mut conn, other_album, other_artist, "Superunknown")
        .await
        .unwrap();

    let mut tracks = Vec::new();
    for (n, name) in ["Smells Like Teen Spirit", "In Bloom", "Come as You Are"]
        .into_iter()
        .enumerate()
    {
        let id = TrackId::generate();
        let number = Some(n as i32 + 1);
        grunge_storage::tracks::create(&mut conn, id, album, name, number, Some(240.0))
            .await
            .unwrap();
        tracks.push(id);
    }

    let other_track = TrackId::generate();
    grunge_storage::tracks::create(
        &mut conn,
        other_track,
        other_album,
        "Black Hole Sun",
        Some(7),
        None,
    )
    .await
    .unwrap();

    Fixtures {
        artist,
        other_artist,
        album,
        other_album,
        tracks,
        other_track,
    }
}

impl TestApp {
    /// Send a request and decode the JSON body (`Value::Null` when empty)
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None).await
    }

    /// Row count of `table`, read straight from the database
    pub async fn count(&self, table: &str) -> i64 {
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(self.db.pool())
            .await
            .expect("Failed to count rows")
    }
}
