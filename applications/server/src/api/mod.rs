/// API route modules
pub mod catalog;
pub mod extract;
pub mod health;
pub mod playlists;

use crate::state::AppState;
use axum::{routing::get, Router};
use catalog::{Albums, Artists, Tracks};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

/// Build the full router, mounted under the configured API prefix
pub fn create_router(app_state: AppState) -> Router {
    let routes = Router::new()
        .route("/health", get(health::health))
        // Catalog (read-only)
        .route("/artists", get(catalog::list::<Artists>))
        .route("/artists/:uuid", get(catalog::retrieve::<Artists>))
        .route("/albums", get(catalog::list::<Albums>))
        .route("/albums/:uuid", get(catalog::retrieve::<Albums>))
        .route("/tracks", get(catalog::list::<Tracks>))
        .route("/tracks/:uuid", get(catalog::retrieve::<Tracks>))
        // Playlists
        .route(
            "/playlists",
            get(playlists::list_playlists).post(playlists::create_playlist),
        )
        .route(
            "/playlists/:uuid",
            get(playlists::get_playlist)
                .put(playlists::replace_playlist)
                .patch(playlists::update_playlist)
                .delete(playlists::delete_playlist),
        );

    Router::new()
        .nest(&app_state.api.prefix, routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
