//! songlib-api library - song catalog HTTP service
//!
//! CRUD over the `songs` table, filtered and paginated listing, lyrics split
//! into verses, and metadata enrichment of new songs.

use std::sync::Arc;

use axum::Router;
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod enrichment;
pub mod error;
pub mod pagination;
pub mod verses;

use enrichment::MetadataProvider;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Source of metadata for newly created songs
    pub enricher: Arc<dyn MetadataProvider>,
    /// Upper bound for the `pageSize` query parameter
    pub max_page_size: i64,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool, enricher: Arc<dyn MetadataProvider>, max_page_size: i64) -> Self {
        Self {
            db,
            enricher,
            max_page_size,
        }
    }
}

/// Build application router
///
/// Song endpoints live under `/api/v1`; `/health` sits at the root.
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    let songs = Router::new()
        .route("/songs", get(api::list_songs).post(api::create_song))
        .route("/songs/:id", axum::routing::put(api::update_song).delete(api::delete_song))
        .route("/songs/:id/text", get(api::get_song_text));

    Router::new()
        .nest("/api/v1", songs)
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
