//! Song catalog endpoints
//!
//! - GET    /api/v1/songs            filtered, paginated listing
//! - POST   /api/v1/songs            enrich and create
//! - PUT    /api/v1/songs/:id        full overwrite
//! - DELETE /api/v1/songs/:id        delete
//! - GET    /api/v1/songs/:id/text   lyrics split into verses

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use songlib_common::db::songs as store;
use songlib_common::db::{Song, SongFilter, SongInput};
use tracing::{debug, info};

use crate::error::{ApiError, ApiResult};
use crate::pagination::PageRequest;
use crate::verses::split_verses;
use crate::AppState;

/// Query parameters for song listing
///
/// Kept as raw strings so invalid numbers are reported, not defaulted.
#[derive(Debug, Default, Deserialize)]
pub struct ListSongsQuery {
    pub group: Option<String>,
    /// Title substring
    pub song: Option<String>,
    #[serde(rename = "releaseDate")]
    pub release_date: Option<String>,
    pub page: Option<String>,
    #[serde(rename = "pageSize")]
    pub page_size: Option<String>,
}

fn parse_song_id(raw: &str) -> ApiResult<i64> {
    raw.parse::<i64>()
        .ok()
        .filter(|id| *id >= 1)
        .ok_or_else(|| ApiError::BadRequest(format!("Invalid song ID: {}", raw)))
}

fn invalid_body(rejection: JsonRejection) -> ApiError {
    ApiError::BadRequest(format!("Invalid input: {}", rejection.body_text()))
}

/// GET /api/v1/songs
///
/// Pagination is validated before the store is queried.
pub async fn list_songs(
    State(state): State<AppState>,
    query: Result<Query<ListSongsQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Song>>> {
    let Query(query) = query
        .map_err(|e| ApiError::BadRequest(format!("Invalid query: {}", e.body_text())))?;

    let page = PageRequest::parse(
        query.page.as_deref(),
        query.page_size.as_deref(),
        state.max_page_size,
    )?;

    let filter = SongFilter {
        group: query.group.unwrap_or_default(),
        title: query.song.unwrap_or_default(),
        release_date: query.release_date.unwrap_or_default(),
    };

    let songs = store::list_songs(&state.db, &filter, page.page_size, page.offset)
        .await
        .map_err(|e| ApiError::from_store("Error fetching songs", e))?;

    debug!(page = page.page, page_size = page.page_size, returned = songs.len(), "Listed songs");

    Ok(Json(songs))
}

/// POST /api/v1/songs
///
/// Body needs `song_group` and `song_name`. The metadata provider fills in
/// the rest before the song is stored.
pub async fn create_song(
    State(state): State<AppState>,
    payload: Result<Json<SongInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Song>)> {
    let Json(draft) = payload.map_err(invalid_body)?;

    info!(
        group = %draft.group,
        title = %draft.title,
        provider = state.enricher.name(),
        "Enriching song data"
    );

    let metadata = state
        .enricher
        .fetch_metadata(&draft.group, &draft.title)
        .await?;

    let song = store::create_song(&state.db, metadata.apply_to(draft))
        .await
        .map_err(|e| ApiError::from_store("Error creating song", e))?;

    info!(id = song.id, "Created song");

    Ok((StatusCode::CREATED, Json(song)))
}

/// PUT /api/v1/songs/:id
///
/// Overwrites every field; the path id wins over any id in the body.
pub async fn update_song(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<SongInput>, JsonRejection>,
) -> ApiResult<Json<Song>> {
    let id = parse_song_id(&id)?;
    let Json(input) = payload.map_err(invalid_body)?;

    let song = store::update_song(&state.db, id, input)
        .await
        .map_err(|e| ApiError::from_store("Error updating song", e))?;

    info!(id, "Updated song");

    Ok(Json(song))
}

/// DELETE /api/v1/songs/:id
pub async fn delete_song(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = parse_song_id(&id)?;

    store::delete_song(&state.db, id)
        .await
        .map_err(|e| ApiError::from_store("Error deleting song", e))?;

    info!(id, "Deleted song");

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/songs/:id/text
pub async fn get_song_text(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<String>>> {
    let id = parse_song_id(&id)?;

    let song = store::get_song(&state.db, id)
        .await
        .map_err(|e| ApiError::from_store("Error fetching song", e))?;

    Ok(Json(split_verses(&song.text)))
}
