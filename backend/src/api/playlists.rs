//! Playlist API handlers
//!
//! Contains HTTP request handlers for playlist CRUD operations and for
//! adding, removing and sorting the songs of a playlist.

use super::{has_json_content_type, MessageResponse};
use crate::error::AppError;
use crate::state::{key_or_absent, SharedState, SongId, SongKey, DEFAULT_SORT_FIELD};
use axum::{
    body::Bytes,
    extract::{rejection::JsonRejection, Path, State},
    http::{HeaderMap, StatusCode},
    response::Json,
};
use serde::{Deserialize, Serialize};

/// Response carrying a playlist's songs
#[derive(Debug, Serialize)]
pub struct PlaylistResponse {
    /// Song ids in playlist order
    pub playlist: Vec<SongId>,
}

/// Response carrying a message and a playlist's songs
#[derive(Debug, Serialize)]
pub struct PlaylistMessageResponse {
    /// Human-readable message
    pub message: String,
    /// Song ids in playlist order
    pub playlist: Vec<SongId>,
}

/// Response to playlist creation
#[derive(Debug, Serialize)]
pub struct PlaylistCreatedResponse {
    /// Human-readable message
    pub message: String,
    /// Name of the created playlist
    pub playlist: String,
}

/// Playlist summary used in listings
#[derive(Debug, Serialize)]
pub struct PlaylistSummary {
    /// Playlist name
    pub name: String,
    /// Number of entries, duplicates included
    pub song_count: usize,
}

/// Playlists list response
#[derive(Debug, Serialize)]
pub struct PlaylistsListResponse {
    /// All playlists, ordered by name
    pub playlists: Vec<PlaylistSummary>,
    /// Total number of playlists
    pub count: usize,
}

/// Create playlist request
#[derive(Debug, Deserialize)]
pub struct CreatePlaylistRequest {
    /// Name of the playlist; a missing name is stored under the absent key
    pub name: Option<SongKey>,
}

/// Update playlist request
#[derive(Debug, Default, Deserialize)]
pub struct UpdatePlaylistRequest {
    /// Replacement song ids (optional); `null` entries name the absent key
    pub songs: Option<Vec<Option<SongKey>>>,
}

/// Add/remove song request
#[derive(Debug, Deserialize)]
pub struct PlaylistSongRequest {
    /// Song to add or remove; a missing id names the absent key
    pub song_id: Option<SongKey>,
}

/// Sort playlist request
#[derive(Debug, Default, Deserialize)]
pub struct SortPlaylistRequest {
    /// Song field to sort by (defaults to "name")
    pub sort_by: Option<String>,
}

/// GET /playlists - List all playlists
pub async fn list_playlists(State(state): State<SharedState>) -> Json<PlaylistsListResponse> {
    let state = state.read().await;
    let playlists: Vec<PlaylistSummary> = state
        .playlists_list()
        .into_iter()
        .map(|(name, song_count)| PlaylistSummary {
            name: name.clone(),
            song_count,
        })
        .collect();

    Json(PlaylistsListResponse {
        count: playlists.len(),
        playlists,
    })
}

/// POST /playlists - Create an empty playlist, resetting any playlist with the same name
pub async fn create_playlist(
    State(state): State<SharedState>,
    payload: Result<Json<CreatePlaylistRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<PlaylistCreatedResponse>), AppError> {
    let Json(request) = payload?;
    let name = key_or_absent(request.name);

    state.write().await.create_playlist(name.clone());
    tracing::info!(playlist = %name, "Playlist created");

    Ok((
        StatusCode::CREATED,
        Json(PlaylistCreatedResponse {
            message: "Playlist created".to_string(),
            playlist: name,
        }),
    ))
}

/// GET /playlists/:name - Get a playlist's songs
pub async fn get_playlist(
    State(state): State<SharedState>,
    Path(name): Path<String>,
) -> Result<Json<PlaylistResponse>, AppError> {
    let state = state.read().await;
    let playlist = state.playlist(&name)?.to_vec();

    Ok(Json(PlaylistResponse { playlist }))
}

/// PUT /playlists/:name - Replace a playlist's songs
pub async fn update_playlist(
    State(state): State<SharedState>,
    Path(name): Path<String>,
    payload: Result<Json<UpdatePlaylistRequest>, JsonRejection>,
) -> Result<Json<PlaylistMessageResponse>, AppError> {
    let Json(request) = payload?;
    let songs = request
        .songs
        .map(|songs| songs.into_iter().map(key_or_absent).collect());

    let mut state = state.write().await;
    let playlist = state.update_playlist(&name, songs)?.to_vec();

    Ok(Json(PlaylistMessageResponse {
        message: "Playlist updated".to_string(),
        playlist,
    }))
}

/// DELETE /playlists/:name - Delete a playlist
pub async fn delete_playlist(
    State(state): State<SharedState>,
    Path(name): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    state.write().await.remove_playlist(&name)?;
    tracing::info!(playlist = %name, "Playlist deleted");

    Ok(Json(MessageResponse::new("Playlist deleted")))
}

/// POST /playlists/:name/add - Append a song to a playlist
pub async fn add_song(
    State(state): State<SharedState>,
    Path(name): Path<String>,
    payload: Result<Json<PlaylistSongRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Json(request) = payload?;
    let song_id = key_or_absent(request.song_id);
    state.write().await.add_to_playlist(&name, &song_id)?;
    tracing::debug!(playlist = %name, song_id = %song_id, "Song added to playlist");

    Ok(Json(MessageResponse::new("Song added to playlist")))
}

/// POST /playlists/:name/remove - Remove the first occurrence of a song from a playlist
pub async fn remove_song(
    State(state): State<SharedState>,
    Path(name): Path<String>,
    payload: Result<Json<PlaylistSongRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Json(request) = payload?;
    let song_id = key_or_absent(request.song_id);
    state.write().await.remove_from_playlist(&name, &song_id)?;
    tracing::debug!(playlist = %name, song_id = %song_id, "Song removed from playlist");

    Ok(Json(MessageResponse::new("Song removed from playlist")))
}

/// Read an optional JSON body: empty means defaults, anything else must be valid JSON
fn sort_request(headers: &HeaderMap, body: &Bytes) -> Result<SortPlaylistRequest, AppError> {
    if body.is_empty() {
        return Ok(SortPlaylistRequest::default());
    }
    if !has_json_content_type(headers) {
        return Err(AppError::UnsupportedContentType);
    }
    let Json(request) = Json::<SortPlaylistRequest>::from_bytes(body)?;
    Ok(request)
}

/// POST /playlists/:name/sort - Sort a playlist by a field of its songs
///
/// The body is optional; without one the playlist is sorted by `name`.
pub async fn sort_playlist(
    State(state): State<SharedState>,
    Path(name): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<PlaylistMessageResponse>, AppError> {
    let sort_by = sort_request(&headers, &body)?
        .sort_by
        .unwrap_or_else(|| DEFAULT_SORT_FIELD.to_string());

    let mut state = state.write().await;
    let playlist = state.sort_playlist(&name, &sort_by)?.to_vec();
    tracing::debug!(playlist = %name, sort_by = %sort_by, "Playlist sorted");

    Ok(Json(PlaylistMessageResponse {
        message: "Playlist sorted".to_string(),
        playlist,
    }))
}
