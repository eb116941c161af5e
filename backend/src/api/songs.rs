//! Song API handlers
//!
//! Contains HTTP request handlers for song CRUD operations.

use super::MessageResponse;
use crate::error::AppError;
use crate::state::{SharedState, Song, SongId};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
};
use serde::Serialize;
use serde_json::{Map, Value};

/// Response carrying a message and the affected song
#[derive(Debug, Serialize)]
pub struct SongMessageResponse {
    /// Human-readable message
    pub message: String,
    /// The song after the operation
    pub song: Song,
}

/// Response carrying a single song
#[derive(Debug, Serialize)]
pub struct SongResponse {
    /// The requested song
    pub song: Song,
}

/// Songs list response
#[derive(Debug, Serialize)]
pub struct SongsListResponse {
    /// All songs, ordered by id
    pub songs: Vec<Song>,
    /// Total number of songs
    pub count: usize,
}

/// GET /songs - List all songs
pub async fn list_songs(State(state): State<SharedState>) -> Json<SongsListResponse> {
    let state = state.read().await;
    let songs: Vec<Song> = state.songs_list().into_iter().cloned().collect();

    Json(SongsListResponse {
        count: songs.len(),
        songs,
    })
}

/// POST /songs - Create a song, replacing any song with the same id
pub async fn create_song(
    State(state): State<SharedState>,
    payload: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<(StatusCode, Json<SongMessageResponse>), AppError> {
    let Json(fields) = payload?;
    let mut state = state.write().await;
    let song = state.create_song(fields)?.clone();

    tracing::info!(song_id = ?song.field("id"), "Song created");

    Ok((
        StatusCode::CREATED,
        Json(SongMessageResponse {
            message: "Song created".to_string(),
            song,
        }),
    ))
}

/// GET /songs/:id - Get a specific song
pub async fn get_song(
    State(state): State<SharedState>,
    Path(id): Path<SongId>,
) -> Result<Json<SongResponse>, AppError> {
    let state = state.read().await;
    let song = state.song(&id)?.clone();

    Ok(Json(SongResponse { song }))
}

/// PUT /songs/:id - Merge fields into a song
pub async fn update_song(
    State(state): State<SharedState>,
    Path(id): Path<SongId>,
    payload: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<Json<SongMessageResponse>, AppError> {
    let Json(patch) = payload?;
    let mut state = state.write().await;
    let song = state.update_song(&id, patch)?.clone();

    Ok(Json(SongMessageResponse {
        message: "Song updated".to_string(),
        song,
    }))
}

/// DELETE /songs/:id - Delete a song and drop it from every playlist
pub async fn delete_song(
    State(state): State<SharedState>,
    Path(id): Path<SongId>,
) -> Result<Json<MessageResponse>, AppError> {
    let mut state = state.write().await;
    state.remove_song(&id)?;

    tracing::info!(song_id = %id, "Song deleted");

    Ok(Json(MessageResponse::new("Song deleted")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{AppState, ABSENT_KEY};
    use serde_json::json;

    fn fields(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[tokio::test]
    async fn test_create_and_get_song() {
        let state = AppState::shared();
        let request = fields(json!({"id": "s1", "name": "A"}));

        let (status, response) = create_song(State(state.clone()), Ok(Json(request)))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(response.message, "Song created");

        let response = get_song(State(state), Path("s1".to_string()))
            .await
            .unwrap();
        assert_eq!(response.song.field("name"), Some(&json!("A")));
    }

    #[tokio::test]
    async fn test_create_song_without_id_uses_absent_key() {
        let state = AppState::shared();
        let (status, _) = create_song(State(state.clone()), Ok(Json(fields(json!({"name": "A"})))))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::CREATED);

        let response = get_song(State(state), Path(ABSENT_KEY.to_string()))
            .await
            .unwrap();
        assert_eq!(response.song.field("name"), Some(&json!("A")));
    }

    #[tokio::test]
    async fn test_create_song_with_array_id() {
        let state = AppState::shared();
        let result = create_song(State(state.clone()), Ok(Json(fields(json!({"id": [1]}))))).await;
        match result {
            Err(AppError::InvalidRequest(_)) => {}
            Err(other) => panic!("Expected InvalidRequest error, got: {:?}", other),
            Ok(_) => panic!("Expected InvalidRequest error, got success"),
        }
        assert!(state.read().await.songs.is_empty());
    }

    #[tokio::test]
    async fn test_create_song_malformed_body() {
        let state = AppState::shared();
        let rejection = Json::<Map<String, Value>>::from_bytes(b"[1, 2]").unwrap_err();
        let result = create_song(State(state.clone()), Err(rejection)).await;
        match result {
            Err(error @ AppError::InvalidBody(_)) => {
                assert_eq!(error.status_code(), StatusCode::UNPROCESSABLE_ENTITY)
            }
            Err(other) => panic!("Expected InvalidBody error, got: {:?}", other),
            Ok(_) => panic!("Expected InvalidBody error, got success"),
        }
        assert!(state.read().await.songs.is_empty());
    }

    #[tokio::test]
    async fn test_update_song_not_found() {
        let state = AppState::shared();
        let result = update_song(
            State(state.clone()),
            Path("nonexistent".to_string()),
            Ok(Json(fields(json!({"name": "A"})))),
        )
        .await;
        assert!(matches!(result, Err(AppError::SongNotFound(_))));
        assert!(state.read().await.songs.is_empty());
    }

    #[tokio::test]
    async fn test_delete_song() {
        let state = AppState::shared();
        create_song(State(state.clone()), Ok(Json(fields(json!({"id": "s1"})))))
            .await
            .unwrap();

        let response = delete_song(State(state.clone()), Path("s1".to_string()))
            .await
            .unwrap();
        assert_eq!(response.message, "Song deleted");

        let result = delete_song(State(state), Path("s1".to_string())).await;
        assert!(matches!(result, Err(AppError::SongNotFound(_))));
    }

    #[tokio::test]
    async fn test_list_songs() {
        let state = AppState::shared();
        for id in ["b", "a"] {
            create_song(State(state.clone()), Ok(Json(fields(json!({"id": id})))))
                .await
                .unwrap();
        }

        let response = list_songs(State(state)).await;
        assert_eq!(response.count, 2);
        assert_eq!(response.songs[0].field("id"), Some(&json!("a")));
    }
}
