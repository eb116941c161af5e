//! Error types and error handling for the application
//!
//! This module defines custom error types that can be converted to HTTP responses.
//! All errors implement `IntoResponse` to provide consistent error formatting.

use crate::state::SongId;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error types
///
/// Every failure a store operation can report is a variant here. Each variant
/// maps to exactly one HTTP status via `IntoResponse`.
#[derive(Error, Debug)]
pub enum AppError {
    /// Song with the given ID was not found
    #[error("Song not found: {0}")]
    SongNotFound(SongId),

    /// Playlist with the given name was not found
    #[error("Playlist not found: {0}")]
    PlaylistNotFound(String),

    /// Playlist exists but does not contain the song
    #[error("Song {song_id} not found in playlist {playlist}")]
    SongNotInPlaylist {
        /// Song that was expected in the playlist
        song_id: SongId,
        /// Playlist that was searched
        playlist: String,
    },

    /// A song referenced by a playlist has no value for the sort field
    #[error("Song {song_id} has no field '{field}' to sort by")]
    SortFieldMissing {
        /// Song lacking the field
        song_id: SongId,
        /// Requested sort field
        field: String,
    },

    /// Request body carries an unusable value
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Request body could not be read as JSON of the expected shape
    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),

    /// Request carries a body that is not declared as JSON
    #[error("Expected request with `Content-Type: application/json`")]
    UnsupportedContentType,

    /// Internal server error (catch-all for unexpected errors)
    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::SongNotFound(_) => StatusCode::NOT_FOUND,
            AppError::PlaylistNotFound(_) => StatusCode::NOT_FOUND,
            AppError::SongNotInPlaylist { .. } => StatusCode::NOT_FOUND,
            AppError::SortFieldMissing { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidBody(rejection) => rejection.status(),
            AppError::UnsupportedContentType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        }

        let body = Json(json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}
