// Application state management
// Contains the song store and the playlist store

use super::song::{compare_values, Song, SongId};
use crate::error::AppError;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// State shared by every request handler
pub type SharedState = Arc<RwLock<AppState>>;

/// Field used to sort playlists when the request names none
pub const DEFAULT_SORT_FIELD: &str = "name";

/// Main application state
/// Owns all songs and playlists for the lifetime of the process
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Song store (id -> Song)
    pub songs: HashMap<SongId, Song>,
    /// Playlist store (name -> ordered song ids, duplicates allowed)
    pub playlists: HashMap<String, Vec<SongId>>,
}

impl AppState {
    /// Create a new application state with empty stores
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a fresh state for sharing between handlers
    pub fn shared() -> SharedState {
        Arc::new(RwLock::new(Self::new()))
    }

    /// Store a song under its id, replacing any existing record
    /// Returns the stored song
    pub fn create_song(&mut self, fields: Map<String, Value>) -> Result<&Song, AppError> {
        let (id, song) = Song::from_fields(fields).map_err(AppError::InvalidRequest)?;
        if self.songs.insert(id.clone(), song).is_some() {
            tracing::debug!(song_id = %id, "Replaced existing song");
        }
        Ok(&self.songs[&id])
    }

    /// Get a song by ID
    pub fn song(&self, id: &str) -> Result<&Song, AppError> {
        self.songs
            .get(id)
            .ok_or_else(|| AppError::SongNotFound(id.to_string()))
    }

    /// Merge `patch` into an existing song
    /// Returns the merged song
    pub fn update_song(&mut self, id: &str, patch: Map<String, Value>) -> Result<&Song, AppError> {
        let song = self
            .songs
            .get_mut(id)
            .ok_or_else(|| AppError::SongNotFound(id.to_string()))?;
        song.merge(patch);
        Ok(song)
    }

    /// Remove a song and every reference to it from all playlists
    /// Returns the removed song
    pub fn remove_song(&mut self, id: &str) -> Result<Song, AppError> {
        let song = self
            .songs
            .remove(id)
            .ok_or_else(|| AppError::SongNotFound(id.to_string()))?;

        let mut dropped = 0;
        for songs in self.playlists.values_mut() {
            let before = songs.len();
            songs.retain(|song_id| song_id != id);
            dropped += before - songs.len();
        }
        if dropped > 0 {
            tracing::info!(song_id = %id, dropped, "Removed deleted song from playlists");
        }

        Ok(song)
    }

    /// Get all songs as a vector, sorted by id
    pub fn songs_list(&self) -> Vec<&Song> {
        let mut ids: Vec<&SongId> = self.songs.keys().collect();
        ids.sort();
        ids.into_iter().map(|id| &self.songs[id]).collect()
    }

    /// Create a playlist, resetting it to empty if it already exists
    pub fn create_playlist(&mut self, name: String) {
        if let Some(previous) = self.playlists.insert(name.clone(), Vec::new()) {
            tracing::debug!(
                playlist = %name,
                previous_len = previous.len(),
                "Reset existing playlist"
            );
        }
    }

    /// Get a playlist's song ids by name
    pub fn playlist(&self, name: &str) -> Result<&[SongId], AppError> {
        self.playlists
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| AppError::PlaylistNotFound(name.to_string()))
    }

    fn playlist_mut(&mut self, name: &str) -> Result<&mut Vec<SongId>, AppError> {
        self.playlists
            .get_mut(name)
            .ok_or_else(|| AppError::PlaylistNotFound(name.to_string()))
    }

    /// Replace a playlist's songs when `songs` is given, otherwise leave them as they are
    /// Returns the resulting sequence
    pub fn update_playlist(
        &mut self,
        name: &str,
        songs: Option<Vec<SongId>>,
    ) -> Result<&[SongId], AppError> {
        let playlist = self.playlist_mut(name)?;
        if let Some(songs) = songs {
            *playlist = songs;
        }
        Ok(playlist.as_slice())
    }

    /// Remove a playlist
    /// Returns its songs
    pub fn remove_playlist(&mut self, name: &str) -> Result<Vec<SongId>, AppError> {
        self.playlists
            .remove(name)
            .ok_or_else(|| AppError::PlaylistNotFound(name.to_string()))
    }

    /// Append a known song to a playlist (duplicates allowed)
    pub fn add_to_playlist(&mut self, name: &str, song_id: &str) -> Result<(), AppError> {
        if !self.playlists.contains_key(name) {
            return Err(AppError::PlaylistNotFound(name.to_string()));
        }
        if !self.songs.contains_key(song_id) {
            return Err(AppError::SongNotFound(song_id.to_string()));
        }
        self.playlist_mut(name)?.push(song_id.to_string());
        Ok(())
    }

    /// Remove the first occurrence of a song from a playlist
    pub fn remove_from_playlist(&mut self, name: &str, song_id: &str) -> Result<(), AppError> {
        let playlist = self.playlist_mut(name)?;
        let position = playlist
            .iter()
            .position(|id| id == song_id)
            .ok_or_else(|| AppError::SongNotInPlaylist {
                song_id: song_id.to_string(),
                playlist: name.to_string(),
            })?;
        playlist.remove(position);
        Ok(())
    }

    /// Stable ascending sort of a playlist by a field of its songs
    ///
    /// Every referenced song must exist and carry `field`; otherwise the
    /// playlist is left unchanged and the first offending song is reported.
    pub fn sort_playlist(&mut self, name: &str, field: &str) -> Result<&[SongId], AppError> {
        let playlist = self.playlist(name)?;

        let mut keyed = Vec::with_capacity(playlist.len());
        for song_id in playlist {
            let song = self.song(song_id)?;
            let key = song
                .field(field)
                .ok_or_else(|| AppError::SortFieldMissing {
                    song_id: song_id.clone(),
                    field: field.to_string(),
                })?;
            keyed.push((key, song_id.clone()));
        }
        keyed.sort_by(|(a, _), (b, _)| compare_values(a, b));
        let sorted: Vec<SongId> = keyed.into_iter().map(|(_, id)| id).collect();

        let playlist = self.playlist_mut(name)?;
        *playlist = sorted;
        Ok(playlist.as_slice())
    }

    /// Get all playlist names with their lengths, sorted by name
    pub fn playlists_list(&self) -> Vec<(&String, usize)> {
        let mut playlists: Vec<(&String, usize)> = self
            .playlists
            .iter()
            .map(|(name, songs)| (name, songs.len()))
            .collect();
        playlists.sort_by(|a, b| a.0.cmp(b.0));
        playlists
    }
}
