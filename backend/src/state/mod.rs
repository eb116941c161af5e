// State management module
// Handles the song store, the playlist store and song record ordering

pub mod app_state;
pub mod song;

pub use app_state::{AppState, SharedState, DEFAULT_SORT_FIELD};
pub use song::{key_or_absent, Song, SongId, SongKey, ABSENT_KEY};
