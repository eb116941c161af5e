//! Playlist Manager Backend Library
//!
//! This library exposes modules for testing and external use.
//! The main binary is in `src/main.rs`.

pub mod api;
pub mod config;
pub mod error;
pub mod server;
/// Application state management
///
/// Holds the song and playlist stores shared by all handlers.
pub mod state;
