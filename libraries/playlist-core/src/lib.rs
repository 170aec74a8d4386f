//! Playlist Core
//!
//! Storage-agnostic domain types, the persistence gateway trait, and error
//! handling for the playlist API.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Playlist` and the `Song` records it owns
//! - **Core Traits**: `PlaylistRepository`, the persistence gateway
//! - **Error Handling**: Unified `PlaylistError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use playlist_core::types::{Playlist, Song};
//!
//! let mut playlist = Playlist::new("Road trip", Some("Songs for the car".to_string()));
//! playlist.add_song(Song::new("Viva la Vida", "Coldplay", None, Some("2008".into()), None));
//!
//! // Songs are compared by value, so the duplicate is ignored
//! playlist.add_song(Song::new("Viva la Vida", "Coldplay", None, Some("2008".into()), None));
//! assert_eq!(playlist.songs().len(), 1);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod storage;
pub mod types;

// Re-export commonly used types
pub use error::{PlaylistError, Result};
pub use storage::PlaylistRepository;
pub use types::{Playlist, PlaylistId, Song, SongId};
