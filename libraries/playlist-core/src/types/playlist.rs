/// Playlist domain type
use crate::types::Song;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Storage-assigned playlist identifier
pub type PlaylistId = i64;

/// Maximum length of a playlist name
pub const NAME_MAX_LEN: usize = 100;
/// Maximum length of a playlist description
pub const DESCRIPTION_MAX_LEN: usize = 500;

/// A named collection of songs
///
/// The name is the natural key and is unique ignoring case. `version` is the
/// optimistic concurrency token: storage bumps it on every successful update
/// and rejects writes carrying an older value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playlist {
    /// Storage identifier, `None` until persisted
    pub id: Option<PlaylistId>,

    /// Concurrency token
    pub version: i64,

    /// Playlist name
    pub name: String,

    /// Optional free text
    pub description: Option<String>,

    /// Creation timestamp, never changed after insert
    pub created_at: DateTime<Utc>,

    /// Last mutation timestamp
    pub updated_at: DateTime<Utc>,

    songs: Vec<Song>,
}

impl Playlist {
    /// Create a new, unsaved playlist without songs
    pub fn new(name: impl Into<String>, description: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            version: 0,
            name: name.into(),
            description,
            created_at: now,
            updated_at: now,
            songs: Vec::new(),
        }
    }

    /// Songs in insertion order
    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    /// Append a song unless an equal one is already present
    ///
    /// Returns `true` if the song was added.
    pub fn add_song(&mut self, song: Song) -> bool {
        if self.songs.contains(&song) {
            return false;
        }
        self.songs.push(song);
        true
    }

    /// Remove the song equal to `song`, returning it if it was present
    pub fn remove_song(&mut self, song: &Song) -> Option<Song> {
        let position = self.songs.iter().position(|s| s == song)?;
        Some(self.songs.remove(position))
    }

    /// Replace every song, keeping the first of any duplicates
    pub fn set_songs(&mut self, songs: impl IntoIterator<Item = Song>) {
        self.songs.clear();
        for song in songs {
            self.add_song(song);
        }
    }

    /// Refresh `updated_at`, never moving it before `created_at`
    pub fn touch(&mut self) {
        self.updated_at = Utc::now().max(self.created_at);
    }

    /// Whether the playlist has been persisted
    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }
}
