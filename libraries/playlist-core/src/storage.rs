//! Persistence gateway for playlists

use crate::error::Result;
use crate::types::Playlist;
use async_trait::async_trait;

/// Storage of playlists and the songs they own
///
/// Name lookups ignore case. Implementations must enforce name uniqueness at
/// the storage layer and report a violation as `PlaylistError::AlreadyExists`,
/// since `exists_by_name_ignore_case` can be stale under concurrent writers.
#[async_trait]
pub trait PlaylistRepository: Send + Sync {
    /// Whether a playlist with this name exists, ignoring case
    async fn exists_by_name_ignore_case(&self, name: &str) -> Result<bool>;

    /// Find a playlist by name, ignoring case, with its songs loaded
    async fn find_by_name_ignore_case(&self, name: &str) -> Result<Option<Playlist>>;

    /// All playlists in creation order, songs included
    async fn find_all(&self) -> Result<Vec<Playlist>>;

    /// Insert (no id yet) or update (id set) a playlist and replace its songs
    ///
    /// Updates compare the in-memory `version` with the stored one and fail
    /// with `PlaylistError::ConcurrencyConflict` when they differ. The returned
    /// playlist carries the new id, version and timestamps.
    async fn save(&self, playlist: Playlist) -> Result<Playlist>;

    /// Delete a playlist and, by cascade, all of its songs
    async fn delete(&self, playlist: &Playlist) -> Result<()>;
}
