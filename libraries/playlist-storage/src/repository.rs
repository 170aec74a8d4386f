use crate::playlists;
use async_trait::async_trait;
use playlist_core::{error::Result, storage::PlaylistRepository, types::Playlist};
use sqlx::SqlitePool;

/// Playlist gateway backed by `SQLite`
#[derive(Clone)]
pub struct SqlitePlaylistRepository {
    pool: SqlitePool,
}

impl SqlitePlaylistRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlaylistRepository for SqlitePlaylistRepository {
    async fn exists_by_name_ignore_case(&self, name: &str) -> Result<bool> {
        Ok(playlists::exists_by_name(&self.pool, name).await?)
    }

    async fn find_by_name_ignore_case(&self, name: &str) -> Result<Option<Playlist>> {
        Ok(playlists::get_by_name(&self.pool, name).await?)
    }

    async fn find_all(&self) -> Result<Vec<Playlist>> {
        Ok(playlists::get_all(&self.pool).await?)
    }

    async fn save(&self, playlist: Playlist) -> Result<Playlist> {
        let saved = if playlist.is_new() {
            playlists::insert(&self.pool, playlist).await?
        } else {
            playlists::update(&self.pool, playlist).await?
        };
        Ok(saved)
    }

    async fn delete(&self, playlist: &Playlist) -> Result<()> {
        let Some(id) = playlist.id else {
            return Err(playlist_core::PlaylistError::not_found(&playlist.name));
        };
        Ok(playlists::delete(&self.pool, id, &playlist.name).await?)
    }
}
