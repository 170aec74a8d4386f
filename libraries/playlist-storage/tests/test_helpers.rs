//! Test helpers and fixtures for storage integration tests
//!
//! These helpers create test databases using REAL SQLite files (NOT in-memory)
//! so that every pooled connection sees the same schema and constraints.

#![allow(dead_code)]

use playlist_core::types::{Playlist, Song};
use sqlx::SqlitePool;
use tempfile::TempDir;

/// Test database wrapper that cleans up on drop
pub struct TestDb {
    pub pool: SqlitePool,
    _temp_dir: TempDir,
}

impl TestDb {
    /// Create a new test database with migrations applied
    pub async fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.db");
        let db_url = format!("sqlite://{}", db_path.display());

        let pool = playlist_storage::create_pool(&db_url, 5)
            .await
            .expect("Failed to create pool");

        playlist_storage::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        Self {
            pool,
            _temp_dir: temp_dir,
        }
    }

    /// Get the pool reference
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Count the song rows stored for a playlist
    pub async fn count_songs(&self, playlist_id: i64) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM songs WHERE playlist_id = ?")
            .bind(playlist_id)
            .fetch_one(&self.pool)
            .await
            .expect("Failed to count songs")
    }
}

/// Test fixture: a song with every optional field filled in
pub fn test_song(titulo: &str) -> Song {
    Song::new(
        titulo,
        "Artist",
        Some("Album".to_string()),
        Some("2024".to_string()),
        Some("Pop".to_string()),
    )
}

/// Test fixture: an unsaved playlist with the given song titles
pub fn test_playlist(name: &str, titles: &[&str]) -> Playlist {
    let mut playlist = Playlist::new(name, Some(format!("{name} description")));
    for title in titles {
        playlist.add_song(test_song(title));
    }
    playlist
}
