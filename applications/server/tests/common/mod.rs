//! Common test utilities and fixtures
#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, Response},
    Router,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use playlist_core::PlaylistRepository;
use playlist_server::{build_app, config::ServerConfig};
use playlist_storage::SqlitePlaylistRepository;
use std::sync::Arc;
use tempfile::TempDir;

/// Test account credentials
pub mod fixtures {
    pub const USER: (&str, &str) = ("user", "user123");
    pub const ADMIN: (&str, &str) = ("admin", "admin123");
}

/// Temporary SQLite database with migrations applied
pub struct TestDb {
    pub repository: SqlitePlaylistRepository,
    _dir: TempDir,
}

impl TestDb {
    pub async fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let url = format!("sqlite://{}", dir.path().join("test.db").display());

        let pool = playlist_storage::create_pool(&url, 5).await.unwrap();
        playlist_storage::run_migrations(&pool).await.unwrap();

        Self {
            repository: SqlitePlaylistRepository::new(pool),
            _dir: dir,
        }
    }

    pub fn repository(&self) -> Arc<dyn PlaylistRepository> {
        Arc::new(self.repository.clone())
    }
}

/// Default configuration with the cheapest bcrypt cost
pub fn test_config() -> ServerConfig {
    let mut config = ServerConfig::default();
    config.auth.bcrypt_cost = 4;
    config
}

/// Router over a fresh database
pub async fn create_test_app() -> (Router, TestDb) {
    let db = TestDb::new().await;
    let app = build_app(&test_config(), db.repository()).unwrap();
    (app, db)
}

pub fn basic_auth((username, password): (&str, &str)) -> String {
    format!("Basic {}", STANDARD.encode(format!("{username}:{password}")))
}

pub fn json_request(
    method: &str,
    uri: &str,
    credentials: Option<(&str, &str)>,
    body: &serde_json::Value,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");

    if let Some(credentials) = credentials {
        builder = builder.header(header::AUTHORIZATION, basic_auth(credentials));
    }

    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn empty_request(method: &str, uri: &str, credentials: Option<(&str, &str)>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(credentials) = credentials {
        builder = builder.header(header::AUTHORIZATION, basic_auth(credentials));
    }

    builder.body(Body::empty()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn sample_playlist(name: &str) -> serde_json::Value {
    serde_json::json!({
        "nombre": name,
        "descripcion": "Clásicos",
        "canciones": [
            {
                "titulo": "Bohemian Rhapsody",
                "artista": "Queen",
                "album": "A Night at the Opera",
                "anno": "1975",
                "genero": "Rock"
            },
            {
                "titulo": "Imagine",
                "artista": "John Lennon",
                "album": "Imagine",
                "anno": "1971",
                "genero": "Pop"
            }
        ]
    })
}
