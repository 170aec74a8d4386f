/// Shared application state
use crate::services::PlaylistService;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub playlists: Arc<PlaylistService>,
}

impl AppState {
    pub fn new(playlists: Arc<PlaylistService>) -> Self {
        Self { playlists }
    }
}
