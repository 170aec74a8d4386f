/// Server services
pub mod auth;
pub mod playlists;

pub use auth::{AuthService, Principal};
pub use playlists::PlaylistService;
