//! Playlist Server Library
//!
//! REST service for named playlists and their songs, protected by HTTP Basic
//! authentication with role-based access.
//!
//! This library exposes the core components for testing purposes.

pub mod api;
pub mod config;
pub mod dto;
pub mod error;
pub mod extract;
pub mod mapper;
pub mod middleware;
pub mod router;
pub mod services;
pub mod state;

// Re-export commonly used types for convenience
pub use config::{Role, ServerConfig};
pub use dto::{PlaylistDto, SongDto};
pub use error::{ApiError, Result, ServerError};
pub use router::{build_app, create_router};
pub use services::{auth::AuthService, playlists::PlaylistService};
pub use state::AppState;
