/// API route modules
pub mod docs;
pub mod playlists;
