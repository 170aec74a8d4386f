/// OpenAPI document for the playlist API
use crate::{
    api::playlists,
    dto::{PlaylistDto, SongDto},
    error::ApiError,
};
use utoipa::{
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
    Modify, OpenApi,
};

/// Served at `/api-docs/openapi.json` and browsable under `/swagger-ui`
#[derive(OpenApi)]
#[openapi(
    paths(
        playlists::create_playlist,
        playlists::list_playlists,
        playlists::get_playlist,
        playlists::update_playlist,
        playlists::delete_playlist,
    ),
    components(schemas(PlaylistDto, SongDto, ApiError)),
    modifiers(&BasicAuth),
    tags(
        (name = "Lists", description = "Manage playlists and their songs")
    ),
    info(
        title = "Playlist API",
        version = "v1",
        description = "Named playlists and their songs. Every endpoint except this \
                       documentation needs HTTP Basic credentials; deleting a playlist \
                       needs the ADMIN role.",
    )
)]
pub struct ApiDoc;

struct BasicAuth;

impl Modify for BasicAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "basic_auth",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Basic)),
            );
        }
    }
}
