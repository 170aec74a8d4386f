/// Playlists API routes
use crate::{
    dto::PlaylistDto,
    error::{ApiError, Result, ServerError},
    extract::ApiJson,
    middleware::AuthenticatedUser,
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use url::Url;

/// POST /lists
/// Create a new playlist
#[utoipa::path(
    post,
    path = "/lists",
    tag = "Lists",
    request_body = PlaylistDto,
    responses(
        (status = 201, description = "Playlist created", body = PlaylistDto,
            headers(("Location" = String, description = "Path of the new playlist"))),
        (status = 400, description = "Invalid playlist", body = ApiError),
        (status = 401, description = "Not authenticated", body = ApiError),
        (status = 409, description = "Name already taken", body = ApiError),
    ),
    security(("basic_auth" = []))
)]
pub async fn create_playlist(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    ApiJson(dto): ApiJson<PlaylistDto>,
) -> Result<impl IntoResponse> {
    tracing::debug!(user = auth.username(), name = %dto.nombre, "Creating playlist");

    let created = app_state.playlists.create(dto).await?;
    let location = location_of(&created.nombre)?;

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(created),
    ))
}

/// GET /lists
/// Get all playlists
#[utoipa::path(
    get,
    path = "/lists",
    tag = "Lists",
    responses(
        (status = 200, description = "Every playlist", body = [PlaylistDto]),
        (status = 401, description = "Not authenticated", body = ApiError),
    ),
    security(("basic_auth" = []))
)]
pub async fn list_playlists(State(app_state): State<AppState>) -> Result<Json<Vec<PlaylistDto>>> {
    let playlists = app_state.playlists.find_all().await?;
    Ok(Json(playlists))
}

/// GET /lists/:list_name
/// Get a playlist by name, ignoring case
#[utoipa::path(
    get,
    path = "/lists/{listName}",
    tag = "Lists",
    params(("listName" = String, Path, description = "Playlist name, compared ignoring case")),
    responses(
        (status = 200, description = "The playlist", body = PlaylistDto),
        (status = 401, description = "Not authenticated", body = ApiError),
        (status = 404, description = "No such playlist", body = ApiError),
    ),
    security(("basic_auth" = []))
)]
pub async fn get_playlist(
    Path(list_name): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Json<PlaylistDto>> {
    let playlist = app_state.playlists.find_by_name(&list_name).await?;
    Ok(Json(playlist))
}

/// PUT /lists/:list_name
/// Replace the description and/or songs of a playlist
#[utoipa::path(
    put,
    path = "/lists/{listName}",
    tag = "Lists",
    params(("listName" = String, Path, description = "Playlist name, compared ignoring case")),
    request_body(content = PlaylistDto, description = "Fields to change; `nombre` is ignored"),
    responses(
        (status = 200, description = "The updated playlist", body = PlaylistDto),
        (status = 400, description = "Invalid playlist", body = ApiError),
        (status = 401, description = "Not authenticated", body = ApiError),
        (status = 404, description = "No such playlist", body = ApiError),
        (status = 409, description = "Modified concurrently, reload and retry", body = ApiError),
    ),
    security(("basic_auth" = []))
)]
pub async fn update_playlist(
    Path(list_name): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    ApiJson(dto): ApiJson<PlaylistDto>,
) -> Result<Json<PlaylistDto>> {
    tracing::debug!(user = auth.username(), name = %list_name, "Updating playlist");

    let playlist = app_state.playlists.update(&list_name, dto).await?;
    Ok(Json(playlist))
}

/// DELETE /lists/:list_name
/// Delete a playlist and its songs
#[utoipa::path(
    delete,
    path = "/lists/{listName}",
    tag = "Lists",
    params(("listName" = String, Path, description = "Playlist name, compared ignoring case")),
    responses(
        (status = 204, description = "Playlist deleted"),
        (status = 401, description = "Not authenticated", body = ApiError),
        (status = 403, description = "ADMIN role required", body = ApiError),
        (status = 404, description = "No such playlist", body = ApiError),
    ),
    security(("basic_auth" = []))
)]
pub async fn delete_playlist(
    Path(list_name): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<StatusCode> {
    tracing::debug!(user = auth.username(), name = %list_name, "Deleting playlist");

    app_state.playlists.delete_by_name(&list_name).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Path of a playlist, with the name percent-encoded as one segment
fn location_of(name: &str) -> Result<String> {
    // `.` and `..` are dot segments and would be dropped by the URL parser
    if matches!(name, "." | "..") {
        return Ok(format!("/lists/{}", "%2E".repeat(name.len())));
    }

    let mut url = Url::parse("http://localhost/lists")
        .map_err(|e| ServerError::Internal(e.to_string()))?;

    url.path_segments_mut()
        .map_err(|()| ServerError::Internal("Base URL cannot have segments".to_string()))?
        .push(name);

    Ok(url.path().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_encodes_name() {
        assert_eq!(location_of("Rock").unwrap(), "/lists/Rock");
        assert_eq!(location_of("Lista 1").unwrap(), "/lists/Lista%201");
        assert_eq!(location_of("AC/DC").unwrap(), "/lists/AC%2FDC");
        assert_eq!(location_of(".").unwrap(), "/lists/%2E");
        assert_eq!(location_of("..").unwrap(), "/lists/%2E%2E");
        assert_eq!(location_of("...").unwrap(), "/lists/...");
    }
}
