/// Server error types and the uniform API error payload
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use playlist_core::PlaylistError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

pub type Result<T> = std::result::Result<T, ServerError>;

/// Message used when a bad request carries no identifiable field
pub const INVALID_PAYLOAD: &str = "Invalid request payload";

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Access denied: {0}")]
    Forbidden(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("No route for {0}")]
    NoRoute(String),

    #[error("Method {method} not allowed on {path}")]
    MethodNotAllowed { method: String, path: String },

    #[error(transparent)]
    Playlist(#[from] PlaylistError),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(String),


    #[error("Bcrypt error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),
}

impl From<playlist_storage::StorageError> for ServerError {
    fn from(err: playlist_storage::StorageError) -> Self {
        ServerError::Playlist(err.into())
    }
}

/// Body of every error response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    /// Reason phrase of the status code
    #[schema(example = "Not Found")]
    pub error: String,
    /// What went wrong
    #[schema(example = "Playlist 'Lista 1' not found")]
    pub message: String,
    /// HTTP status code
    #[schema(example = 404)]
    pub status: u16,
    /// When the error was produced
    pub timestamp: DateTime<Utc>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            error: status.canonical_reason().unwrap_or("Error").to_string(),
            message: message.into(),
            status: status.as_u16(),
            timestamp: Utc::now(),
        }
    }
}

impl ServerError {
    /// Status code and client-facing message; internal details are only logged
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            ServerError::Auth(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            ServerError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.clone()),
            ServerError::BadRequest(msg) if msg.trim().is_empty() => {
                (StatusCode::BAD_REQUEST, INVALID_PAYLOAD.to_string())
            }
            ServerError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ServerError::NoRoute(_) => (StatusCode::NOT_FOUND, self.to_string()),
            ServerError::MethodNotAllowed { .. } => {
                (StatusCode::METHOD_NOT_ALLOWED, self.to_string())
            }
            ServerError::Playlist(err) => match err {
                PlaylistError::Validation { .. } => (StatusCode::BAD_REQUEST, err.to_string()),
                PlaylistError::AlreadyExists(_) => (StatusCode::CONFLICT, err.to_string()),
                PlaylistError::NotFound(_) => (StatusCode::NOT_FOUND, err.to_string()),
                PlaylistError::ConcurrencyConflict { .. } => (
                    StatusCode::CONFLICT,
                    format!("{err}; reload the playlist and retry"),
                ),
                PlaylistError::Storage(msg) => {
                    tracing::error!("Storage error: {}", msg);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Internal server error".to_string(),
                    )
                }
            },
            ServerError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ServerError::Config(msg) => {
                tracing::error!("Config error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ServerError::Bcrypt(e) => {
                tracing::error!("Bcrypt error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        (status, Json(ApiError::new(status, message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: ServerError) -> (StatusCode, String) {
        err.status_and_message()
    }

    #[test]
    fn test_domain_errors_map_to_statuses() {
        assert_eq!(
            status_of(PlaylistError::not_found("x").into()).0,
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(PlaylistError::already_exists("x").into()).0,
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(
                PlaylistError::ConcurrencyConflict {
                    name: "x".to_string(),
                    expected: 3,
                }
                .into()
            )
            .0,
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_validation_message_names_the_field() {
        let (status, message) =
            status_of(PlaylistError::validation("nombre", "must not be blank").into());

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(message, "nombre: must not be blank");
    }

    #[test]
    fn test_empty_bad_request_uses_generic_message() {
        let (status, message) = status_of(ServerError::BadRequest(String::new()));

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(message, INVALID_PAYLOAD);
    }

    #[test]
    fn test_routing_errors() {
        let (status, message) = status_of(ServerError::NoRoute("/nowhere".to_string()));
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(message, "No route for /nowhere");

        let (status, message) = status_of(ServerError::MethodNotAllowed {
            method: "PATCH".to_string(),
            path: "/lists".to_string(),
        });
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(message, "Method PATCH not allowed on /lists");
    }

    #[test]
    fn test_internal_details_are_not_leaked() {
        let (status, message) =
            status_of(PlaylistError::storage("disk I/O error at /var/db").into());

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!message.contains("/var/db"));
    }

    #[test]
    fn test_api_error_uses_reason_phrase() {
        let error = ApiError::new(StatusCode::CONFLICT, "taken");

        assert_eq!(error.error, "Conflict");
        assert_eq!(error.status, 409);
        assert_eq!(error.message, "taken");
    }
}
