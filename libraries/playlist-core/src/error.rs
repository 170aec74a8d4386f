/// Core error types for the playlist API
use thiserror::Error;

/// Result type alias using `PlaylistError`
pub type Result<T> = std::result::Result<T, PlaylistError>;

/// Domain failures raised by the service and the persistence gateway
#[derive(Error, Debug)]
pub enum PlaylistError {
    /// Malformed or missing required input
    #[error("{field}: {reason}")]
    Validation {
        /// Path of the offending field (e.g. `canciones[0].titulo`)
        field: String,
        /// Human readable reason
        reason: String,
    },

    /// A playlist with the same name (ignoring case) already exists
    #[error("Playlist '{0}' already exists")]
    AlreadyExists(String),

    /// No playlist matches the name (ignoring case)
    #[error("Playlist '{0}' not found")]
    NotFound(String),

    /// The stored version moved on since the playlist was read
    #[error("Playlist '{name}' was modified concurrently (expected version {expected})")]
    ConcurrencyConflict {
        /// Name of the playlist being written
        name: String,
        /// Version the writer last read
        expected: i64,
    },

    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl PlaylistError {
    /// Create a validation error
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    /// Create an already exists error
    pub fn already_exists(name: impl Into<String>) -> Self {
        Self::AlreadyExists(name.into())
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }
}
