/// Storage-specific errors
use thiserror::Error;

/// Result type alias using `StorageError`
pub type Result<T> = std::result::Result<T, StorageError>;

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// The name (ignoring case) is already taken by another playlist
    #[error("Playlist '{0}' already exists")]
    Duplicate(String),

    /// Entity not found
    #[error("Playlist not found: {0}")]
    NotFound(String),

    /// Version check failed on update
    #[error("Stale version {expected} for playlist '{name}'")]
    StaleVersion { name: String, expected: i64 },

    /// Stored timestamp cannot be represented
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(i64),

    /// Migration error
    #[error(transparent)]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Database error from `SQLx`
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl StorageError {
    /// Map a write failure, turning a unique-constraint violation into `Duplicate`
    pub(crate) fn from_write(err: sqlx::Error, name: &str) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                Self::Duplicate(name.to_string())
            }
            _ => Self::Database(err),
        }
    }
}

impl From<StorageError> for playlist_core::PlaylistError {
    fn from(err: StorageError) -> Self {
        use playlist_core::PlaylistError;

        match err {
            StorageError::Duplicate(name) => PlaylistError::AlreadyExists(name),
            StorageError::NotFound(name) => PlaylistError::NotFound(name),
            StorageError::StaleVersion { name, expected } => {
                PlaylistError::ConcurrencyConflict { name, expected }
            }
            other => PlaylistError::storage(other.to_string()),
        }
    }
}
