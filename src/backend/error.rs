use thiserror::Error;

pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Failures surfaced by the server directory.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("Authentication credentials were not provided")]
    AuthenticationFailed,

    #[error("{0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid seed file {path}: {reason}")]
    Seed { path: String, reason: String },

    #[error("Catalog lock poisoned")]
    LockPoisoned,

    #[error("Background task failed: {0}")]
    Join(String),
}

#[cfg(not(target_arch = "wasm32"))]
impl From<rusqlite::Error> for DirectoryError {
    fn from(err: rusqlite::Error) -> Self {
        DirectoryError::Storage(err.to_string())
    }
}
