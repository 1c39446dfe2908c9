use thiserror::Error;

use crate::utils::AppError;

/// Startup and serving errors
///
/// Request handlers use [`AppError`]; this type covers what can fail
/// before or around the HTTP loop.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<AppError> for ServerError {
    fn from(err: AppError) -> Self {
        ServerError::Database(err.message)
    }
}

/// Result type for server lifecycle operations
pub type Result<T> = std::result::Result<T, ServerError>;
