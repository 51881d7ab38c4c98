//! Repository Module
//!
//! Free async functions over `&SqlitePool`, one module per table.
//! Repositories speak `i64` millis and cents only; date/timezone
//! conversion happens above this layer.

pub mod blackout_date;
pub mod booking;
pub mod booking_log;
pub mod profile;
pub mod trip_type;
pub mod vessel;

use thiserror::Error;

use crate::utils::AppError;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Database(msg) => AppError::Database(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
