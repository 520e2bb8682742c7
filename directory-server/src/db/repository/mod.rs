//! Repository Module
//!
//! CRUD operations over the Record Store. Repositories are cheap to clone and
//! hold the pool handed to them at construction.

pub mod credential;
pub mod employee;

pub use credential::{BiometricKind, CredentialRepository};
pub use employee::EmployeeRepository;

use shared::AppError;
use sqlx::error::ErrorKind;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        // The storage constraints are the final authority on uniqueness and linkage.
        if let Some(db_err) = err.as_database_error() {
            match db_err.kind() {
                ErrorKind::UniqueViolation => {
                    return RepoError::Duplicate(db_err.message().to_string());
                }
                ErrorKind::ForeignKeyViolation => {
                    return RepoError::NotFound("Referenced employee does not exist".into());
                }
                _ => {}
            }
        }
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(shared::ErrorCode::NotFound, msg),
            RepoError::Duplicate(msg) => AppError::conflict(msg),
            RepoError::Validation(msg) => AppError::validation(msg),
            RepoError::Database(msg) => AppError::database(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
