//! Error types and the JSON error body

use super::codes::ErrorCode;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Application error with an error code and a human-readable message
///
/// System errors (9xxx) keep the underlying failure text in `details`, so the
/// client receives a generic headline plus the underlying error message.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Underlying error text (system errors) or extra context
    pub details: Option<String>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Attach extra detail text
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Replace the headline of a system error, keeping the underlying text in `details`.
    ///
    /// Client-facing errors (4xx) keep their own message.
    pub fn context(mut self, headline: impl Into<String>) -> Self {
        if self.code.is_system() {
            if self.details.is_none() {
                self.details = Some(std::mem::take(&mut self.message));
            }
            self.message = headline.into();
        }
        self
    }

    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    // ==================== Convenience constructors ====================

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    /// Create a required-field error naming the missing fields
    pub fn required_fields(fields: &[&str]) -> Self {
        Self::with_message(
            ErrorCode::RequiredField,
            format!("{} are required", fields.join(", ")),
        )
    }

    /// Create a malformed/ambiguous request error
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InvalidRequest, msg)
    }

    /// Create an employee not found error
    pub fn employee_not_found() -> Self {
        Self::new(ErrorCode::EmployeeNotFound)
    }

    /// Create a duplicate email error
    pub fn email_exists() -> Self {
        Self::new(ErrorCode::EmployeeEmailExists)
    }

    /// Create a conflict error with a custom message
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::AlreadyExists, msg)
    }

    /// Create an invalid credentials error
    pub fn invalid_credentials() -> Self {
        Self::new(ErrorCode::InvalidCredentials)
    }

    /// Create a missing authentication method error
    pub fn no_such_auth_method() -> Self {
        Self::new(ErrorCode::NoSuchAuthMethod)
    }

    /// Create an internal error carrying the underlying failure text
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError).with_details(msg)
    }

    /// Create a database error carrying the underlying failure text
    pub fn database(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::DatabaseError).with_details(msg)
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError).with_details(msg)
    }
}

/// JSON body returned on failure
///
/// ```json
/// { "error": "Failed to create employee", "details": "database is locked" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable message
    pub error: String,
    /// Underlying error text, present for server errors
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl From<&AppError> for ErrorBody {
    fn from(err: &AppError) -> Self {
        Self {
            error: err.message.clone(),
            details: err.details.clone(),
        }
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

// ===== Axum Integration =====

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;

        let status = self.http_status();

        if self.code.is_system() {
            tracing::error!(
                code = %self.code,
                message = %self.message,
                details = self.details.as_deref().unwrap_or(""),
                "System error occurred"
            );
        }

        (status, Json(ErrorBody::from(&self))).into_response()
    }
}
