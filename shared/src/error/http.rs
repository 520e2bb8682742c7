//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // 404 Not Found
            Self::NotFound | Self::EmployeeNotFound => StatusCode::NOT_FOUND,

            // 401 Unauthorized
            Self::InvalidCredentials | Self::NoSuchAuthMethod => StatusCode::UNAUTHORIZED,

            // 500 Internal Server Error
            Self::InternalError | Self::DatabaseError | Self::ConfigError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }

            // 400 Bad Request (validation, malformed input, duplicate email)
            Self::ValidationFailed
            | Self::AlreadyExists
            | Self::InvalidRequest
            | Self::RequiredField
            | Self::EmployeeEmailExists => StatusCode::BAD_REQUEST,
        }
    }
}
