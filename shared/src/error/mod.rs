//! Unified error system for the employee directory
//!
//! - [`ErrorCode`]: standardized error codes, each with a default message
//!   and an HTTP status
//! - [`AppError`]: error type carried from handlers to the HTTP layer
//! - [`ErrorBody`]: JSON body returned to clients on failure
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 8xxx: Employee errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode};
//!
//! let err = AppError::employee_not_found();
//! assert_eq!(err.code, ErrorCode::EmployeeNotFound);
//! assert_eq!(err.http_status(), shared::http::StatusCode::NOT_FOUND);
//!
//! let err = AppError::validation("name is required");
//! assert_eq!(err.http_status(), shared::http::StatusCode::BAD_REQUEST);
//! ```

mod codes;
mod http;
mod types;

pub use codes::ErrorCode;
pub use types::{AppError, AppResult, ErrorBody};
