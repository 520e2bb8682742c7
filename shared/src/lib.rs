//! Shared types for the employee directory
//!
//! Wire and domain types used by `directory-server` and by any Rust client
//! talking to it: the unified error system, employee models and the
//! authentication request/response DTOs.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use error::{AppError, AppResult, ErrorBody, ErrorCode};
pub use http;
