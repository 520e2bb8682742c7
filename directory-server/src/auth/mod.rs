//! Authentication module
//!
//! - [`PasswordService`] - argon2 password hashing
//! - [`SampleMatcher`] - pluggable biometric lookup, [`ExactMatcher`] by default
//! - [`AuthResolver`] - credential to employee resolution

pub mod matcher;
pub mod password;
pub mod resolver;

pub use matcher::{ExactMatcher, SampleMatcher};
pub use password::{HashCost, PasswordService};
pub use resolver::{AuthError, AuthResolver};
