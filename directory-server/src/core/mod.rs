//! Core module - server configuration, state and errors
//!
//! - [`Config`] - server configuration
//! - [`ServerState`] - shared services handed to every handler
//! - [`Server`] - HTTP server
//! - [`ServerError`] - startup and runtime errors

pub mod config;
pub mod error;
pub mod server;
pub mod state;

pub use config::{Config, ConfigError, DatabaseConfig};
pub use error::{Result, ServerError};
pub use server::Server;
pub use state::ServerState;
