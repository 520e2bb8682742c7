//! Employee Directory Server
//!
//! Employee records with soft delete, plus multi-modal authentication
//! (email + password, fingerprint sample, face sample).
//!
//! # Module layout
//!
//! ```text
//! directory-server/src/
//! ├── core/          # Config, state, server, errors
//! ├── auth/          # Password hashing, sample matching, resolver
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # SQLite pool, migrations, repositories
//! └── utils/         # Logging
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod utils;

pub use auth::{AuthResolver, PasswordService, SampleMatcher};
pub use core::{Config, Server, ServerError, ServerState};
pub use db::DbService;
pub use utils::init_logger;
