use std::sync::Arc;

use shared::AppError;

use crate::auth::{AuthResolver, ExactMatcher, PasswordService, SampleMatcher};
use crate::core::Config;
use crate::db::DbService;
use crate::db::repository::{CredentialRepository, EmployeeRepository};

/// Server state - shared handles to every service
///
/// Cloning is shallow: the pool and matcher are reference counted.
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | config | Config | Immutable settings |
/// | db | DbService | Record Store pool |
/// | passwords | PasswordService | argon2 hasher |
/// | matcher | Arc<dyn SampleMatcher> | Biometric lookup strategy |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub db: DbService,
    pub passwords: PasswordService,
    pub matcher: Arc<dyn SampleMatcher>,
}

impl ServerState {
    pub fn new(config: Config, db: DbService, passwords: PasswordService) -> Self {
        let matcher = Arc::new(ExactMatcher::new(CredentialRepository::new(db.pool.clone())));
        Self {
            config,
            db,
            passwords,
            matcher,
        }
    }

    /// Open the Record Store described by `config` and build the services
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        let passwords = PasswordService::new(config.password_hash)
            .map_err(|e| AppError::config(format!("Invalid password hash cost: {e}")))?;

        let db = if config.database.url == "sqlite::memory:" {
            DbService::in_memory().await?
        } else {
            DbService::connect(&config.database).await?
        };

        Ok(Self::new(config.clone(), db, passwords))
    }

    /// Swap the biometric matching strategy
    pub fn with_matcher(mut self, matcher: Arc<dyn SampleMatcher>) -> Self {
        self.matcher = matcher;
        self
    }

    pub fn employees(&self) -> EmployeeRepository {
        EmployeeRepository::new(self.db.pool.clone(), self.passwords.clone())
    }

    pub fn credentials(&self) -> CredentialRepository {
        CredentialRepository::new(self.db.pool.clone())
    }

    pub fn resolver(&self) -> AuthResolver {
        AuthResolver::new(
            self.employees(),
            self.credentials(),
            self.matcher.clone(),
            self.passwords.clone(),
        )
    }
}
