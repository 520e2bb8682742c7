//! Biometric sample matching
//!
//! Samples are opaque strings produced by the client capture widgets. The
//! only built-in strategy is exact equality; fuzzy matchers plug in behind the
//! same trait.

use async_trait::async_trait;

use crate::db::repository::{BiometricKind, CredentialRepository, RepoResult};

/// Resolves a presented biometric sample to the employee that owns it
#[async_trait]
pub trait SampleMatcher: Send + Sync {
    /// Id of the employee whose stored sample matches, if any
    async fn find_owner(&self, kind: BiometricKind, sample: &str) -> RepoResult<Option<i64>>;
}

/// Byte-for-byte equality through the indexed credential tables
#[derive(Clone)]
pub struct ExactMatcher {
    credentials: CredentialRepository,
}

impl ExactMatcher {
    pub fn new(credentials: CredentialRepository) -> Self {
        Self { credentials }
    }
}

#[async_trait]
impl SampleMatcher for ExactMatcher {
    async fn find_owner(&self, kind: BiometricKind, sample: &str) -> RepoResult<Option<i64>> {
        self.credentials.find_owner_by_sample(kind, sample).await
    }
}
