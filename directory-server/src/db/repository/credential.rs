//! Credential Repository
//!
//! Read side of the credential tables used by authentication. Credentials are
//! written through [`super::EmployeeRepository`] at employee creation.

use shared::models::EmployeeStatus;
use sqlx::SqlitePool;

use super::RepoResult;

/// Biometric credential kinds stored as opaque samples
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BiometricKind {
    Fingerprint,
    Face,
}

impl BiometricKind {
    fn table(&self) -> &'static str {
        match self {
            BiometricKind::Fingerprint => "fingerprint_credentials",
            BiometricKind::Face => "face_credentials",
        }
    }
}

#[derive(Clone)]
pub struct CredentialRepository {
    pool: SqlitePool,
}

impl CredentialRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Stored password hash for an employee, if one was registered
    pub async fn find_password_hash(&self, employee_id: i64) -> RepoResult<Option<String>> {
        let hash = sqlx::query_scalar(
            "SELECT password_hash FROM email_credentials WHERE employee_id = ? LIMIT 1",
        )
        .bind(employee_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(hash)
    }

    /// Active owner of a biometric sample that is byte-for-byte equal to `sample`
    ///
    /// Samples are not unique across employees; rows of Inactive owners are skipped.
    pub async fn find_owner_by_sample(
        &self,
        kind: BiometricKind,
        sample: &str,
    ) -> RepoResult<Option<i64>> {
        let sql = format!(
            "SELECT c.employee_id FROM {} c JOIN employees e ON e.id = c.employee_id \
             WHERE c.sample = ? AND e.status = ? ORDER BY c.employee_id LIMIT 1",
            kind.table()
        );
        let owner = sqlx::query_scalar(&sql)
            .bind(sample)
            .bind(EmployeeStatus::Active.as_str())
            .fetch_optional(&self.pool)
            .await?;
        Ok(owner)
    }
}
