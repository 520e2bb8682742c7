//! Authentication Resolver
//!
//! Turns one presented credential into the employee it identifies:
//!
//! - email + password: the employee is looked up by email (any status), then
//!   the stored hash is verified
//! - fingerprint / face: the sample owner is resolved by the matcher, then
//!   loaded among Active employees
//!
//! Every mismatch is reported as the same `InvalidCredentials` error so the
//! response does not reveal which part was wrong.

use std::sync::Arc;

use shared::AppError;
use shared::models::{AuthRequest, Credentials, EmployeeView};
use thiserror::Error;

use super::matcher::SampleMatcher;
use super::password::PasswordService;
use crate::db::repository::{BiometricKind, CredentialRepository, EmployeeRepository, RepoError};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("No authentication method configured for this employee")]
    NoSuchAuthMethod,

    #[error(transparent)]
    Storage(#[from] RepoError),
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::BadRequest(msg) => AppError::invalid_request(msg),
            AuthError::InvalidCredentials => AppError::invalid_credentials(),
            AuthError::NoSuchAuthMethod => AppError::no_such_auth_method(),
            AuthError::Storage(e) => AppError::from(e),
        }
    }
}

#[derive(Clone)]
pub struct AuthResolver {
    employees: EmployeeRepository,
    credentials: CredentialRepository,
    matcher: Arc<dyn SampleMatcher>,
    passwords: PasswordService,
}

impl AuthResolver {
    pub fn new(
        employees: EmployeeRepository,
        credentials: CredentialRepository,
        matcher: Arc<dyn SampleMatcher>,
        passwords: PasswordService,
    ) -> Self {
        Self {
            employees,
            credentials,
            matcher,
            passwords,
        }
    }

    /// Validate the request shape, then authenticate
    pub async fn authenticate_request(&self, req: AuthRequest) -> Result<EmployeeView, AuthError> {
        let credentials =
            Credentials::try_from(req).map_err(|e| AuthError::BadRequest(e.message))?;
        self.authenticate(credentials).await
    }

    pub async fn authenticate(&self, credentials: Credentials) -> Result<EmployeeView, AuthError> {
        let method = credentials.method();
        let result = self.resolve(credentials).await;
        match &result {
            Ok(employee) => {
                tracing::debug!(method = %method, employee_id = employee.id, "Credential resolved")
            }
            Err(e) => tracing::debug!(method = %method, error = %e, "Credential rejected"),
        }
        result
    }

    async fn resolve(&self, credentials: Credentials) -> Result<EmployeeView, AuthError> {
        match credentials {
            Credentials::EmailPassword { email, password } => {
                self.by_password(&email, &password).await
            }
            Credentials::Fingerprint(sample) => {
                self.by_sample(BiometricKind::Fingerprint, &sample).await
            }
            Credentials::Face(sample) => self.by_sample(BiometricKind::Face, &sample).await,
        }
    }

    async fn by_password(&self, email: &str, password: &str) -> Result<EmployeeView, AuthError> {
        let employee = self
            .employees
            .find_by_email(email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let hash = self
            .credentials
            .find_password_hash(employee.id)
            .await?
            .ok_or(AuthError::NoSuchAuthMethod)?;

        if !self.passwords.verify(password, &hash) {
            return Err(AuthError::InvalidCredentials);
        }
        Ok(employee.into())
    }

    async fn by_sample(&self, kind: BiometricKind, sample: &str) -> Result<EmployeeView, AuthError> {
        let owner = self
            .matcher
            .find_owner(kind, sample)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        // Inactive owners cannot authenticate biometrically.
        let employee = self
            .employees
            .find_by_id(owner)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;
        Ok(employee.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{ExactMatcher, HashCost};
    use crate::db::DbService;
    use shared::models::NewEmployee;

    struct Fixture {
        resolver: AuthResolver,
        employees: EmployeeRepository,
    }

    async fn fixture() -> Fixture {
        let db = DbService::in_memory().await.unwrap();
        let passwords = PasswordService::new(HashCost::cheap()).unwrap();
        let employees = EmployeeRepository::new(db.pool.clone(), passwords.clone());
        let credentials = CredentialRepository::new(db.pool.clone());
        let resolver = AuthResolver::new(
            employees.clone(),
            credentials.clone(),
            Arc::new(ExactMatcher::new(credentials)),
            passwords,
        );
        Fixture { resolver, employees }
    }

    async fn add(employees: &EmployeeRepository, name: &str, email: &str) -> i64 {
        employees
            .create(&NewEmployee {
                name: name.into(),
                email: email.into(),
                department: "Tech".into(),
                role: "Eng".into(),
            })
            .await
            .unwrap()
    }

    fn password(email: &str, password: &str) -> Credentials {
        Credentials::EmailPassword {
            email: email.into(),
            password: password.into(),
        }
    }

    #[tokio::test]
    async fn test_password_success_and_mismatch() {
        let f = fixture().await;
        let id = add(&f.employees, "Ana", "ana@x.com").await;
        f.employees.add_email_credential(id, "secret1").await.unwrap();

        let view = f.resolver.authenticate(password("ana@x.com", "secret1")).await.unwrap();
        assert_eq!(view.id, id);
        assert_eq!(view.name, "Ana");

        let err = f.resolver.authenticate(password("ana@x.com", "wrong")).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_unknown_email() {
        let f = fixture().await;
        let err = f
            .resolver
            .authenticate(password("nobody@x.com", "secret1"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_password_not_configured() {
        let f = fixture().await;
        add(&f.employees, "Ana", "ana@x.com").await;
        let err = f
            .resolver
            .authenticate(password("ana@x.com", "secret1"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::NoSuchAuthMethod));
        assert_eq!(
            AppError::from(err).http_status(),
            http::StatusCode::UNAUTHORIZED
        );
    }

    #[tokio::test]
    async fn test_fingerprint_exact_match_only() {
        let f = fixture().await;
        let id = add(&f.employees, "Ana", "ana@x.com").await;
        f.employees.add_fingerprint_credential(id, "fp-abc123").await.unwrap();

        let view = f
            .resolver
            .authenticate(Credentials::Fingerprint("fp-abc123".into()))
            .await
            .unwrap();
        assert_eq!(view.id, id);

        let err = f
            .resolver
            .authenticate(Credentials::Fingerprint("fp-abc124".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_face_owner_must_be_active() {
        let f = fixture().await;
        let id = add(&f.employees, "Ana", "ana@x.com").await;
        f.employees.add_face_credential(id, "face-xyz").await.unwrap();
        f.employees.soft_delete(id).await.unwrap();

        let err = f
            .resolver
            .authenticate(Credentials::Face("face-xyz".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_request_shape_errors() {
        let f = fixture().await;
        let err = f
            .resolver
            .authenticate_request(AuthRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::BadRequest(_)));
        assert_eq!(
            AppError::from(err).http_status(),
            http::StatusCode::BAD_REQUEST
        );
    }
}
