//! Authentication DTOs

use serde::{Deserialize, Serialize};

use super::employee::{CredentialMethod, EmployeeView};
use super::serde_helpers;
use crate::error::{AppError, AppResult};

/// Body of `POST /api/employees/authenticate`
///
/// Exactly one shape must be supplied: `email` + `password`,
/// `fingerprintSample`, or `faceSample`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(
        default,
        deserialize_with = "serde_helpers::lossy_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub fingerprint_sample: Option<String>,
    #[serde(
        default,
        deserialize_with = "serde_helpers::lossy_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub face_sample: Option<String>,
}

/// A single credential presented for authentication
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    EmailPassword { email: String, password: String },
    Fingerprint(String),
    Face(String),
}

impl Credentials {
    pub fn method(&self) -> CredentialMethod {
        match self {
            Credentials::EmailPassword { .. } => CredentialMethod::Password,
            Credentials::Fingerprint(_) => CredentialMethod::Fingerprint,
            Credentials::Face(_) => CredentialMethod::Face,
        }
    }
}

// Secret material stays out of logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credentials::EmailPassword { email, .. } => f
                .debug_struct("EmailPassword")
                .field("email", email)
                .finish_non_exhaustive(),
            Credentials::Fingerprint(_) => f.write_str("Fingerprint(..)"),
            Credentials::Face(_) => f.write_str("Face(..)"),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl TryFrom<AuthRequest> for Credentials {
    type Error = AppError;

    fn try_from(req: AuthRequest) -> AppResult<Self> {
        let email = non_empty(req.email);
        let password = non_empty(req.password);
        let fingerprint = non_empty(req.fingerprint_sample);
        let face = non_empty(req.face_sample);

        let supplied = [email.is_some() || password.is_some(), fingerprint.is_some(), face.is_some()]
            .into_iter()
            .filter(|s| *s)
            .count();
        if supplied == 0 {
            return Err(AppError::invalid_request(
                "An authentication method must be provided",
            ));
        }
        if supplied > 1 {
            return Err(AppError::invalid_request(
                "Only one authentication method may be provided",
            ));
        }

        match (email, password, fingerprint, face) {
            (Some(email), Some(password), None, None) => {
                Ok(Credentials::EmailPassword { email, password })
            }
            (None, None, Some(sample), None) => Ok(Credentials::Fingerprint(sample)),
            (None, None, None, Some(sample)) => Ok(Credentials::Face(sample)),
            _ => Err(AppError::invalid_request(
                "Email authentication requires both email and password",
            )),
        }
    }
}

/// `200` body of a successful authentication
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub message: String,
    pub employee: EmployeeView,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn parse(json: &str) -> AppResult<Credentials> {
        let req: AuthRequest = serde_json::from_str(json).unwrap();
        Credentials::try_from(req)
    }

    #[test]
    fn test_email_password_shape() {
        let creds = parse(r#"{"email":"ana@x.com","password":"secret1"}"#).unwrap();
        assert_eq!(
            creds,
            Credentials::EmailPassword {
                email: "ana@x.com".into(),
                password: "secret1".into()
            }
        );
        assert_eq!(creds.method(), CredentialMethod::Password);
    }

    #[test]
    fn test_biometric_shapes() {
        assert_eq!(
            parse(r#"{"fingerprintSample":"fp-1"}"#).unwrap(),
            Credentials::Fingerprint("fp-1".into())
        );
        assert_eq!(
            parse(r#"{"faceSample":"data:image/png;base64,AAA"}"#).unwrap(),
            Credentials::Face("data:image/png;base64,AAA".into())
        );
    }

    #[test]
    fn test_no_shape_is_bad_request() {
        let err = parse("{}").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidRequest);
        assert_eq!(err.http_status(), http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_two_shapes_are_rejected() {
        let err = parse(r#"{"email":"a@x.com","password":"p","faceSample":"f"}"#).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidRequest);
    }

    #[test]
    fn test_email_without_password_is_rejected() {
        let err = parse(r#"{"email":"a@x.com"}"#).unwrap_err();
        assert_eq!(
            err.message,
            "Email authentication requires both email and password"
        );
    }

    #[test]
    fn test_debug_hides_secrets() {
        let creds = Credentials::EmailPassword {
            email: "a@x.com".into(),
            password: "hunter2".into(),
        };
        let printed = format!("{creds:?}");
        assert!(printed.contains("a@x.com"));
        assert!(!printed.contains("hunter2"));
        assert!(!format!("{:?}", Credentials::Face("secret-face".into())).contains("secret-face"));
    }
}
