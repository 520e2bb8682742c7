//! Employee Model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::serde_helpers;
use crate::error::{AppError, AppResult};

/// Employee visibility flag. `Inactive` means soft-deleted, still persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EmployeeStatus {
    #[default]
    Active,
    Inactive,
}

impl EmployeeStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            EmployeeStatus::Active => "Active",
            EmployeeStatus::Inactive => "Inactive",
        }
    }
}

impl fmt::Display for EmployeeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmployeeStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Active" => Ok(EmployeeStatus::Active),
            "Inactive" => Ok(EmployeeStatus::Inactive),
            other => Err(format!("unknown employee status: {other}")),
        }
    }
}

/// Employee record as returned by the API (never carries credential material)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub department: String,
    pub role: String,
    pub status: EmployeeStatus,
    /// Creation time, Unix milliseconds
    pub created_at: i64,
}

/// Reduced employee view returned by a successful authentication
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeView {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub department: String,
    pub role: String,
}

impl From<Employee> for EmployeeView {
    fn from(e: Employee) -> Self {
        Self {
            id: e.id,
            name: e.name,
            email: e.email,
            department: e.department,
            role: e.role,
        }
    }
}

/// Validated fields for a new employee row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmployee {
    pub name: String,
    pub email: String,
    pub department: String,
    pub role: String,
}

/// Create employee payload
///
/// Unknown fields sent by the admin form (phone, hire date, ...) are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeCreate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
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

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

impl EmployeeCreate {
    /// Check that every required field is present and non-blank.
    pub fn to_new_employee(&self) -> AppResult<NewEmployee> {
        let fields = [
            ("name", present(&self.name)),
            ("email", present(&self.email)),
            ("department", present(&self.department)),
            ("role", present(&self.role)),
        ];
        let missing: Vec<&str> = fields
            .iter()
            .filter(|(_, v)| v.is_none())
            .map(|(field, _)| *field)
            .collect();
        if !missing.is_empty() {
            return Err(AppError::required_fields(&missing));
        }

        let [name, email, department, role] = fields.map(|(_, v)| v.unwrap_or_default().to_string());
        Ok(NewEmployee {
            name,
            email,
            department,
            role,
        })
    }

    /// Password to register, if one was supplied
    pub fn password(&self) -> Option<&str> {
        self.password.as_deref().filter(|p| !p.is_empty())
    }

    /// Fingerprint sample to register, if one was supplied
    pub fn fingerprint_sample(&self) -> Option<&str> {
        self.fingerprint_sample.as_deref().filter(|s| !s.is_empty())
    }

    /// Face sample to register, if one was supplied
    pub fn face_sample(&self) -> Option<&str> {
        self.face_sample.as_deref().filter(|s| !s.is_empty())
    }
}

/// Partial update: `None` (or JSON `null`) leaves the field unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl EmployeePatch {
    /// True when no field would change
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.department.is_none() && self.role.is_none()
    }

    /// Supplied fields must not be blank.
    pub fn validate(&self) -> AppResult<()> {
        let fields = [
            ("name", &self.name),
            ("email", &self.email),
            ("department", &self.department),
            ("role", &self.role),
        ];
        for (field, value) in fields {
            if let Some(v) = value
                && v.trim().is_empty()
            {
                return Err(AppError::validation(format!("{field} must not be empty")));
            }
        }
        Ok(())
    }
}

/// Kind of credential attached to an employee
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CredentialMethod {
    Password,
    Fingerprint,
    Face,
}

impl CredentialMethod {
    pub const fn as_str(&self) -> &'static str {
        match self {
            CredentialMethod::Password => "password",
            CredentialMethod::Fingerprint => "fingerprint",
            CredentialMethod::Face => "face",
        }
    }
}

impl fmt::Display for CredentialMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one best-effort credential insertion during employee creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialOutcome {
    pub method: CredentialMethod,
    pub stored: bool,
}

/// `201` body of `POST /api/employees`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeCreated {
    pub message: String,
    pub employee: Employee,
    pub credentials: Vec<CredentialOutcome>,
}

/// `200` body of `PUT /api/employees/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeUpdated {
    pub message: String,
    pub employee: Employee,
}

/// Body carrying only a message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Body of the availability checks used by the admin form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExistsResponse {
    pub exists: bool,
}
