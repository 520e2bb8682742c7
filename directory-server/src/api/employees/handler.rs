//! Employee API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use shared::models::{
    AuthRequest, AuthResponse, CredentialMethod, CredentialOutcome, Employee, EmployeeCreate,
    EmployeeCreated, EmployeePatch, EmployeeUpdated, ExistsResponse, MessageResponse,
};
use shared::{AppError, AppResult};

use crate::api::extract::ApiJson;
use crate::core::ServerState;
use crate::db::repository::{EmployeeRepository, RepoError, RepoResult};

/// Ids that do not parse can never name a stored employee.
fn parse_id(raw: &str) -> AppResult<i64> {
    raw.parse::<i64>().map_err(|_| {
        tracing::warn!(id = %raw, "Employee id is not numeric");
        AppError::employee_not_found()
    })
}

fn not_found_as_employee(err: RepoError) -> AppError {
    match err {
        RepoError::NotFound(_) => AppError::employee_not_found(),
        other => other.into(),
    }
}

fn store_credential(
    method: CredentialMethod,
    employee_id: i64,
    result: RepoResult<()>,
) -> CredentialOutcome {
    let stored = match result {
        Ok(()) => {
            tracing::info!(employee_id, method = %method, "Credential stored");
            true
        }
        Err(e) => {
            tracing::warn!(employee_id, method = %method, error = %e, "Failed to store credential");
            false
        }
    };
    CredentialOutcome { method, stored }
}

/// Create an employee, then register each supplied credential best-effort
pub async fn create(
    State(state): State<ServerState>,
    ApiJson(payload): ApiJson<EmployeeCreate>,
) -> AppResult<(StatusCode, Json<EmployeeCreated>)> {
    let data = payload.to_new_employee().inspect_err(|e| {
        tracing::warn!(error = %e, "Employee creation rejected");
    })?;

    let repo = state.employees();
    let fail = |e: RepoError| AppError::from(e).context("Failed to create employee");

    if repo.find_by_email(&data.email).await.map_err(fail)?.is_some() {
        tracing::warn!(email = %data.email, "Employee creation rejected: email already registered");
        return Err(AppError::email_exists());
    }

    let id = repo.create(&data).await.map_err(|e| match e {
        RepoError::Duplicate(_) => AppError::email_exists(),
        other => fail(other),
    })?;

    let mut credentials = Vec::new();
    if let Some(password) = payload.password() {
        let result = repo.add_email_credential(id, password).await;
        credentials.push(store_credential(CredentialMethod::Password, id, result));
    }
    if let Some(sample) = payload.fingerprint_sample() {
        let result = repo.add_fingerprint_credential(id, sample).await;
        credentials.push(store_credential(CredentialMethod::Fingerprint, id, result));
    }
    if let Some(sample) = payload.face_sample() {
        let result = repo.add_face_credential(id, sample).await;
        credentials.push(store_credential(CredentialMethod::Face, id, result));
    }

    let employee = repo
        .find_by_id(id)
        .await
        .map_err(fail)?
        .ok_or_else(|| {
            AppError::internal(format!("Employee {id} missing after insert"))
                .context("Failed to create employee")
        })?;

    tracing::info!(employee_id = id, email = %employee.email, "Employee created");
    Ok((
        StatusCode::CREATED,
        Json(EmployeeCreated {
            message: "Employee created successfully".to_string(),
            employee,
            credentials,
        }),
    ))
}

/// List Active employees
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Employee>>> {
    let employees = state
        .employees()
        .find_all_active()
        .await
        .map_err(|e| AppError::from(e).context("Failed to list employees"))?;
    tracing::info!(count = employees.len(), "Employees listed");
    Ok(Json(employees))
}

/// Get an Active employee by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Employee>> {
    let id = parse_id(&id)?;
    let employee = state
        .employees()
        .find_by_id(id)
        .await
        .map_err(|e| AppError::from(e).context("Failed to fetch employee"))?
        .ok_or_else(|| {
            tracing::warn!(employee_id = id, "Employee not found");
            AppError::employee_not_found()
        })?;
    tracing::info!(employee_id = id, "Employee fetched");
    Ok(Json(employee))
}

/// Update the supplied fields of an Active employee
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    ApiJson(patch): ApiJson<EmployeePatch>,
) -> AppResult<Json<EmployeeUpdated>> {
    let id = parse_id(&id)?;
    patch.validate().inspect_err(|e| {
        tracing::warn!(employee_id = id, error = %e, "Employee update rejected");
    })?;

    let repo = state.employees();
    let fail = |e: RepoError| AppError::from(e).context("Failed to update employee");

    let current = require_active(&repo, id, "update").await?;

    if let Some(email) = patch.email.as_deref()
        && email != current.email
        && repo.find_by_email(email).await.map_err(fail)?.is_some()
    {
        tracing::warn!(employee_id = id, email = %email, "Employee update rejected: email already registered");
        return Err(AppError::email_exists());
    }

    let employee = repo.update(id, &patch).await.map_err(|e| match e {
        RepoError::Duplicate(_) => AppError::email_exists(),
        RepoError::NotFound(_) => AppError::employee_not_found(),
        other => fail(other),
    })?;

    tracing::info!(employee_id = id, "Employee updated");
    Ok(Json(EmployeeUpdated {
        message: "Employee updated successfully".to_string(),
        employee,
    }))
}

/// Soft delete an Active employee
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let id = parse_id(&id)?;
    let repo = state.employees();

    require_active(&repo, id, "delete").await?;

    repo.soft_delete(id)
        .await
        .map_err(|e| not_found_as_employee(e).context("Failed to delete employee"))?;

    tracing::info!(employee_id = id, "Employee deactivated");
    Ok(Json(MessageResponse::new("Employee deleted successfully")))
}

async fn require_active(repo: &EmployeeRepository, id: i64, action: &str) -> AppResult<Employee> {
    repo.find_by_id(id)
        .await
        .map_err(|e| AppError::from(e).context(format!("Failed to {action} employee")))?
        .ok_or_else(|| {
            tracing::warn!(employee_id = id, action, "Employee not found");
            AppError::employee_not_found()
        })
}

/// Authenticate with exactly one credential
pub async fn authenticate(
    State(state): State<ServerState>,
    ApiJson(req): ApiJson<AuthRequest>,
) -> AppResult<Json<AuthResponse>> {
    let employee = state
        .resolver()
        .authenticate_request(req)
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "Authentication failed");
            AppError::from(e).context("Authentication failed")
        })?;

    tracing::info!(employee_id = employee.id, "Authentication successful");
    Ok(Json(AuthResponse {
        message: "Authentication successful".to_string(),
        employee,
    }))
}

/// Whether any employee, Active or not, already uses this email
pub async fn check_email(
    State(state): State<ServerState>,
    Path(email): Path<String>,
) -> AppResult<Json<ExistsResponse>> {
    let exists = state
        .employees()
        .email_exists(&email)
        .await
        .map_err(|e| {
            tracing::error!(email = %email, error = %e, "Email check failed");
            AppError::from(e).context("Failed to check email")
        })?;
    tracing::info!(email = %email, exists, "Email checked");
    Ok(Json(ExistsResponse { exists }))
}

/// Whether an Active employee already has this name
pub async fn check_name(
    State(state): State<ServerState>,
    Path(name): Path<String>,
) -> AppResult<Json<ExistsResponse>> {
    let exists = state
        .employees()
        .name_exists(&name)
        .await
        .map_err(|e| {
            tracing::error!(name = %name, error = %e, "Name check failed");
            AppError::from(e).context("Failed to check name")
        })?;
    tracing::info!(name = %name, exists, "Name checked");
    Ok(Json(ExistsResponse { exists }))
}
