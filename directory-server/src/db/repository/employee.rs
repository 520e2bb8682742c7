//! Employee Repository

use shared::models::{Employee, EmployeePatch, EmployeeStatus, NewEmployee};
use sqlx::SqlitePool;

use super::{RepoError, RepoResult};
use crate::auth::PasswordService;

const EMPLOYEE_SELECT: &str =
    "SELECT id, name, email, department, role, status, created_at FROM employees";

#[derive(sqlx::FromRow)]
struct EmployeeRow {
    id: i64,
    name: String,
    email: String,
    department: String,
    role: String,
    status: String,
    created_at: i64,
}

impl TryFrom<EmployeeRow> for Employee {
    type Error = RepoError;

    fn try_from(row: EmployeeRow) -> RepoResult<Self> {
        let status: EmployeeStatus = row.status.parse().map_err(RepoError::Database)?;
        Ok(Employee {
            id: row.id,
            name: row.name,
            email: row.email,
            department: row.department,
            role: row.role,
            status,
            created_at: row.created_at,
        })
    }
}

fn require(value: &str, field: &str) -> RepoResult<()> {
    if value.trim().is_empty() {
        return Err(RepoError::Validation(format!("{field} is required")));
    }
    Ok(())
}

fn require_employee_id(employee_id: i64) -> RepoResult<()> {
    if employee_id <= 0 {
        return Err(RepoError::Validation(format!(
            "Invalid employee id: {employee_id}"
        )));
    }
    Ok(())
}

#[derive(Clone)]
pub struct EmployeeRepository {
    pool: SqlitePool,
    passwords: PasswordService,
}

impl EmployeeRepository {
    pub fn new(pool: SqlitePool, passwords: PasswordService) -> Self {
        Self { pool, passwords }
    }

    /// Insert a new Active employee and return its generated id.
    ///
    /// Email uniqueness is enforced by the storage constraint; a concurrent
    /// duplicate surfaces as [`RepoError::Duplicate`].
    pub async fn create(&self, data: &NewEmployee) -> RepoResult<i64> {
        require(&data.name, "name")?;
        require(&data.email, "email")?;
        require(&data.department, "department")?;
        require(&data.role, "role")?;

        let now = shared::util::now_millis();
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO employees (name, email, department, role, status, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6) RETURNING id",
        )
        .bind(&data.name)
        .bind(&data.email)
        .bind(&data.department)
        .bind(&data.role)
        .bind(EmployeeStatus::Active.as_str())
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| duplicate_email(e, &data.email))?;
        Ok(id)
    }

    /// Find an Active employee by id
    pub async fn find_by_id(&self, id: i64) -> RepoResult<Option<Employee>> {
        let sql = format!("{EMPLOYEE_SELECT} WHERE id = ? AND status = ?");
        let row = sqlx::query_as::<_, EmployeeRow>(&sql)
            .bind(id)
            .bind(EmployeeStatus::Active.as_str())
            .fetch_optional(&self.pool)
            .await?;
        row.map(Employee::try_from).transpose()
    }

    /// Find an employee by email, regardless of status
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<Employee>> {
        let sql = format!("{EMPLOYEE_SELECT} WHERE email = ?");
        let row = sqlx::query_as::<_, EmployeeRow>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        row.map(Employee::try_from).transpose()
    }

    /// All Active employees in storage order
    pub async fn find_all_active(&self) -> RepoResult<Vec<Employee>> {
        let sql = format!("{EMPLOYEE_SELECT} WHERE status = ? ORDER BY id");
        let rows = sqlx::query_as::<_, EmployeeRow>(&sql)
            .bind(EmployeeStatus::Active.as_str())
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(Employee::try_from).collect()
    }

    /// Whether any employee (Active or Inactive) uses this email
    pub async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM employees WHERE email = ?)")
                .bind(email)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    /// Whether an Active employee already has this name
    pub async fn name_exists(&self, name: &str) -> RepoResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM employees WHERE name = ? AND status = ?)",
        )
        .bind(name)
        .bind(EmployeeStatus::Active.as_str())
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    /// Apply the supplied fields of `patch` to an Active employee
    pub async fn update(&self, id: i64, patch: &EmployeePatch) -> RepoResult<Employee> {
        patch
            .validate()
            .map_err(|e| RepoError::Validation(e.message))?;

        if patch.is_empty() {
            return self
                .find_by_id(id)
                .await?
                .ok_or_else(|| RepoError::NotFound(format!("Employee {id} not found")));
        }

        let rows = sqlx::query(
            "UPDATE employees SET name = COALESCE(?1, name), email = COALESCE(?2, email), department = COALESCE(?3, department), role = COALESCE(?4, role) WHERE id = ?5 AND status = ?6",
        )
        .bind(&patch.name)
        .bind(&patch.email)
        .bind(&patch.department)
        .bind(&patch.role)
        .bind(id)
        .bind(EmployeeStatus::Active.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| duplicate_email(e, patch.email.as_deref().unwrap_or_default()))?;

        if rows.rows_affected() == 0 {
            return Err(RepoError::NotFound(format!("Employee {id} not found")));
        }
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Employee {id} not found")))
    }

    /// Mark an employee Inactive. The row and its credentials stay in storage.
    ///
    /// Returns whether a row with this id exists; repeated calls keep succeeding,
    /// callers decide the not-found semantics.
    pub async fn soft_delete(&self, id: i64) -> RepoResult<bool> {
        let rows = sqlx::query("UPDATE employees SET status = ? WHERE id = ?")
            .bind(EmployeeStatus::Inactive.as_str())
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(rows.rows_affected() > 0)
    }

    // ── Credentials ──

    /// Hash `plain_password` and attach it to the employee
    pub async fn add_email_credential(&self, employee_id: i64, plain_password: &str) -> RepoResult<()> {
        require_employee_id(employee_id)?;
        if plain_password.is_empty() {
            return Err(RepoError::Validation("Password must not be empty".into()));
        }

        let hash = self
            .passwords
            .hash(plain_password)
            .map_err(|e| RepoError::Database(format!("Failed to hash password: {e}")))?;

        sqlx::query("INSERT INTO email_credentials (employee_id, password_hash) VALUES (?, ?)")
            .bind(employee_id)
            .bind(&hash)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Attach an opaque fingerprint sample to the employee
    pub async fn add_fingerprint_credential(&self, employee_id: i64, sample: &str) -> RepoResult<()> {
        sqlx::query("INSERT INTO fingerprint_credentials (employee_id, sample) VALUES (?, ?)")
            .bind(employee_id)
            .bind(sample)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Attach an opaque face sample to the employee
    pub async fn add_face_credential(&self, employee_id: i64, sample: &str) -> RepoResult<()> {
        sqlx::query("INSERT INTO face_credentials (employee_id, sample) VALUES (?, ?)")
            .bind(employee_id)
            .bind(sample)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

fn duplicate_email(err: sqlx::Error, email: &str) -> RepoError {
    match RepoError::from(err) {
        RepoError::Duplicate(_) => {
            RepoError::Duplicate(format!("Email '{email}' is already registered"))
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::HashCost;
    use crate::db::DbService;

    async fn test_repo() -> (EmployeeRepository, SqlitePool) {
        let db = DbService::in_memory().await.unwrap();
        let passwords = PasswordService::new(HashCost::cheap()).unwrap();
        (EmployeeRepository::new(db.pool.clone(), passwords), db.pool)
    }

    fn ana() -> NewEmployee {
        NewEmployee {
            name: "Ana".into(),
            email: "ana@x.com".into(),
            department: "Tech".into(),
            role: "Eng".into(),
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let (repo, _) = test_repo().await;
        let id = repo.create(&ana()).await.unwrap();
        assert!(id > 0);

        let emp = repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(emp.name, "Ana");
        assert_eq!(emp.status, EmployeeStatus::Active);
        assert!(emp.created_at > 0);

        let by_email = repo.find_by_email("ana@x.com").await.unwrap().unwrap();
        assert_eq!(by_email.id, id);
    }

    #[tokio::test]
    async fn test_create_requires_fields() {
        let (repo, _) = test_repo().await;
        let mut data = ana();
        data.role = "  ".into();
        let err = repo.create(&data).await.unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)));
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected_by_storage() {
        let (repo, pool) = test_repo().await;
        repo.create(&ana()).await.unwrap();

        let mut twin = ana();
        twin.name = "Other Ana".into();
        let err = repo.create(&twin).await.unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(ref msg) if msg.contains("ana@x.com")));

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM employees WHERE email = 'ana@x.com'")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_soft_delete_keeps_rows() {
        let (repo, pool) = test_repo().await;
        let id = repo.create(&ana()).await.unwrap();
        repo.add_email_credential(id, "secret1").await.unwrap();
        repo.add_fingerprint_credential(id, "fp-1").await.unwrap();

        assert!(repo.soft_delete(id).await.unwrap());

        assert!(repo.find_by_id(id).await.unwrap().is_none());
        assert!(repo.find_all_active().await.unwrap().is_empty());

        // lookup by email ignores status
        let inactive = repo.find_by_email("ana@x.com").await.unwrap().unwrap();
        assert_eq!(inactive.status, EmployeeStatus::Inactive);

        let creds: i64 = sqlx::query_scalar(
            "SELECT (SELECT COUNT(*) FROM email_credentials WHERE employee_id = ?1) + (SELECT COUNT(*) FROM fingerprint_credentials WHERE employee_id = ?1)",
        )
        .bind(id)
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(creds, 2);
    }

    #[tokio::test]
    async fn test_soft_delete_repeats_without_error() {
        let (repo, _) = test_repo().await;
        let id = repo.create(&ana()).await.unwrap();
        assert!(repo.soft_delete(id).await.unwrap());
        assert!(repo.soft_delete(id).await.unwrap());
        assert!(!repo.soft_delete(id + 100).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_active_only() {
        let (repo, _) = test_repo().await;
        let a = repo.create(&ana()).await.unwrap();
        let b = repo
            .create(&NewEmployee {
                name: "Luis".into(),
                email: "luis@x.com".into(),
                department: "Ops".into(),
                role: "Lead".into(),
            })
            .await
            .unwrap();
        repo.soft_delete(a).await.unwrap();

        let ids: Vec<i64> = repo
            .find_all_active()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec![b]);
    }

    #[tokio::test]
    async fn test_update_only_department() {
        let (repo, _) = test_repo().await;
        let id = repo.create(&ana()).await.unwrap();

        let patch = EmployeePatch {
            department: Some("Research".into()),
            ..Default::default()
        };
        let updated = repo.update(id, &patch).await.unwrap();
        assert_eq!(updated.department, "Research");
        assert_eq!(updated.name, "Ana");
        assert_eq!(updated.email, "ana@x.com");
        assert_eq!(updated.role, "Eng");
    }

    #[tokio::test]
    async fn test_update_unknown_or_inactive() {
        let (repo, _) = test_repo().await;
        let patch = EmployeePatch {
            name: Some("Ghost".into()),
            ..Default::default()
        };
        assert!(matches!(
            repo.update(42, &patch).await.unwrap_err(),
            RepoError::NotFound(_)
        ));

        let id = repo.create(&ana()).await.unwrap();
        repo.soft_delete(id).await.unwrap();
        assert!(matches!(
            repo.update(id, &patch).await.unwrap_err(),
            RepoError::NotFound(_)
        ));
        assert!(matches!(
            repo.update(id, &EmployeePatch::default()).await.unwrap_err(),
            RepoError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_update_email_collision() {
        let (repo, _) = test_repo().await;
        repo.create(&ana()).await.unwrap();
        let id = repo
            .create(&NewEmployee {
                name: "Luis".into(),
                email: "luis@x.com".into(),
                department: "Ops".into(),
                role: "Lead".into(),
            })
            .await
            .unwrap();

        let patch = EmployeePatch {
            email: Some("ana@x.com".into()),
            ..Default::default()
        };
        assert!(matches!(
            repo.update(id, &patch).await.unwrap_err(),
            RepoError::Duplicate(_)
        ));
    }

    #[tokio::test]
    async fn test_exists_checks() {
        let (repo, _) = test_repo().await;
        let id = repo.create(&ana()).await.unwrap();
        assert!(repo.email_exists("ana@x.com").await.unwrap());
        assert!(repo.name_exists("Ana").await.unwrap());
        assert!(!repo.email_exists("nobody@x.com").await.unwrap());

        repo.soft_delete(id).await.unwrap();
        assert!(repo.email_exists("ana@x.com").await.unwrap());
        assert!(!repo.name_exists("Ana").await.unwrap());
    }

    #[tokio::test]
    async fn test_email_credential_validation() {
        let (repo, _) = test_repo().await;
        let id = repo.create(&ana()).await.unwrap();
        assert!(matches!(
            repo.add_email_credential(0, "secret1").await.unwrap_err(),
            RepoError::Validation(_)
        ));
        assert!(matches!(
            repo.add_email_credential(id, "").await.unwrap_err(),
            RepoError::Validation(_)
        ));
    }

    #[tokio::test]
    async fn test_password_is_stored_hashed() {
        let (repo, pool) = test_repo().await;
        let id = repo.create(&ana()).await.unwrap();
        repo.add_email_credential(id, "secret1").await.unwrap();

        let stored: String =
            sqlx::query_scalar("SELECT password_hash FROM email_credentials WHERE employee_id = ?")
                .bind(id)
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_ne!(stored, "secret1");
        assert!(stored.starts_with("$argon2"));
    }

    #[tokio::test]
    async fn test_credential_for_missing_employee() {
        let (repo, _) = test_repo().await;
        let err = repo.add_face_credential(77, "face").await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_biometric_sample_may_be_empty() {
        let (repo, _) = test_repo().await;
        let id = repo.create(&ana()).await.unwrap();
        repo.add_fingerprint_credential(id, "").await.unwrap();
    }
}
