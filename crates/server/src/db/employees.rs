//! Employee repository for database operations.
//!
//! The employee table is the authoritative store for identity and
//! permission records. Rows are keyed by the credential issuer's subject
//! id and written as whole-row upserts; the store write is the commit
//! point for every directory mutation.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use tassfya_core::{Email, EmployeeId, EmployeeStatus, PermissionSet, Role};

use super::RepositoryError;
use crate::models::Employee;

/// Internal row type for `PostgreSQL` employee queries.
#[derive(Debug, sqlx::FromRow)]
struct EmployeeRow {
    id: String,
    name: String,
    email: String,
    role: String,
    status: String,
    permissions: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<EmployeeRow> for Employee {
    type Error = RepositoryError;

    fn try_from(row: EmployeeRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;
        let role: Role = row.role.parse().map_err(|e: String| {
            RepositoryError::DataCorruption(format!("invalid role in database: {e}"))
        })?;
        let status: EmployeeStatus = row.status.parse().map_err(|e: String| {
            RepositoryError::DataCorruption(format!("invalid status in database: {e}"))
        })?;
        let permissions = PermissionSet::from_names(&row.permissions).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid permission in database: {e}"))
        })?;

        Ok(Self {
            id: EmployeeId::new(row.id),
            name: row.name,
            email,
            role,
            status,
            permissions,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const SELECT_COLUMNS: &str =
    "id, name, email, role, status, permissions, created_at, updated_at";

/// Repository for employee database operations.
pub struct EmployeeRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> EmployeeRepository<'a> {
    /// Create a new employee repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all employees.
    ///
    /// Full-collection scan in server-assigned id order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn list_all(&self) -> Result<Vec<Employee>, RepositoryError> {
        let rows = sqlx::query_as::<_, EmployeeRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM employee ORDER BY id"
        ))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Get an employee by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn get_by_id(&self, id: &EmployeeId) -> Result<Option<Employee>, RepositoryError> {
        let row = sqlx::query_as::<_, EmployeeRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM employee WHERE id = $1"
        ))
        .bind(id.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Get an employee by their email address.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn get_by_email(&self, email: &Email) -> Result<Option<Employee>, RepositoryError> {
        let row = sqlx::query_as::<_, EmployeeRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM employee WHERE email = $1"
        ))
        .bind(email.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Upsert an employee record, whole-row, keyed by id.
    ///
    /// Used both for creation (with a fresh issuer subject id) and for
    /// updates; the returned record reflects what was stored.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email is taken by another id.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn upsert(
        &self,
        id: &EmployeeId,
        name: &str,
        email: &Email,
        role: Role,
        status: EmployeeStatus,
        permissions: &PermissionSet,
    ) -> Result<Employee, RepositoryError> {
        let row = sqlx::query_as::<_, EmployeeRow>(&format!(
            r"
            INSERT INTO employee (id, name, email, role, status, permissions)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                email = EXCLUDED.email,
                role = EXCLUDED.role,
                status = EXCLUDED.status,
                permissions = EXCLUDED.permissions,
                updated_at = now()
            RETURNING {SELECT_COLUMNS}
            "
        ))
        .bind(id.as_str())
        .bind(name)
        .bind(email.as_str())
        .bind(role.to_string())
        .bind(status.to_string())
        .bind(permissions.to_names())
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("email already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        row.try_into()
    }

    /// Delete an employee by their ID.
    ///
    /// Hard delete; there is no tombstone and the row never reappears in
    /// `list_all`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the employee doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: &EmployeeId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM employee WHERE id = $1")
            .bind(id.as_str())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Count employees by role.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_by_role(&self, role: Role) -> Result<i64, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM employee WHERE role = $1")
            .bind(role.to_string())
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample_row() -> EmployeeRow {
        EmployeeRow {
            id: "uid-1".to_owned(),
            name: "Ali Hassan".to_owned(),
            email: "alihassan@tassfya.com".to_owned(),
            role: "agent".to_owned(),
            status: "active".to_owned(),
            permissions: vec!["orders".to_owned(), "dashboard".to_owned()],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_row_conversion() {
        let employee: Employee = sample_row().try_into().unwrap();
        assert_eq!(employee.id.as_str(), "uid-1");
        assert_eq!(employee.role, Role::Agent);
        assert_eq!(employee.status, EmployeeStatus::Active);
        assert!(employee.permissions.contains(tassfya_core::FeatureKey::Orders));
        assert_eq!(employee.permissions.len(), 2);
    }

    #[test]
    fn test_row_conversion_rejects_bad_role() {
        let mut row = sample_row();
        row.role = "supervisor".to_owned();
        let err = Employee::try_from(row).unwrap_err();
        assert!(matches!(err, RepositoryError::DataCorruption(_)));
    }

    #[test]
    fn test_row_conversion_rejects_bad_permission() {
        let mut row = sample_row();
        row.permissions = vec!["orders".to_owned(), "billing".to_owned()];
        let err = Employee::try_from(row).unwrap_err();
        assert!(matches!(err, RepositoryError::DataCorruption(_)));
    }
}
