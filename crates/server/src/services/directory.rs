//! Employee directory.
//!
//! The only component with real create/update/delete semantics: every
//! mutation writes through to the authoritative store synchronously, and
//! that write is the commit point. There is no optimistic-then-reconcile
//! pattern here.

use sqlx::PgPool;
use tracing::{info, instrument};

use tassfya_core::{Email, EmployeeId, Role};

use crate::db::EmployeeRepository;
use crate::error::AppError;
use crate::identity::IdentityClient;
use crate::models::{CurrentUser, Employee, EmployeeForm};
use crate::services::permissions;

/// Employee directory service.
pub struct DirectoryService<'a> {
    employees: EmployeeRepository<'a>,
    identity: &'a IdentityClient,
}

impl<'a> DirectoryService<'a> {
    /// Create a new directory service.
    #[must_use]
    pub const fn new(pool: &'a PgPool, identity: &'a IdentityClient) -> Self {
        Self {
            employees: EmployeeRepository::new(pool),
            identity,
        }
    }

    /// List all employees, server-assigned id order.
    ///
    /// # Errors
    ///
    /// Returns a database error if the scan fails.
    pub async fn list(&self) -> Result<Vec<Employee>, AppError> {
        Ok(self.employees.list_all().await?)
    }

    /// Create a new employee.
    ///
    /// The email address is derived from the name, never client-supplied.
    /// Credential creation is delegated to the issuer first; only its
    /// subject id makes it into the store, and an issuer failure leaves
    /// the store untouched.
    ///
    /// # Errors
    ///
    /// - `AppError::Validation` when name or password is blank.
    /// - `AppError::Conflict` when the derived email is already registered.
    /// - `AppError::AuthProvider` when the issuer call fails.
    #[instrument(skip(self, actor, form), fields(actor = %actor.id))]
    pub async fn create(
        &self,
        actor: &CurrentUser,
        form: EmployeeForm,
    ) -> Result<Employee, AppError> {
        if form.name.trim().is_empty() {
            return Err(AppError::Validation("name is required".to_owned()));
        }
        if form.password.trim().is_empty() {
            return Err(AppError::Validation("password is required".to_owned()));
        }

        let email = Email::derive_for_employee(&form.name)
            .map_err(|e| AppError::Validation(e.to_string()))?;

        // Only an admin may mint another admin; everyone else creates agents.
        let role = if permissions::can_edit_role(actor) {
            form.role.unwrap_or(Role::Agent)
        } else {
            Role::Agent
        };

        let granted = permissions::sanitize_grants(actor, &form.permissions);

        let subject = self.identity.create_identity(&email, &form.password).await?;

        let employee = self
            .employees
            .upsert(&subject, form.name.trim(), &email, role, form.status, &granted)
            .await?;

        info!(employee = %employee.id, "employee created");

        Ok(employee)
    }

    /// Update an existing employee, whole-record.
    ///
    /// The email stays bound to the issuer credential created with the
    /// account; the password never flows through this path.
    ///
    /// # Errors
    ///
    /// - `AppError::NotFound` when the id is unknown.
    /// - `AppError::Permission` when the actor is a non-admin targeting an
    ///   admin or themself, changing a role, or toggling an ungrantable key.
    /// - `AppError::Validation` when the name is blank.
    #[instrument(skip(self, actor, form), fields(actor = %actor.id, target = %id))]
    pub async fn update(
        &self,
        actor: &CurrentUser,
        id: &EmployeeId,
        form: EmployeeForm,
    ) -> Result<Employee, AppError> {
        let target = self
            .employees
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("employee {id}")))?;

        if !permissions::can_modify(actor, &target) {
            return Err(AppError::Permission("you cannot edit this user".to_owned()));
        }

        if form.name.trim().is_empty() {
            return Err(AppError::Validation("name is required".to_owned()));
        }

        let role = match form.role {
            Some(new_role) if new_role != target.role => {
                if !permissions::can_edit_role(actor) {
                    return Err(AppError::Permission(
                        "only an admin can change roles".to_owned(),
                    ));
                }
                new_role
            }
            Some(role) => role,
            None => target.role,
        };

        permissions::authorize_permission_change(actor, &target.permissions, &form.permissions)?;

        let employee = self
            .employees
            .upsert(
                id,
                form.name.trim(),
                &target.email,
                role,
                form.status,
                &form.permissions,
            )
            .await?;

        info!(employee = %employee.id, "employee updated");

        Ok(employee)
    }

    /// Delete an employee. Admin-only and irreversible.
    ///
    /// # Errors
    ///
    /// - `AppError::Permission` for non-admin actors.
    /// - `AppError::NotFound` when the id is unknown.
    #[instrument(skip(self, actor), fields(actor = %actor.id, target = %id))]
    pub async fn delete(&self, actor: &CurrentUser, id: &EmployeeId) -> Result<(), AppError> {
        if !actor.role.is_admin() {
            return Err(AppError::Permission(
                "only an admin can delete employees".to_owned(),
            ));
        }

        self.employees.delete(id).await?;

        info!(employee = %id, "employee deleted");

        Ok(())
    }
}
