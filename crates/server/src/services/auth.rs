//! Authentication service.
//!
//! Composes the external credential issuer with the employee directory:
//! the issuer verifies the password and names a subject; the directory
//! decides whether that subject is a registered, active employee.

use sqlx::PgPool;

use crate::db::EmployeeRepository;
use crate::error::AppError;
use crate::identity::IdentityClient;
use crate::models::CurrentUser;
use crate::services::permissions;

/// Authentication service.
pub struct AuthService<'a> {
    employees: EmployeeRepository<'a>,
    identity: &'a IdentityClient,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool, identity: &'a IdentityClient) -> Self {
        Self {
            employees: EmployeeRepository::new(pool),
            identity,
        }
    }

    /// Log in with email and password.
    ///
    /// The issuer session is revoked again immediately when the subject is
    /// unknown to the directory or the account is inactive, so a verified
    /// password alone never yields a usable identity.
    ///
    /// Effective permissions are resolved here on every login rather than
    /// trusted from storage.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Unauthorized` for a wrong password, an
    /// unregistered subject, or an inactive account.
    pub async fn login(&self, email: &str, password: &str) -> Result<CurrentUser, AppError> {
        let subject = self.identity.authenticate(email, password).await?;

        let Some(employee) = self.employees.get_by_id(&subject).await? else {
            self.identity.revoke_session(&subject).await;
            return Err(AppError::Unauthorized(
                "employee not found in system".to_owned(),
            ));
        };

        if !employee.status.is_active() {
            self.identity.revoke_session(&subject).await;
            return Err(AppError::Unauthorized("this account is inactive".to_owned()));
        }

        let permissions =
            permissions::effective_permissions(employee.role, &employee.permissions);

        Ok(CurrentUser {
            id: employee.id,
            name: employee.name,
            email: employee.email,
            role: employee.role,
            permissions,
        })
    }

    /// Revoke the issuer-side session on logout. Best effort.
    pub async fn logout(&self, user: &CurrentUser) {
        self.identity.revoke_session(&user.id).await;
    }
}
