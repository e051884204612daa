//! Employee domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tassfya_core::{Email, EmployeeId, EmployeeStatus, PermissionSet, Role};

/// An employee identity record (domain type).
///
/// The stored permission set is exactly what an admin (or a permitted agent)
/// granted; the implicit full set an admin enjoys is resolved at login and
/// never written back here.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// Credential issuer subject id.
    pub id: EmployeeId,
    /// Display name.
    pub name: String,
    /// Address derived from the display name at creation.
    pub email: Email,
    /// Role.
    pub role: Role,
    /// Whether the account may log in.
    pub status: EmployeeStatus,
    /// Stored (not effective) permission set.
    pub permissions: PermissionSet,
    /// When the employee was created.
    pub created_at: DateTime<Utc>,
    /// When the employee was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Form payload for creating or updating an employee.
///
/// The email is never accepted from the client; it is derived from `name`.
/// `password` is only honored on creation and is forwarded verbatim to the
/// credential issuer, never stored here.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeForm {
    pub name: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub status: EmployeeStatus,
    #[serde(default)]
    pub permissions: PermissionSet,
}
