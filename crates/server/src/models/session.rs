//! Session-related types for authentication.
//!
//! The session is the single owner of the logged-in identity: login creates
//! it, logout clears it, and no handler mutates it directly.

use serde::{Deserialize, Serialize};

use tassfya_core::{Email, EmployeeId, PermissionSet, Role};

/// Session-stored identity of the logged-in employee.
///
/// `permissions` is the *effective* set: for admins with an empty stored
/// set it is the full feature set, resolved at login time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    /// Employee's issuer subject id.
    pub id: EmployeeId,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: Email,
    /// Role.
    pub role: Role,
    /// Effective permission set.
    pub permissions: PermissionSet,
}

/// Session keys for authentication data.
pub mod session_keys {
    /// Key for storing the current logged-in employee.
    pub const CURRENT_USER: &str = "current_user";
}
