//! The permission model.
//!
//! This module is the single authority on who may see and change what.
//! Route handlers and the employee directory call into it instead of
//! re-deriving rules, so the sidebar-visibility and route-admission
//! mechanisms can never disagree.
//!
//! Invariants enforced here:
//!
//! - An admin implicitly holds the full feature set when their stored set
//!   is empty. Resolution happens at login via [`effective_permissions`]
//!   and is never written back, so growing [`FeatureKey::ALL`] grows admin
//!   access without a data migration.
//! - A non-admin can never grant or revoke the `employees` key, not even
//!   when they hold it themselves (self-escalation guard).
//! - A non-admin can never modify an admin record or their own record.

use tassfya_core::{FeatureKey, PermissionSet, Role};

use crate::error::AppError;
use crate::models::{CurrentUser, Employee};

/// Resolve the effective permission set for a login.
///
/// Admins with an empty stored set receive every feature key; everyone
/// else gets exactly what was stored.
#[must_use]
pub fn effective_permissions(role: Role, stored: &PermissionSet) -> PermissionSet {
    if role.is_admin() && stored.is_empty() {
        PermissionSet::full()
    } else {
        stored.clone()
    }
}

/// Whether a feature is visible to (and usable by) the current user.
#[must_use]
pub fn is_visible(user: &CurrentUser, key: FeatureKey) -> bool {
    user.permissions.contains(key)
}

/// Require a feature, turning absence into a `Permission` error.
///
/// # Errors
///
/// Returns `AppError::Permission` naming the missing feature.
pub fn require_feature(user: &CurrentUser, key: FeatureKey) -> Result<(), AppError> {
    if is_visible(user, key) {
        Ok(())
    } else {
        Err(AppError::Permission(format!(
            "the {key} feature is not granted to this account"
        )))
    }
}

/// Whether the actor may grant or revoke a feature key on another account.
///
/// Admins may grant anything. Non-admins may only pass on keys they hold
/// themselves, and never `employees`.
#[must_use]
pub fn can_grant(actor: &CurrentUser, key: FeatureKey) -> bool {
    if actor.role.is_admin() {
        return true;
    }
    key != FeatureKey::Employees && actor.permissions.contains(key)
}

/// Whether the actor may change the role field of any account.
#[must_use]
pub const fn can_edit_role(actor: &CurrentUser) -> bool {
    actor.role.is_admin()
}

/// Whether the actor may update or delete the target record.
///
/// Non-admins may not touch admin records or their own record.
#[must_use]
pub fn can_modify(actor: &CurrentUser, target: &Employee) -> bool {
    if actor.role.is_admin() {
        return true;
    }
    !target.role.is_admin() && target.id != actor.id
}

/// Filter a requested grant list down to what the actor may hand out.
///
/// Used on the create path: keys the actor cannot grant are silently
/// dropped rather than rejected, matching the dashboard's behavior of
/// disabling those checkboxes.
#[must_use]
pub fn sanitize_grants(actor: &CurrentUser, requested: &PermissionSet) -> PermissionSet {
    requested
        .iter()
        .filter(|&key| can_grant(actor, key))
        .collect()
}

/// Authorize a permission edit on an existing record.
///
/// Every key the edit would actually change must be grantable by the
/// actor; unlike the create path, a disallowed change is an explicit
/// `Permission` error so the caller knows the edit was not applied as
/// requested.
///
/// # Errors
///
/// Returns `AppError::Permission` naming the first offending key.
pub fn authorize_permission_change(
    actor: &CurrentUser,
    current: &PermissionSet,
    requested: &PermissionSet,
) -> Result<(), AppError> {
    for key in current.symmetric_difference(requested) {
        if !can_grant(actor, key) {
            return Err(AppError::Permission(format!(
                "you cannot change the {key} permission"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use tassfya_core::{Email, EmployeeId, EmployeeStatus};

    use super::*;

    fn user(role: Role, permissions: PermissionSet) -> CurrentUser {
        CurrentUser {
            id: EmployeeId::from("actor-1"),
            name: "Actor".to_owned(),
            email: Email::parse("actor@tassfya.com").unwrap(),
            role,
            permissions,
        }
    }

    fn employee(id: &str, role: Role) -> Employee {
        Employee {
            id: EmployeeId::from(id),
            name: "Target".to_owned(),
            email: Email::parse("target@tassfya.com").unwrap(),
            role,
            status: EmployeeStatus::Active,
            permissions: PermissionSet::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn admin_with_empty_stored_set_sees_every_feature() {
        let effective = effective_permissions(Role::Admin, &PermissionSet::new());
        for key in FeatureKey::ALL {
            let admin = user(Role::Admin, effective.clone());
            assert!(is_visible(&admin, key), "admin should see {key}");
        }
    }

    #[test]
    fn admin_with_explicit_set_keeps_it() {
        let stored = PermissionSet::from_names(["orders"]).unwrap();
        let effective = effective_permissions(Role::Admin, &stored);
        assert_eq!(effective, stored);
    }

    #[test]
    fn agent_stored_set_is_effective_set() {
        let stored = PermissionSet::from_names(["dashboard", "orders"]).unwrap();
        assert_eq!(effective_permissions(Role::Agent, &stored), stored);
        assert!(effective_permissions(Role::Agent, &PermissionSet::new()).is_empty());
    }

    #[test]
    fn non_admin_can_never_grant_employees() {
        // Even an agent who holds every key, employees included, cannot
        // pass `employees` on.
        let actor = user(Role::Agent, PermissionSet::full());
        assert!(!can_grant(&actor, FeatureKey::Employees));

        let actor = user(Role::Agent, PermissionSet::new());
        assert!(!can_grant(&actor, FeatureKey::Employees));
    }

    #[test]
    fn non_admin_grants_only_keys_they_hold() {
        let actor = user(
            Role::Agent,
            PermissionSet::from_names(["orders", "employees"]).unwrap(),
        );
        assert!(can_grant(&actor, FeatureKey::Orders));
        assert!(!can_grant(&actor, FeatureKey::Reports));
    }

    #[test]
    fn admin_grants_anything() {
        let actor = user(Role::Admin, PermissionSet::new());
        for key in FeatureKey::ALL {
            assert!(can_grant(&actor, key));
        }
    }

    #[test]
    fn only_admin_edits_roles() {
        assert!(can_edit_role(&user(Role::Admin, PermissionSet::new())));
        assert!(!can_edit_role(&user(Role::Agent, PermissionSet::full())));
    }

    #[test]
    fn non_admin_cannot_modify_admin_or_self() {
        let actor = user(Role::Agent, PermissionSet::full());

        assert!(!can_modify(&actor, &employee("other-admin", Role::Admin)));
        assert!(!can_modify(&actor, &employee("actor-1", Role::Agent)));
        assert!(can_modify(&actor, &employee("other-agent", Role::Agent)));
    }

    #[test]
    fn admin_modifies_anyone() {
        let actor = user(Role::Admin, PermissionSet::new());
        assert!(can_modify(&actor, &employee("other-admin", Role::Admin)));
        assert!(can_modify(&actor, &employee("actor-1", Role::Agent)));
    }

    #[test]
    fn sanitize_drops_ungrantable_keys() {
        let actor = user(Role::Agent, PermissionSet::from_names(["orders"]).unwrap());
        let requested =
            PermissionSet::from_names(["orders", "employees", "settings"]).unwrap();

        let granted = sanitize_grants(&actor, &requested);
        assert_eq!(granted, PermissionSet::from_names(["orders"]).unwrap());
    }

    #[test]
    fn sanitize_is_identity_for_admin() {
        let actor = user(Role::Admin, PermissionSet::new());
        let requested = PermissionSet::full();
        assert_eq!(sanitize_grants(&actor, &requested), requested);
    }

    #[test]
    fn permission_change_rejects_employees_toggle_by_agent() {
        let actor = user(Role::Agent, PermissionSet::full());
        let current = PermissionSet::from_names(["orders"]).unwrap();
        let requested = PermissionSet::from_names(["orders", "employees"]).unwrap();

        let err = authorize_permission_change(&actor, &current, &requested).unwrap_err();
        assert!(matches!(err, AppError::Permission(_)));
    }

    #[test]
    fn permission_change_allows_untouched_keys() {
        // The target already holds `employees`; leaving it alone is fine.
        let actor = user(Role::Agent, PermissionSet::from_names(["orders"]).unwrap());
        let current = PermissionSet::from_names(["employees"]).unwrap();
        let requested = PermissionSet::from_names(["employees", "orders"]).unwrap();

        assert!(authorize_permission_change(&actor, &current, &requested).is_ok());
    }

    #[test]
    fn require_feature_error_names_the_feature() {
        let actor = user(Role::Agent, PermissionSet::new());
        let err = require_feature(&actor, FeatureKey::Settings).unwrap_err();
        assert!(err.to_string().contains("settings"));
    }
}
