//! Core types for Tassfya.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod feature;
pub mod id;
pub mod role;

pub use email::{Email, EmailError, EMPLOYEE_EMAIL_DOMAIN};
pub use feature::{FeatureKey, FeatureKeyError, PermissionSet};
pub use id::*;
pub use role::{EmployeeStatus, Role};
