//! Employee administration route handlers.
//!
//! All operations require the `employees` feature; the finer-grained
//! guards (admin-only deletion, no self/admin edits for agents, the
//! `employees`-key self-escalation block) live in the directory service.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
};
use tracing::instrument;

use tassfya_core::{EmployeeId, FeatureKey};

use crate::error::AppError;
use crate::middleware::RequireAuth;
use crate::models::{Employee, EmployeeForm};
use crate::services::{DirectoryService, permissions};
use crate::state::AppState;

/// Build the employees router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/employees", get(list).post(create))
        .route("/api/employees/{id}", put(update).delete(remove))
}

/// List all employees.
///
/// GET /api/employees
async fn list(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> Result<Json<Vec<Employee>>, AppError> {
    permissions::require_feature(&user, FeatureKey::Employees)?;

    let directory = DirectoryService::new(state.pool(), state.identity());
    Ok(Json(directory.list().await?))
}

/// Create an employee.
///
/// POST /api/employees
#[instrument(skip(user, state, form), fields(actor = %user.id))]
async fn create(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Json(form): Json<EmployeeForm>,
) -> Result<(StatusCode, Json<Employee>), AppError> {
    permissions::require_feature(&user, FeatureKey::Employees)?;

    let directory = DirectoryService::new(state.pool(), state.identity());
    let employee = directory.create(&user, form).await?;

    Ok((StatusCode::CREATED, Json(employee)))
}

/// Update an employee.
///
/// PUT /api/employees/{id}
#[instrument(skip(user, state, form), fields(actor = %user.id, target = %id))]
async fn update(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(form): Json<EmployeeForm>,
) -> Result<Json<Employee>, AppError> {
    permissions::require_feature(&user, FeatureKey::Employees)?;

    let directory = DirectoryService::new(state.pool(), state.identity());
    let employee = directory
        .update(&user, &EmployeeId::from(id), form)
        .await?;

    Ok(Json(employee))
}

/// Delete an employee (admin only).
///
/// DELETE /api/employees/{id}
#[instrument(skip(user, state), fields(actor = %user.id, target = %id))]
async fn remove(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    permissions::require_feature(&user, FeatureKey::Employees)?;

    let directory = DirectoryService::new(state.pool(), state.identity());
    directory.delete(&user, &EmployeeId::from(id)).await?;

    Ok(StatusCode::NO_CONTENT)
}
