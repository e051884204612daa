//! Authentication route handlers.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::AppError;
use crate::middleware::{RequireAuth, clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::services::AuthService;
use crate::state::AppState;

/// Build the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
        .route("/api/auth/me", get(me))
}

/// Login request payload.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Log in with email and password.
///
/// POST /api/auth/login
#[instrument(skip(state, session, body), fields(email = %body.email))]
async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<LoginRequest>,
) -> Result<Json<CurrentUser>, AppError> {
    if body.email.trim().is_empty() || body.password.is_empty() {
        return Err(AppError::Validation(
            "email and password are required".to_owned(),
        ));
    }

    let auth = AuthService::new(state.pool(), state.identity());
    let user = auth.login(body.email.trim(), &body.password).await?;

    set_current_user(&session, &user)
        .await
        .map_err(|e| AppError::Internal(format!("failed to persist session: {e}")))?;

    Ok(Json(user))
}

/// Log out and destroy the session.
///
/// POST /api/auth/logout
async fn logout(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(user): RequireAuth,
) -> StatusCode {
    let _ = clear_current_user(&session).await;

    let auth = AuthService::new(state.pool(), state.identity());
    auth.logout(&user).await;

    StatusCode::NO_CONTENT
}

/// The session identity with its effective permissions.
///
/// The sidebar renders from this: a feature is shown exactly when its key
/// is in `permissions`, the same check the route groups enforce.
///
/// GET /api/auth/me
async fn me(RequireAuth(user): RequireAuth) -> Json<CurrentUser> {
    Json(user)
}
