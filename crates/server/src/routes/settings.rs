//! Settings route handlers.
//!
//! Manages the configured sheet sources the order projection reads from.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
};
use serde::Deserialize;
use tracing::instrument;

use tassfya_core::{FeatureKey, SheetSourceId};

use crate::db::SheetSourceRepository;
use crate::error::AppError;
use crate::middleware::RequireAuth;
use crate::models::SheetSource;
use crate::services::permissions;
use crate::state::AppState;

/// Build the settings router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/settings/sheet-sources", get(list).post(create))
        .route("/api/settings/sheet-sources/{id}", delete(remove))
}

/// List configured sheet sources.
///
/// GET /api/settings/sheet-sources
async fn list(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> Result<Json<Vec<SheetSource>>, AppError> {
    permissions::require_feature(&user, FeatureKey::Settings)?;

    let sources = SheetSourceRepository::new(state.pool()).list_all().await?;
    Ok(Json(sources))
}

/// Payload adding a sheet source.
#[derive(Debug, Deserialize)]
pub struct NewSheetSource {
    pub url: String,
    pub site: String,
}

/// Add a sheet source.
///
/// POST /api/settings/sheet-sources
#[instrument(skip(user, state, body), fields(actor = %user.id))]
async fn create(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Json(body): Json<NewSheetSource>,
) -> Result<(StatusCode, Json<SheetSource>), AppError> {
    permissions::require_feature(&user, FeatureKey::Settings)?;

    if body.url.trim().is_empty() || body.site.trim().is_empty() {
        return Err(AppError::Validation("url and site are required".to_owned()));
    }

    let source = SheetSourceRepository::new(state.pool())
        .create(body.url.trim(), body.site.trim())
        .await?;

    Ok((StatusCode::CREATED, Json(source)))
}

/// Remove a sheet source.
///
/// DELETE /api/settings/sheet-sources/{id}
#[instrument(skip(user, state), fields(actor = %user.id, source = id))]
async fn remove(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    permissions::require_feature(&user, FeatureKey::Settings)?;

    SheetSourceRepository::new(state.pool())
        .delete(SheetSourceId::new(id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
