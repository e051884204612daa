//! Order route handlers.

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use serde::Serialize;
use tracing::instrument;

use tassfya_core::FeatureKey;

use crate::db::SheetSourceRepository;
use crate::error::AppError;
use crate::middleware::RequireAuth;
use crate::models::Order;
use crate::services::permissions;
use crate::state::AppState;

/// Build the orders router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/orders", get(list))
        .route("/api/orders/update", post(update))
}

/// Materialize and return the order projection.
///
/// Orders are re-read from every configured sheet feed on each call; a
/// feed that fails to fetch or parse contributes nothing.
///
/// GET /api/orders
#[instrument(skip(user, state), fields(actor = %user.id))]
async fn list(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> Result<Json<Vec<Order>>, AppError> {
    permissions::require_feature(&user, FeatureKey::Orders)?;

    let sources = SheetSourceRepository::new(state.pool()).list_all().await?;
    let orders = state.orders().load(&sources).await;

    Ok(Json(orders))
}

/// Acknowledgment returned after a committed update.
#[derive(Debug, Serialize)]
struct UpdateResponse {
    success: bool,
}

/// Forward an order update to the webhook and commit on acknowledgment.
///
/// A rejected or failed dispatch surfaces as an error and leaves the
/// projection untouched.
///
/// POST /api/orders/update
#[instrument(skip(user, state, order), fields(actor = %user.id, order_id = %order.order_id))]
async fn update(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Json(order): Json<Order>,
) -> Result<Json<UpdateResponse>, AppError> {
    permissions::require_feature(&user, FeatureKey::Orders)?;

    if order.order_id.trim().is_empty() {
        return Err(AppError::Validation("order id is required".to_owned()));
    }

    state.orders().update(order).await?;

    Ok(Json(UpdateResponse { success: true }))
}
