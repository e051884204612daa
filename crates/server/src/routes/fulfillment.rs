//! Fulfillment center route handlers.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::get,
};
use serde::Deserialize;
use tracing::instrument;

use tassfya_core::FeatureKey;

use crate::db::FulfillmentRepository;
use crate::error::AppError;
use crate::middleware::RequireAuth;
use crate::models::FulfillmentOrder;
use crate::services::permissions;
use crate::state::AppState;

/// Build the fulfillment router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/fulfillment/orders", get(list).post(record))
}

/// List recorded orders, newest first.
///
/// GET /api/fulfillment/orders
async fn list(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> Result<Json<Vec<FulfillmentOrder>>, AppError> {
    permissions::require_feature(&user, FeatureKey::Fulfillment)?;

    let orders = FulfillmentRepository::new(state.pool()).list_all().await?;
    Ok(Json(orders))
}

/// Payload recording an order handed to fulfillment.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordRequest {
    pub order_id: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub employee: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub amount: String,
}

/// Record a hand-off.
///
/// POST /api/fulfillment/orders
#[instrument(skip(user, state, body), fields(actor = %user.id, order_id = %body.order_id))]
async fn record(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Json(body): Json<RecordRequest>,
) -> Result<(StatusCode, Json<FulfillmentOrder>), AppError> {
    permissions::require_feature(&user, FeatureKey::Fulfillment)?;

    if body.order_id.trim().is_empty() {
        return Err(AppError::Validation("order id is required".to_owned()));
    }

    let recorded = FulfillmentRepository::new(state.pool())
        .record(
            body.order_id.trim(),
            &body.date,
            &body.status,
            &body.employee,
            &body.city,
            &body.amount,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(recorded)))
}
