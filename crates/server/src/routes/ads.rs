//! Ad-spend estimate route handler.

use axum::{Json, Router, routing::post};
use tracing::instrument;

use tassfya_core::FeatureKey;

use crate::error::AppError;
use crate::middleware::RequireAuth;
use crate::services::ads::{self, AdSpendEstimate, AdSpendInput};
use crate::services::permissions;
use crate::state::AppState;

/// Build the ads router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/ads/estimate", post(estimate))
}

/// Compute an ad-spend estimate.
///
/// Stateless: the dashboard keeps its own log of saved calculations.
///
/// POST /api/ads/estimate
#[instrument(skip(user, input), fields(actor = %user.id, platform = ?input.platform))]
async fn estimate(
    RequireAuth(user): RequireAuth,
    Json(input): Json<AdSpendInput>,
) -> Result<Json<AdSpendEstimate>, AppError> {
    permissions::require_feature(&user, FeatureKey::Ads)?;

    Ok(Json(ads::estimate(&input)?))
}
