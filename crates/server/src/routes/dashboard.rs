//! Dashboard metrics route handler.

use std::collections::BTreeMap;

use axum::{Json, Router, extract::Query, extract::State, routing::get};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use tassfya_core::FeatureKey;

use crate::db::SheetSourceRepository;
use crate::error::AppError;
use crate::middleware::RequireAuth;
use crate::models::Order;
use crate::services::permissions;
use crate::state::AppState;

/// Build the dashboard router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/dashboard/metrics", get(metrics))
}

/// Metric filters. Dates are inclusive `YYYY-MM-DD` bounds.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsQuery {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub date_from: Option<String>,
    #[serde(default)]
    pub date_to: Option<String>,
}

/// Aggregated view of the filtered projection.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub total_orders: usize,
    pub total_revenue: Decimal,
    /// Count per status value, stable order.
    pub status_counts: BTreeMap<String, usize>,
    /// Distinct cities in the (unfiltered) projection, for filter options.
    pub cities: Vec<String>,
}

/// Compute metrics over the current projection.
///
/// GET /api/dashboard/metrics
#[instrument(skip(user, state), fields(actor = %user.id))]
async fn metrics(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Query(query): Query<MetricsQuery>,
) -> Result<Json<DashboardMetrics>, AppError> {
    permissions::require_feature(&user, FeatureKey::Dashboard)?;

    let sources = SheetSourceRepository::new(state.pool()).list_all().await?;
    let orders = state.orders().load(&sources).await;

    Ok(Json(aggregate(&orders, &query)))
}

/// Whether an order passes the query filters.
///
/// Dates compare as strings; `YYYY-MM-DD` ordering is lexicographic.
fn matches(order: &Order, query: &MetricsQuery) -> bool {
    let status_ok = query.status.as_ref().is_none_or(|s| order.status == *s);
    let city_ok = query.city.as_ref().is_none_or(|c| order.city == *c);
    let from_ok = query.date_from.as_ref().is_none_or(|d| order.date >= *d);
    let to_ok = query.date_to.as_ref().is_none_or(|d| order.date <= *d);

    status_ok && city_ok && from_ok && to_ok
}

fn aggregate(orders: &[Order], query: &MetricsQuery) -> DashboardMetrics {
    let filtered: Vec<&Order> = orders.iter().filter(|o| matches(o, query)).collect();

    let mut status_counts: BTreeMap<String, usize> = BTreeMap::new();
    for order in &filtered {
        *status_counts.entry(order.status.clone()).or_insert(0) += 1;
    }

    // Unparseable prices count as zero revenue rather than poisoning the sum.
    let total_revenue = filtered
        .iter()
        .filter_map(|o| o.price.trim().parse::<Decimal>().ok())
        .sum();

    let mut cities: Vec<String> = orders.iter().map(|o| o.city.clone()).collect();
    cities.sort();
    cities.dedup();

    DashboardMetrics {
        total_orders: filtered.len(),
        total_revenue,
        status_counts,
        cities,
    }
}
