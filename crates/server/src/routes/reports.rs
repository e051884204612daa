//! Reports route handler.

use axum::{Json, Router, extract::Query, extract::State, routing::get};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use tassfya_core::FeatureKey;

use crate::db::ReportRepository;
use crate::error::AppError;
use crate::middleware::RequireAuth;
use crate::models::DailyReport;
use crate::services::permissions;
use crate::state::AppState;

/// Build the reports router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/reports/summary", get(summary))
}

/// Inclusive date-range filter.
#[derive(Debug, Default, Deserialize)]
pub struct SummaryQuery {
    #[serde(default)]
    pub from: Option<NaiveDate>,
    #[serde(default)]
    pub to: Option<NaiveDate>,
}

/// Range totals across the returned days.
#[derive(Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportTotals {
    pub orders: i64,
    pub revenue: Decimal,
    pub ad_spend: Decimal,
    pub cancelled: i64,
}

/// Daily series plus totals.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub days: Vec<DailyReport>,
    pub totals: ReportTotals,
}

/// Summarize daily rollups within the requested range.
///
/// GET /api/reports/summary
#[instrument(skip(user, state), fields(actor = %user.id))]
async fn summary(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Query(query): Query<SummaryQuery>,
) -> Result<Json<ReportSummary>, AppError> {
    permissions::require_feature(&user, FeatureKey::Reports)?;

    let days = ReportRepository::new(state.pool())
        .list_range(query.from, query.to)
        .await?;

    let totals = totals(&days);

    Ok(Json(ReportSummary { days, totals }))
}

fn totals(days: &[DailyReport]) -> ReportTotals {
    days.iter().fold(ReportTotals::default(), |mut acc, day| {
        acc.orders += i64::from(day.orders);
        acc.revenue += day.revenue;
        acc.ad_spend += day.ad_spend;
        acc.cancelled += i64::from(day.cancelled);
        acc
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn day(date: &str, orders: i32, revenue: i64, ads: i64, cancelled: i32) -> DailyReport {
        DailyReport {
            day: date.parse().unwrap(),
            orders,
            revenue: Decimal::from(revenue),
            ad_spend: Decimal::from(ads),
            cancelled,
        }
    }

    #[test]
    fn totals_accumulate_across_days() {
        let days = vec![
            day("2025-07-09", 80, 10_000, 2_800, 4),
            day("2025-07-10", 60, 8_000, 2_000, 6),
        ];

        let totals = totals(&days);

        assert_eq!(totals.orders, 140);
        assert_eq!(totals.revenue, Decimal::from(18_000));
        assert_eq!(totals.ad_spend, Decimal::from(4_800));
        assert_eq!(totals.cancelled, 10);
    }

    #[test]
    fn totals_of_empty_range_are_zero() {
        assert_eq!(totals(&[]), ReportTotals::default());
    }
}
