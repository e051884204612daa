//! Daily report domain type.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

/// One day's performance rollup.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyReport {
    pub day: NaiveDate,
    pub orders: i32,
    pub revenue: Decimal,
    pub ad_spend: Decimal,
    pub cancelled: i32,
}
