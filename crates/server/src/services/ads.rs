//! Ad-spend estimator.
//!
//! Pure arithmetic behind the ads screen. All money math uses `Decimal`;
//! click and order counts truncate toward zero the way the dashboard
//! always displayed them.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Supported advertising platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdPlatform {
    Facebook,
    TikTok,
    Snapchat,
}

/// Input for one estimate.
///
/// Numeric fields arrive as decimal strings, matching the dashboard's
/// text inputs.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdSpendInput {
    pub platform: AdPlatform,
    pub spend: Decimal,
    pub cost_per_click: Decimal,
    #[serde(default)]
    pub conversion_rate: Option<Decimal>,
    pub sales_revenue: Decimal,
}

/// Computed estimate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdSpendEstimate {
    pub clicks: u64,
    pub estimated_orders: u64,
    pub roas: Decimal,
    pub profit: Decimal,
}

/// Compute an estimate from validated input.
///
/// - `clicks` = ⌊spend / cost-per-click⌋
/// - `estimated_orders` = ⌊clicks × conversion-rate / 100⌋ (0 without a rate)
/// - `roas` = revenue / spend, 2 decimal places
/// - `profit` = revenue − spend
///
/// # Errors
///
/// Returns `AppError::Validation` when spend or cost-per-click is not
/// positive, revenue is negative, or the conversion rate is outside 0–100.
pub fn estimate(input: &AdSpendInput) -> Result<AdSpendEstimate, AppError> {
    if input.spend <= Decimal::ZERO {
        return Err(AppError::Validation("ad spend must be positive".to_owned()));
    }
    if input.cost_per_click <= Decimal::ZERO {
        return Err(AppError::Validation(
            "cost per click must be positive".to_owned(),
        ));
    }
    if input.sales_revenue < Decimal::ZERO {
        return Err(AppError::Validation(
            "sales revenue cannot be negative".to_owned(),
        ));
    }
    if let Some(rate) = input.conversion_rate
        && !(Decimal::ZERO..=Decimal::ONE_HUNDRED).contains(&rate)
    {
        return Err(AppError::Validation(
            "conversion rate must be between 0 and 100".to_owned(),
        ));
    }

    let clicks_decimal = (input.spend / input.cost_per_click).floor();
    let clicks = clicks_decimal.to_u64().unwrap_or(0);

    let estimated_orders = input
        .conversion_rate
        .map(|rate| (clicks_decimal * rate / Decimal::ONE_HUNDRED).floor())
        .and_then(|d| d.to_u64())
        .unwrap_or(0);

    let roas = (input.sales_revenue / input.spend).round_dp(2);
    let profit = input.sales_revenue - input.spend;

    Ok(AdSpendEstimate {
        clicks,
        estimated_orders,
        roas,
        profit,
    })
}
