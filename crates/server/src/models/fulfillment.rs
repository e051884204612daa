//! Fulfillment order domain type.

use chrono::{DateTime, Utc};
use serde::Serialize;

use tassfya_core::FulfillmentOrderId;

/// An order recorded as handed to the fulfillment center.
///
/// Field values are snapshots of the sheet text at hand-off time.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FulfillmentOrder {
    pub id: FulfillmentOrderId,
    pub order_id: String,
    pub date: String,
    pub status: String,
    pub employee: String,
    pub city: String,
    pub amount: String,
    pub recorded_at: DateTime<Utc>,
}
