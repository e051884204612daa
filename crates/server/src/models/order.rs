//! Order projection record.
//!
//! Orders have no identity in the authoritative store: every field here is
//! raw sheet text, materialized on load and discarded on the next one. The
//! JSON field names match the dashboard's order payload, which is also the
//! exact shape dispatched to the order-update webhook.

use serde::{Deserialize, Serialize};

/// A single order row from a spreadsheet feed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Order identifier from the sheet; synthesized as `row{n}` when blank.
    #[serde(rename = "id")]
    pub order_id: String,
    pub price: String,
    pub quantity: String,
    pub product: String,
    pub full_name: String,
    pub address: String,
    pub area: String,
    pub city: String,
    pub phone: String,
    pub backup_phone: String,
    pub email: String,
    pub currency: String,
    pub note: String,
    pub link: String,
    /// Order date truncated to its `YYYY-MM-DD` prefix.
    pub date: String,
    pub status: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_order_wire_shape() {
        let order = Order {
            order_id: "ORD-1".to_owned(),
            price: "120".to_owned(),
            status: "New Order".to_owned(),
            ..Order::default()
        };

        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["id"], "ORD-1");
        assert_eq!(json["price"], "120");
        // camelCase field names on the wire
        assert!(json.get("backupPhone").is_some());
        assert!(json.get("fullName").is_some());
        assert!(json.get("order_id").is_none());
    }
}
