//! Order projection service.
//!
//! Holds the transient in-memory view of the external sheets. The view is
//! re-materialized on every list request, and mutations follow a strict
//! commit-after-ack discipline: the webhook must report success before the
//! local view is patched, so the displayed state can never silently
//! diverge from the endpoint's.
//!
//! Concurrent loads race benignly: the last completed load wins the lock,
//! matching the rest of the system's last-write-wins model.

use tokio::sync::RwLock;
use tracing::{instrument, warn};

use crate::models::{Order, SheetSource};
use crate::sheets::{SheetsClient, extract_spreadsheet_id, projection};
use crate::webhook::{OrderWebhookClient, WebhookError};

/// Order projection over the configured sheet feeds.
pub struct OrderService {
    sheets: SheetsClient,
    webhook: OrderWebhookClient,
    projection: RwLock<Vec<Order>>,
}

impl OrderService {
    /// Create a new order service.
    #[must_use]
    pub fn new(sheets: SheetsClient, webhook: OrderWebhookClient) -> Self {
        Self {
            sheets,
            webhook,
            projection: RwLock::new(Vec::new()),
        }
    }

    /// Materialize the projection from every configured source.
    ///
    /// Sources are fetched in configuration order and concatenated source
    /// by source, row by row. A source that fails to fetch or parse
    /// contributes nothing: the condition is logged and the load degrades
    /// gracefully instead of surfacing an error to the caller.
    #[instrument(skip(self, sources), fields(sources = sources.len()))]
    pub async fn load(&self, sources: &[SheetSource]) -> Vec<Order> {
        let mut per_sheet = Vec::with_capacity(sources.len());

        for source in sources {
            per_sheet.push(self.load_one(source).await);
        }

        let orders = projection::concat_sheets(per_sheet);

        let mut current = self.projection.write().await;
        current.clone_from(&orders);

        orders
    }

    /// Fetch and project a single source, degrading to empty on failure.
    async fn load_one(&self, source: &SheetSource) -> Vec<Order> {
        let spreadsheet_id = match extract_spreadsheet_id(&source.url) {
            Ok(id) => id,
            Err(e) => {
                warn!(source = %source.id, error = %e, "skipping unreadable sheet source");
                return Vec::new();
            }
        };

        let values = match self.sheets.fetch_rows(&spreadsheet_id).await {
            Ok(values) => values,
            Err(e) => {
                warn!(source = %source.id, error = %e, "sheet fetch failed");
                return Vec::new();
            }
        };

        match projection::parse_sheet(&values) {
            Ok(orders) => orders,
            Err(e) => {
                warn!(source = %source.id, error = %e, "sheet rows did not match column contract");
                Vec::new()
            }
        }
    }

    /// The last materialized projection.
    pub async fn current(&self) -> Vec<Order> {
        self.projection.read().await.clone()
    }

    /// Dispatch an order update and commit it locally on acknowledgment.
    ///
    /// The projection is patched (matching on order id) only after the
    /// endpoint reports `success: true`; a rejection or transport failure
    /// leaves the projection untouched.
    ///
    /// # Errors
    ///
    /// Returns `WebhookError::Rejected` when the endpoint reports failure,
    /// `WebhookError::Request` on transport failure.
    #[instrument(skip(self, order), fields(order_id = %order.order_id))]
    pub async fn update(&self, order: Order) -> Result<(), WebhookError> {
        self.webhook.dispatch_update(&order).await?;

        let mut current = self.projection.write().await;
        if let Some(slot) = current.iter_mut().find(|o| o.order_id == order.order_id) {
            *slot = order;
        }

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::{Json, Router, routing::post};
    use secrecy::SecretString;
    use serde_json::json;

    use crate::config::{SheetsConfig, WebhookConfig};

    use super::*;

    /// Spawn a stub webhook endpoint answering with the given ack.
    async fn stub_webhook(success: bool) -> String {
        let app = Router::new().route(
            "/",
            post(move || async move { Json(json!({ "success": success })) }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{addr}/")
    }

    fn service(webhook_url: String) -> OrderService {
        let sheets = SheetsClient::new(&SheetsConfig {
            api_url: "http://127.0.0.1:9".to_owned(),
            api_key: SecretString::from("k9QzR2vX8mN4pL6w"),
            order_range: "Orders!A1:Z".to_owned(),
        });
        let webhook = OrderWebhookClient::new(&WebhookConfig { url: webhook_url });
        OrderService::new(sheets, webhook)
    }

    fn order(id: &str, status: &str) -> Order {
        Order {
            order_id: id.to_owned(),
            status: status.to_owned(),
            ..Order::default()
        }
    }

    #[tokio::test]
    async fn rejected_update_leaves_projection_unchanged() {
        let url = stub_webhook(false).await;
        let service = service(url);

        {
            let mut projection = service.projection.write().await;
            *projection = vec![order("ORD-1", "New Order"), order("ORD-2", "New Order")];
        }
        let before = service.current().await;

        let result = service.update(order("ORD-1", "✅ Confirmed")).await;

        assert!(matches!(result, Err(WebhookError::Rejected)));
        assert_eq!(service.current().await, before);
    }

    #[tokio::test]
    async fn acknowledged_update_patches_matching_order() {
        let url = stub_webhook(true).await;
        let service = service(url);

        {
            let mut projection = service.projection.write().await;
            *projection = vec![order("ORD-1", "New Order"), order("ORD-2", "New Order")];
        }

        service
            .update(order("ORD-2", "✅ Confirmed"))
            .await
            .unwrap();

        let after = service.current().await;
        assert_eq!(after.len(), 2);
        assert_eq!(after.first().unwrap().status, "New Order");
        assert_eq!(after.get(1).unwrap().status, "✅ Confirmed");
    }

    #[tokio::test]
    async fn transport_failure_surfaces_and_preserves_projection() {
        // Nothing listens on this port.
        let service = service("http://127.0.0.1:1/".to_owned());

        {
            let mut projection = service.projection.write().await;
            *projection = vec![order("ORD-1", "New Order")];
        }
        let before = service.current().await;

        let result = service.update(order("ORD-1", "✅ Confirmed")).await;

        assert!(matches!(result, Err(WebhookError::Request(_))));
        assert_eq!(service.current().await, before);
    }

    #[tokio::test]
    async fn load_degrades_to_empty_on_unreachable_sources() {
        let service = service("http://127.0.0.1:1/".to_owned());

        let sources = vec![SheetSource {
            id: tassfya_core::SheetSourceId::new(1),
            url: "https://docs.google.com/spreadsheets/d/abc/edit".to_owned(),
            site: "perfumes.example".to_owned(),
            created_at: chrono::Utc::now(),
        }];

        let orders = service.load(&sources).await;
        assert!(orders.is_empty());
        assert!(service.current().await.is_empty());
    }
}
