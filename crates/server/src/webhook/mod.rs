//! Order-update webhook client.
//!
//! Order mutations are not applied transactionally anywhere on this side:
//! the full order record is dispatched to an external endpoint, and only a
//! positive `{"success": true}` acknowledgment allows the caller to commit
//! its local view.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::config::WebhookConfig;
use crate::models::Order;

/// Bound on every dispatch; expiry is a retryable network failure.
const DISPATCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors that can occur dispatching an order update.
#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    /// The request failed or timed out.
    #[error("webhook request failed: {0}")]
    Request(String),

    /// The response body could not be decoded.
    #[error("webhook response invalid: {0}")]
    Response(String),

    /// The endpoint acknowledged the request but reported failure.
    #[error("order update rejected by endpoint")]
    Rejected,
}

/// Acknowledgment body returned by the endpoint.
#[derive(Debug, Deserialize)]
struct Ack {
    #[serde(default)]
    success: bool,
}

/// Client for the order-update webhook.
#[derive(Debug, Clone)]
pub struct OrderWebhookClient {
    client: Client,
    url: String,
}

impl OrderWebhookClient {
    /// Create a new webhook client from configuration.
    ///
    /// # Panics
    ///
    /// Panics if the underlying HTTP client cannot be constructed, which
    /// only happens when the TLS backend is unavailable at startup.
    #[must_use]
    pub fn new(config: &WebhookConfig) -> Self {
        let client = Client::builder()
            .timeout(DISPATCH_TIMEOUT)
            .build()
            .expect("failed to construct HTTP client");

        Self {
            client,
            url: config.url.clone(),
        }
    }

    /// Dispatch a full order record and await acknowledgment.
    ///
    /// # Errors
    ///
    /// Returns `WebhookError::Rejected` when the endpoint reports
    /// `success: false`, `WebhookError::Request` on transport failure.
    #[instrument(skip(self, order), fields(order_id = %order.order_id))]
    pub async fn dispatch_update(&self, order: &Order) -> Result<(), WebhookError> {
        let response = self
            .client
            .post(&self.url)
            .json(order)
            .send()
            .await
            .map_err(|e| WebhookError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(WebhookError::Request(format!(
                "unexpected status {}",
                response.status()
            )));
        }

        let ack: Ack = response
            .json()
            .await
            .map_err(|e| WebhookError::Response(e.to_string()))?;

        if !ack.success {
            return Err(WebhookError::Rejected);
        }

        debug!("order update acknowledged");

        Ok(())
    }
}
