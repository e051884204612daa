//! Fulfillment order repository.
//!
//! The fulfillment center screen shows orders that were handed off for
//! preparation, newest first. Amount and date stay raw sheet text; the
//! record is a snapshot, not a live projection.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use tassfya_core::FulfillmentOrderId;

use super::RepositoryError;
use crate::models::FulfillmentOrder;

#[derive(Debug, sqlx::FromRow)]
struct FulfillmentOrderRow {
    id: i32,
    order_id: String,
    order_date: String,
    status: String,
    employee: String,
    city: String,
    amount: String,
    recorded_at: DateTime<Utc>,
}

impl From<FulfillmentOrderRow> for FulfillmentOrder {
    fn from(row: FulfillmentOrderRow) -> Self {
        Self {
            id: FulfillmentOrderId::new(row.id),
            order_id: row.order_id,
            date: row.order_date,
            status: row.status,
            employee: row.employee,
            city: row.city,
            amount: row.amount,
            recorded_at: row.recorded_at,
        }
    }
}

/// Repository for fulfillment order database operations.
pub struct FulfillmentRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> FulfillmentRepository<'a> {
    /// Create a new fulfillment repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List recorded orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<FulfillmentOrder>, RepositoryError> {
        let rows = sqlx::query_as::<_, FulfillmentOrderRow>(
            r"
            SELECT id, order_id, order_date, status, employee, city, amount, recorded_at
            FROM fulfillment_order
            ORDER BY recorded_at DESC, id DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Record an order handed to fulfillment.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn record(
        &self,
        order_id: &str,
        date: &str,
        status: &str,
        employee: &str,
        city: &str,
        amount: &str,
    ) -> Result<FulfillmentOrder, RepositoryError> {
        let row = sqlx::query_as::<_, FulfillmentOrderRow>(
            r"
            INSERT INTO fulfillment_order (order_id, order_date, status, employee, city, amount)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, order_id, order_date, status, employee, city, amount, recorded_at
            ",
        )
        .bind(order_id)
        .bind(date)
        .bind(status)
        .bind(employee)
        .bind(city)
        .bind(amount)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }
}
