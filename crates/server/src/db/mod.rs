//! Database operations for the Tassfya `PostgreSQL` store.
//!
//! ## Tables
//!
//! - `employee` - Employee identity + permission records
//! - `sheet_source` - Configured spreadsheet order feeds
//! - `fulfillment_order` - Orders handed to the fulfillment center
//! - `daily_report` - Daily performance rollups for the reports screen
//! - `session` - Server-side session storage
//!
//! Reads are full-collection scans and writes are whole-row upserts keyed
//! by id; there are no partial updates. Queries use the runtime sqlx API so
//! the crate builds without a live database.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p tassfya-cli -- migrate
//! ```

pub mod employees;
pub mod fulfillment;
pub mod reports;
pub mod sheet_sources;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use employees::EmployeeRepository;
pub use fulfillment::FulfillmentRepository;
pub use reports::ReportRepository;
pub use sheet_sources::SheetSourceRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
