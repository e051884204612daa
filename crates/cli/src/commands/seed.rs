//! Demo data seeding.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use thiserror::Error;

use tassfya_server::db::{ReportRepository, RepositoryError};
use tassfya_server::models::DailyReport;

/// Errors that can occur while seeding.
#[derive(Debug, Error)]
pub enum SeedError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database connection error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Repository error.
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Invalid literal in the seed table.
    #[error("Invalid seed value: {0}")]
    InvalidValue(String),
}

/// A week of demo rollups for the reports screen.
const DEMO_DAYS: [(&str, i32, i64, i64, i32); 7] = [
    ("2025-07-09", 80, 10_000, 2_800, 4),
    ("2025-07-10", 60, 8_000, 2_000, 6),
    ("2025-07-11", 55, 7_500, 1_800, 8),
    ("2025-07-12", 50, 7_000, 1_600, 5),
    ("2025-07-13", 65, 8_500, 2_300, 7),
    ("2025-07-14", 75, 11_000, 3_000, 3),
    ("2025-07-15", 65, 9_000, 2_500, 7),
];

/// Seed the demo daily report rollups.
///
/// # Errors
///
/// Returns `SeedError` if the database is unreachable or a write fails.
pub async fn reports() -> Result<(), SeedError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("TASSFYA_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map_err(|_| SeedError::MissingEnvVar("TASSFYA_DATABASE_URL"))?;

    tracing::info!("Connecting to database...");
    let pool = PgPool::connect(&database_url).await?;
    let repo = ReportRepository::new(&pool);

    for (day, orders, revenue, ad_spend, cancelled) in DEMO_DAYS {
        let day: NaiveDate = day
            .parse()
            .map_err(|_| SeedError::InvalidValue(day.to_owned()))?;

        repo.upsert_day(&DailyReport {
            day,
            orders,
            revenue: Decimal::from(revenue),
            ad_spend: Decimal::from(ad_spend),
            cancelled,
        })
        .await?;
    }

    tracing::info!("Seeded {} demo report days", DEMO_DAYS.len());
    Ok(())
}
