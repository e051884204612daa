//! Daily report repository.
//!
//! Rollups are written once per day (via the CLI seeder or an external
//! job) and read back by the reports screen as an inclusive date range.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;

use super::RepositoryError;
use crate::models::DailyReport;

#[derive(Debug, sqlx::FromRow)]
struct DailyReportRow {
    day: NaiveDate,
    orders: i32,
    revenue: Decimal,
    ad_spend: Decimal,
    cancelled: i32,
}

impl From<DailyReportRow> for DailyReport {
    fn from(row: DailyReportRow) -> Self {
        Self {
            day: row.day,
            orders: row.orders,
            revenue: row.revenue,
            ad_spend: row.ad_spend,
            cancelled: row.cancelled,
        }
    }
}

/// Repository for daily report database operations.
pub struct ReportRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ReportRepository<'a> {
    /// Create a new report repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List rollups within an inclusive date range, oldest first.
    ///
    /// `None` bounds are open-ended.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_range(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<DailyReport>, RepositoryError> {
        let rows = sqlx::query_as::<_, DailyReportRow>(
            r"
            SELECT day, orders, revenue, ad_spend, cancelled
            FROM daily_report
            WHERE ($1::date IS NULL OR day >= $1)
              AND ($2::date IS NULL OR day <= $2)
            ORDER BY day
            ",
        )
        .bind(from)
        .bind(to)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Upsert one day's rollup.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the write fails.
    pub async fn upsert_day(&self, report: &DailyReport) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO daily_report (day, orders, revenue, ad_spend, cancelled)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (day) DO UPDATE SET
                orders = EXCLUDED.orders,
                revenue = EXCLUDED.revenue,
                ad_spend = EXCLUDED.ad_spend,
                cancelled = EXCLUDED.cancelled
            ",
        )
        .bind(report.day)
        .bind(report.orders)
        .bind(report.revenue)
        .bind(report.ad_spend)
        .bind(report.cancelled)
        .execute(self.pool)
        .await?;

        Ok(())
    }
}
