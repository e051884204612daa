//! Sheet source repository.
//!
//! Sheet sources are the configured spreadsheet feeds the order projection
//! pulls from. CRUD is open to any authenticated caller holding the
//! `settings` feature; the feature check lives in the route layer.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use tassfya_core::SheetSourceId;

use super::RepositoryError;
use crate::models::SheetSource;

#[derive(Debug, sqlx::FromRow)]
struct SheetSourceRow {
    id: i32,
    url: String,
    site: String,
    created_at: DateTime<Utc>,
}

impl From<SheetSourceRow> for SheetSource {
    fn from(row: SheetSourceRow) -> Self {
        Self {
            id: SheetSourceId::new(row.id),
            url: row.url,
            site: row.site,
            created_at: row.created_at,
        }
    }
}

/// Repository for sheet source database operations.
pub struct SheetSourceRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SheetSourceRepository<'a> {
    /// Create a new sheet source repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all configured sources, oldest first.
    ///
    /// The projection concatenates sheets in exactly this order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<SheetSource>, RepositoryError> {
        let rows = sqlx::query_as::<_, SheetSourceRow>(
            "SELECT id, url, site, created_at FROM sheet_source ORDER BY id",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Add a new source.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, url: &str, site: &str) -> Result<SheetSource, RepositoryError> {
        let row = sqlx::query_as::<_, SheetSourceRow>(
            r"
            INSERT INTO sheet_source (url, site)
            VALUES ($1, $2)
            RETURNING id, url, site, created_at
            ",
        )
        .bind(url)
        .bind(site)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Delete a source by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the source doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: SheetSourceId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM sheet_source WHERE id = $1")
            .bind(id.as_i32())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
