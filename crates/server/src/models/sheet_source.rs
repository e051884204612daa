//! Sheet source domain type.

use chrono::{DateTime, Utc};
use serde::Serialize;

use tassfya_core::SheetSourceId;

/// A configured spreadsheet order feed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetSource {
    pub id: SheetSourceId,
    /// Full spreadsheet URL; the spreadsheet id is extracted from its
    /// `/d/{id}` path segment at load time.
    pub url: String,
    /// Site name or URL this feed sells through.
    pub site: String,
    pub created_at: DateTime<Utc>,
}
