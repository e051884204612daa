//! Spreadsheet read API client.
//!
//! Orders live in external spreadsheets; this module pulls raw cell rows
//! from the values endpoint and leaves interpretation to [`projection`].

pub mod projection;

use std::time::Duration;

use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::{debug, instrument};
use url::Url;

use crate::config::SheetsConfig;

/// Bound on every read call; expiry is a retryable network failure.
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors that can occur reading a spreadsheet feed.
#[derive(Debug, thiserror::Error)]
pub enum SheetsError {
    /// The stored source URL has no extractable spreadsheet id.
    #[error("no spreadsheet id in source url: {0}")]
    InvalidSourceUrl(String),

    /// The request failed or timed out.
    #[error("sheets request failed: {0}")]
    Request(String),

    /// The response body could not be decoded.
    #[error("sheets response invalid: {0}")]
    Response(String),

    /// The spreadsheet or range does not exist.
    #[error("spreadsheet not found")]
    NotFound,

    /// A required header column is missing from the sheet.
    #[error("missing header column: {0}")]
    MissingColumn(&'static str),
}

/// Values-endpoint response body.
#[derive(Debug, Deserialize)]
struct ValuesResponse {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

/// Client for the spreadsheet values API.
#[derive(Clone)]
pub struct SheetsClient {
    client: Client,
    api_url: String,
    api_key: SecretString,
    order_range: String,
}

impl std::fmt::Debug for SheetsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SheetsClient")
            .field("api_url", &self.api_url)
            .field("api_key", &"[REDACTED]")
            .field("order_range", &self.order_range)
            .finish_non_exhaustive()
    }
}

impl SheetsClient {
    /// Create a new sheets client from configuration.
    ///
    /// # Panics
    ///
    /// Panics if the underlying HTTP client cannot be constructed, which
    /// only happens when the TLS backend is unavailable at startup.
    #[must_use]
    pub fn new(config: &SheetsConfig) -> Self {
        let client = Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .expect("failed to construct HTTP client");

        Self {
            client,
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            order_range: config.order_range.clone(),
        }
    }

    /// The configured cell range (header row included).
    #[must_use]
    pub fn order_range(&self) -> &str {
        &self.order_range
    }

    /// Fetch the configured range of a spreadsheet as raw cell rows.
    ///
    /// # Errors
    ///
    /// Returns `SheetsError::NotFound` for an unknown spreadsheet or range,
    /// `SheetsError::Request` for transport failures (including timeout),
    /// and `SheetsError::Response` for undecodable bodies.
    #[instrument(skip(self), fields(spreadsheet_id = %spreadsheet_id))]
    pub async fn fetch_rows(&self, spreadsheet_id: &str) -> Result<Vec<Vec<String>>, SheetsError> {
        let url = format!(
            "{}/v4/spreadsheets/{}/values/{}",
            self.api_url, spreadsheet_id, self.order_range
        );

        let response = self
            .client
            .get(url)
            .query(&[("key", self.api_key.expose_secret())])
            .send()
            .await
            .map_err(|e| SheetsError::Request(e.to_string()))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(SheetsError::NotFound);
        }
        if !response.status().is_success() {
            return Err(SheetsError::Request(format!(
                "unexpected status {}",
                response.status()
            )));
        }

        let body: ValuesResponse = response
            .json()
            .await
            .map_err(|e| SheetsError::Response(e.to_string()))?;

        debug!(rows = body.values.len(), "sheet range fetched");

        Ok(body.values)
    }
}

/// Extract the spreadsheet id from a stored source URL.
///
/// The id is the path segment following `/d/`, e.g.
/// `https://docs.google.com/spreadsheets/d/{id}/edit`.
///
/// # Errors
///
/// Returns `SheetsError::InvalidSourceUrl` if the URL does not parse or has
/// no `/d/{id}` segment.
pub fn extract_spreadsheet_id(source_url: &str) -> Result<String, SheetsError> {
    let parsed =
        Url::parse(source_url).map_err(|_| SheetsError::InvalidSourceUrl(source_url.to_owned()))?;

    let mut segments = parsed
        .path_segments()
        .ok_or_else(|| SheetsError::InvalidSourceUrl(source_url.to_owned()))?;

    let id = segments
        .by_ref()
        .skip_while(|s| *s != "d")
        .nth(1)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| SheetsError::InvalidSourceUrl(source_url.to_owned()))?;

    Ok(id.to_owned())
}
