//! External credential issuer client.
//!
//! Account passwords never touch this server: creation and verification are
//! delegated to the issuer, which hands back an opaque subject id. That id
//! is the employee's primary key in the authoritative store.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use tassfya_core::{Email, EmployeeId};

use crate::config::IdentityConfig;

/// Bound on every issuer call; expiry is a retryable network failure.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors that can occur talking to the credential issuer.
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    /// Email/password pair was rejected.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// An identity already exists for this email.
    #[error("email already registered at issuer")]
    EmailExists,

    /// The request failed or timed out.
    #[error("issuer request failed: {0}")]
    Request(String),

    /// The response body could not be decoded.
    #[error("issuer response invalid: {0}")]
    Response(String),

    /// The issuer answered with an unexpected status.
    #[error("issuer returned status {0}")]
    Status(StatusCode),
}

#[derive(Debug, Serialize)]
struct CredentialsPayload<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct SubjectResponse {
    id: String,
}

/// Client for the external credential issuer.
#[derive(Clone)]
pub struct IdentityClient {
    client: Client,
    api_url: String,
    api_key: SecretString,
}

impl std::fmt::Debug for IdentityClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityClient")
            .field("api_url", &self.api_url)
            .field("api_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl IdentityClient {
    /// Create a new issuer client from configuration.
    ///
    /// # Panics
    ///
    /// Panics if the underlying HTTP client cannot be constructed, which
    /// only happens when the TLS backend is unavailable at startup.
    #[must_use]
    pub fn new(config: &IdentityConfig) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("failed to construct HTTP client");

        Self {
            client,
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
        }
    }

    /// Create a new identity; returns the issuer-assigned subject id.
    ///
    /// # Errors
    ///
    /// Returns `IdentityError::EmailExists` when the address is taken,
    /// `IdentityError::Request` on transport failure.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn create_identity(
        &self,
        email: &Email,
        password: &str,
    ) -> Result<EmployeeId, IdentityError> {
        let response = self
            .client
            .post(format!("{}/identities", self.api_url))
            .bearer_auth(self.api_key.expose_secret())
            .json(&CredentialsPayload {
                email: email.as_str(),
                password,
            })
            .send()
            .await
            .map_err(|e| IdentityError::Request(e.to_string()))?;

        match response.status() {
            StatusCode::CONFLICT => return Err(IdentityError::EmailExists),
            status if !status.is_success() => return Err(IdentityError::Status(status)),
            _ => {}
        }

        let body: SubjectResponse = response
            .json()
            .await
            .map_err(|e| IdentityError::Response(e.to_string()))?;

        debug!(subject = %body.id, "identity created at issuer");

        Ok(EmployeeId::new(body.id))
    }

    /// Verify an email/password pair; returns the subject id on success.
    ///
    /// # Errors
    ///
    /// Returns `IdentityError::InvalidCredentials` when the pair is wrong,
    /// `IdentityError::Request` on transport failure.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<EmployeeId, IdentityError> {
        let response = self
            .client
            .post(format!("{}/sessions", self.api_url))
            .bearer_auth(self.api_key.expose_secret())
            .json(&CredentialsPayload { email, password })
            .send()
            .await
            .map_err(|e| IdentityError::Request(e.to_string()))?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::BAD_REQUEST | StatusCode::NOT_FOUND => {
                return Err(IdentityError::InvalidCredentials);
            }
            status if !status.is_success() => return Err(IdentityError::Status(status)),
            _ => {}
        }

        let body: SubjectResponse = response
            .json()
            .await
            .map_err(|e| IdentityError::Response(e.to_string()))?;

        Ok(EmployeeId::new(body.id))
    }

    /// Revoke the issuer-side session for a subject.
    ///
    /// Best effort: a failed revocation is logged, never surfaced, since
    /// the server-side session is already gone by the time this is called.
    #[instrument(skip(self))]
    pub async fn revoke_session(&self, subject: &EmployeeId) {
        let result = self
            .client
            .delete(format!("{}/sessions/{}", self.api_url, subject))
            .bearer_auth(self.api_key.expose_secret())
            .send()
            .await;

        match result {
            Ok(response) if !response.status().is_success() => {
                warn!(status = %response.status(), "issuer session revocation rejected");
            }
            Err(e) => {
                warn!(error = %e, "issuer session revocation failed");
            }
            Ok(_) => {}
        }
    }
}
