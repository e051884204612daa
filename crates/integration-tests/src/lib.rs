//! Integration tests for Tassfya.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database and run migrations
//! tassfya-cli migrate
//!
//! # Start the server
//! cargo run -p tassfya-server
//!
//! # Run integration tests
//! cargo test -p tassfya-integration-tests -- --ignored
//! ```
//!
//! The tests talk to a running server over HTTP and therefore need the
//! full environment (database, credential issuer, seeded admin) to be up;
//! each is `#[ignore]`d so plain `cargo test` stays hermetic.

use reqwest::Client;

/// Base URL for the API (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("TASSFYA_BASE_URL").unwrap_or_else(|_| "http://localhost:4000".to_string())
}

/// Credentials of the seeded admin used to drive authenticated tests.
#[must_use]
pub fn admin_credentials() -> (String, String) {
    let email = std::env::var("TEST_ADMIN_EMAIL")
        .unwrap_or_else(|_| "testadmin@tassfya.com".to_string());
    let password =
        std::env::var("TEST_ADMIN_PASSWORD").unwrap_or_else(|_| "integration-tests".to_string());
    (email, password)
}

/// Create an HTTP client with a cookie store (sessions are cookie-based).
///
/// # Panics
///
/// Panics if the client cannot be constructed.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// Log in as the seeded admin, returning the authenticated client.
///
/// # Panics
///
/// Panics if login fails; the environment is misconfigured in that case.
pub async fn admin_client() -> Client {
    let client = client();
    let (email, password) = admin_credentials();

    let resp = client
        .post(format!("{}/api/auth/login", base_url()))
        .json(&serde_json::json!({ "email": email, "password": password }))
        .send()
        .await
        .expect("Failed to reach login endpoint");

    assert!(
        resp.status().is_success(),
        "admin login failed with status {}",
        resp.status()
    );

    client
}
