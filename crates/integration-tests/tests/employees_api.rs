//! Integration tests for employee administration.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The server running (cargo run -p tassfya-server)
//! - A seeded admin and a reachable credential issuer
//!
//! Run with: cargo test -p tassfya-integration-tests -- --ignored

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use uuid::Uuid;

use tassfya_integration_tests::{admin_client, base_url};

/// Create a test employee via the API, returning its record.
async fn create_test_employee(client: &Client, permissions: &[&str]) -> Value {
    let name = format!("It Test {}", &Uuid::new_v4().simple().to_string()[..8]);

    let resp = client
        .post(format!("{}/api/employees", base_url()))
        .json(&json!({
            "name": name,
            "password": "it-test-password",
            "status": "active",
            "permissions": permissions,
        }))
        .send()
        .await
        .expect("Failed to create test employee");

    assert_eq!(resp.status(), StatusCode::CREATED);
    resp.json().await.expect("Failed to read created employee")
}

/// Delete a test employee via the API.
async fn delete_test_employee(client: &Client, id: &str) {
    let _ = client
        .delete(format!("{}/api/employees/{id}", base_url()))
        .send()
        .await;
}

#[tokio::test]
#[ignore = "Requires running server, seeded admin, and credential issuer"]
async fn create_derives_email_from_name() {
    let client = admin_client().await;

    let employee = create_test_employee(&client, &["orders"]).await;

    let name = employee["name"].as_str().unwrap();
    let expected: String = name
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    assert_eq!(
        employee["email"].as_str().unwrap(),
        format!("{expected}@tassfya.com")
    );
    assert_eq!(employee["role"], "agent");

    delete_test_employee(&client, employee["id"].as_str().unwrap()).await;
}

#[tokio::test]
#[ignore = "Requires running server, seeded admin, and credential issuer"]
async fn create_rejects_blank_fields() {
    let client = admin_client().await;

    let resp = client
        .post(format!("{}/api/employees", base_url()))
        .json(&json!({ "name": "", "password": "" }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
#[ignore = "Requires running server, seeded admin, and credential issuer"]
async fn deleted_employee_never_reappears_in_list() {
    let client = admin_client().await;
    let base = base_url();

    let employee = create_test_employee(&client, &[]).await;
    let id = employee["id"].as_str().unwrap().to_owned();

    let resp = client
        .delete(format!("{base}/api/employees/{id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let list: Vec<Value> = client
        .get(format!("{base}/api/employees"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert!(
        list.iter().all(|e| e["id"].as_str() != Some(id.as_str())),
        "deleted employee leaked back into the list"
    );
}

#[tokio::test]
#[ignore = "Requires running server, seeded admin, and credential issuer"]
async fn update_of_unknown_employee_is_404() {
    let client = admin_client().await;

    let resp = client
        .put(format!("{}/api/employees/no-such-subject", base_url()))
        .json(&json!({
            "name": "Ghost",
            "status": "active",
            "permissions": [],
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
