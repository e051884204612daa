//! Employee management commands.
//!
//! The bootstrap path for the very first admin: talks to the credential
//! issuer and the store directly, bypassing the HTTP API (which would
//! require an existing authenticated admin).
//!
//! # Environment Variables
//!
//! - `TASSFYA_DATABASE_URL` - `PostgreSQL` connection string
//! - `IDENTITY_API_URL` / `IDENTITY_API_KEY` - Credential issuer access

use secrecy::SecretString;
use sqlx::PgPool;
use thiserror::Error;

use tassfya_core::{Email, EmployeeStatus, PermissionSet, Role};
use tassfya_server::config::IdentityConfig;
use tassfya_server::db::{EmployeeRepository, RepositoryError};
use tassfya_server::identity::{IdentityClient, IdentityError};

/// Errors that can occur during employee operations.
#[derive(Debug, Error)]
pub enum EmployeeError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database connection error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Repository error.
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Credential issuer error.
    #[error("Credential issuer error: {0}")]
    Identity(#[from] IdentityError),

    /// Invalid role.
    #[error("Invalid role: {0}. Valid roles: admin, agent")]
    InvalidRole(String),

    /// Invalid name.
    #[error("Invalid name: {0}")]
    InvalidName(String),

    /// Employee already exists.
    #[error("Employee already exists with email: {0}")]
    EmployeeExists(String),
}

/// Create a new employee.
///
/// The email is derived from the name; the password goes to the issuer
/// and never touches the store. The stored permission set is left empty:
/// for an admin the full set is resolved at login, for an agent grants
/// are handed out later through the dashboard.
///
/// # Errors
///
/// Returns `EmployeeError` when validation, the issuer call, or the store
/// write fails.
pub async fn create(name: &str, password: &str, role: &str) -> Result<(), EmployeeError> {
    dotenvy::dotenv().ok();

    let role: Role = role
        .parse()
        .map_err(|_| EmployeeError::InvalidRole(role.to_owned()))?;

    let email =
        Email::derive_for_employee(name).map_err(|e| EmployeeError::InvalidName(e.to_string()))?;

    let database_url = std::env::var("TASSFYA_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map_err(|_| EmployeeError::MissingEnvVar("TASSFYA_DATABASE_URL"))?;
    let identity_url = std::env::var("IDENTITY_API_URL")
        .map_err(|_| EmployeeError::MissingEnvVar("IDENTITY_API_URL"))?;
    let identity_key = std::env::var("IDENTITY_API_KEY")
        .map_err(|_| EmployeeError::MissingEnvVar("IDENTITY_API_KEY"))?;

    tracing::info!("Connecting to database...");
    let pool = PgPool::connect(&database_url).await?;
    let repo = EmployeeRepository::new(&pool);

    if repo.get_by_email(&email).await?.is_some() {
        return Err(EmployeeError::EmployeeExists(email.into_inner()));
    }

    let identity = IdentityClient::new(&IdentityConfig {
        api_url: identity_url,
        api_key: SecretString::from(identity_key),
    });

    tracing::info!("Creating identity at issuer: {}", email);
    let subject = identity.create_identity(&email, password).await?;

    let employee = repo
        .upsert(
            &subject,
            name.trim(),
            &email,
            role,
            EmployeeStatus::Active,
            &PermissionSet::new(),
        )
        .await?;

    tracing::info!(
        "Created {} employee {} ({})",
        employee.role,
        employee.name,
        employee.email
    );

    Ok(())
}
