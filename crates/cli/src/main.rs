//! Tassfya CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! tassfya-cli migrate
//!
//! # Create the bootstrap admin employee
//! tassfya-cli employee create -n "Admin Name" -p "password" --role admin
//!
//! # Seed demo report rollups
//! tassfya-cli seed reports
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `employee create` - Create an employee (issuer credential + store row)
//! - `seed reports` - Seed demo daily report rollups

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "tassfya-cli")]
#[command(author, version, about = "Tassfya CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage employees
    Employee {
        #[command(subcommand)]
        action: EmployeeAction,
    },
    /// Seed demo data
    Seed {
        #[command(subcommand)]
        target: SeedTarget,
    },
}

#[derive(Subcommand)]
enum EmployeeAction {
    /// Create an employee (bootstrap path, bypasses the HTTP API)
    Create {
        /// Display name; the email address is derived from it
        #[arg(short, long)]
        name: String,
        /// Initial password, forwarded to the credential issuer
        #[arg(short, long)]
        password: String,
        /// Role (admin or agent)
        #[arg(short, long, default_value = "agent")]
        role: String,
    },
}

#[derive(Subcommand)]
enum SeedTarget {
    /// Seed a week of demo daily report rollups
    Reports,
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tassfya_cli=info,tassfya_server=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Migrate => commands::migrate::run().await.map_err(|e| e.to_string()),
        Commands::Employee {
            action:
                EmployeeAction::Create {
                    name,
                    password,
                    role,
                },
        } => commands::employee::create(&name, &password, &role)
            .await
            .map_err(|e| e.to_string()),
        Commands::Seed {
            target: SeedTarget::Reports,
        } => commands::seed::reports().await.map_err(|e| e.to_string()),
    };

    match result {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(message) => {
            tracing::error!("{message}");
            std::process::ExitCode::FAILURE
        }
    }
}
