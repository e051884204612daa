//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                             - Liveness check
//! GET  /health/ready                       - Readiness check (DB ping)
//!
//! # Auth
//! POST /api/auth/login                     - Email/password login
//! POST /api/auth/logout                    - Destroy session
//! GET  /api/auth/me                        - Session identity + permissions
//!
//! # Employees (feature: employees)
//! GET    /api/employees                    - List employees
//! POST   /api/employees                    - Create employee
//! PUT    /api/employees/{id}               - Update employee
//! DELETE /api/employees/{id}               - Delete employee (admin only)
//!
//! # Orders (feature: orders)
//! GET  /api/orders                         - Materialize projection from sheets
//! POST /api/orders/update                  - Forward update to webhook
//!
//! # Dashboard (feature: dashboard)
//! GET  /api/dashboard/metrics              - Filtered status counts + revenue
//!
//! # Reports (feature: reports)
//! GET  /api/reports/summary                - Daily rollups + range totals
//!
//! # Ads (feature: ads)
//! POST /api/ads/estimate                   - Ad-spend estimate
//!
//! # Fulfillment (feature: fulfillment)
//! GET  /api/fulfillment/orders             - Recorded orders, newest first
//! POST /api/fulfillment/orders             - Record a hand-off
//!
//! # Settings (feature: settings)
//! GET    /api/settings/sheet-sources       - List configured feeds
//! POST   /api/settings/sheet-sources       - Add a feed
//! DELETE /api/settings/sheet-sources/{id}  - Remove a feed
//! ```
//!
//! Every `/api` route except login requires an authenticated session; the
//! matching feature key is additionally enforced per route group through
//! the permission model.

pub mod ads;
pub mod auth;
pub mod dashboard;
pub mod employees;
pub mod fulfillment;
pub mod orders;
pub mod reports;
pub mod settings;

use axum::Router;

use crate::state::AppState;

/// Build the API router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(employees::router())
        .merge(orders::router())
        .merge(dashboard::router())
        .merge(reports::router())
        .merge(ads::router())
        .merge(fulfillment::router())
        .merge(settings::router())
}
