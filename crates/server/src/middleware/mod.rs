//! HTTP middleware stack for the API.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. CORS (dashboard SPA origin)
//! 4. Session layer (tower-sessions with `PostgreSQL` store)
//! 5. Auth extractors (require authentication on every `/api` route
//!    except login)

pub mod auth;
pub mod session;

pub use auth::{RequireAuth, clear_current_user, set_current_user};
pub use session::create_session_layer;
