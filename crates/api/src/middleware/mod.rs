//! HTTP middleware stack for the API.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (request span with method, URI, status, latency)
//! 3. Request ID (propagate or generate `x-request-id`)
//! 4. Session layer (read-only view of the login flow's `PostgreSQL` store)

pub mod auth;
pub mod request_id;
pub mod session;

pub use auth::{AuthRejection, RequireAuth};
pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
pub use session::{SESSION_COOKIE_NAME, SESSION_INACTIVITY, create_session_layer, session_store};
