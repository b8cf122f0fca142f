//! Session store shared with the login flow.
//!
//! Sign-in happens in a separate service. It writes a [`CurrentUser`] under
//! [`CURRENT_USER`] into the `tower_sessions` table and hands the browser a
//! [`SESSION_COOKIE_NAME`] cookie. This API opens the same store and only reads
//! that record back through [`RequireAuth`](super::RequireAuth); no handler
//! writes to a session, so responses never carry a fresh `Set-Cookie`.
//!
//! [`CurrentUser`]: crate::models::CurrentUser
//! [`CURRENT_USER`]: crate::models::session_keys::CURRENT_USER

use sqlx::PgPool;
use tower_sessions::cookie::{SameSite, time::Duration};
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::PostgresStore;

use crate::config::ApiConfig;

/// Cookie set by the login flow.
pub const SESSION_COOKIE_NAME: &str = "foodgram_session";

/// Inactivity window after which the login flow's sessions lapse.
pub const SESSION_INACTIVITY: Duration = Duration::days(7);

/// The store sessions are read from.
///
/// Its table is created by `foodgram migrate`, not on startup.
#[must_use]
pub fn session_store(pool: &PgPool) -> PostgresStore {
    PostgresStore::new(pool.clone())
}

/// Session layer that resolves the login flow's cookie to a stored record.
#[must_use]
pub fn create_session_layer(
    pool: &PgPool,
    config: &ApiConfig,
) -> SessionManagerLayer<PostgresStore> {
    SessionManagerLayer::new(session_store(pool))
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(SESSION_INACTIVITY))
        .with_secure(config.is_secure())
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}
