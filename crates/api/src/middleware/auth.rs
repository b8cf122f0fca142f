//! Authentication extractor.
//!
//! The session is populated by the external login flow; this module only
//! turns "is there a user in the session" into a typed handler argument.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use serde_json::json;
use tower_sessions::Session;

use crate::models::{CurrentUser, session_keys};

/// Extractor that requires an authenticated user.
///
/// Handlers taking `RequireAuth` never run for anonymous requests, so any
/// user ID they see has been authenticated.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(user): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", user.username)
/// }
/// ```
pub struct RequireAuth(pub CurrentUser);

/// Rejection returned when the request carries no authenticated user.
#[derive(Debug)]
pub struct AuthRejection;

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "detail": "Authentication credentials were not provided." })),
        )
            .into_response()
    }
}

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Set by SessionManagerLayer; absent when the layer is not installed
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(AuthRejection)?;

        let user: CurrentUser = session
            .get(session_keys::CURRENT_USER)
            .await
            .ok()
            .flatten()
            .ok_or(AuthRejection)?;

        crate::error::set_sentry_user(&user.id, &user.username);

        Ok(Self(user))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::Request;

    use super::*;

    #[tokio::test]
    async fn test_missing_session_is_rejected() {
        let (mut parts, ()) = Request::builder()
            .uri("/api/recipes/download_shopping_cart")
            .body(())
            .unwrap()
            .into_parts();

        let result = RequireAuth::from_request_parts(&mut parts, &()).await;
        assert!(result.is_err());
    }

    #[test]
    fn test_rejection_is_unauthorized() {
        assert_eq!(
            AuthRejection.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
    }
}
