//! HTTP route handlers for the API.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                               - Liveness check
//! GET    /health/ready                         - Readiness check (database)
//!
//! # Recipe lists (requires auth)
//! POST   /api/recipes/{id}/shopping_cart       - Add recipe to cart
//! DELETE /api/recipes/{id}/shopping_cart       - Remove recipe from cart
//! POST   /api/recipes/{id}/favorite            - Add recipe to favorites
//! DELETE /api/recipes/{id}/favorite            - Remove recipe from favorites
//!
//! # Shopping list (requires auth)
//! GET    /api/recipes/download_shopping_cart   - Aggregated list as PDF
//! ```

pub mod health;
pub mod recipe_lists;
pub mod shopping_list;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::middleware::{create_session_layer, request_id_middleware};
use crate::state::AppState;

/// Create the recipe routes router.
pub fn recipe_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/{id}/shopping_cart",
            post(recipe_lists::add_to_cart).delete(recipe_lists::remove_from_cart),
        )
        .route(
            "/{id}/favorite",
            post(recipe_lists::add_favorite).delete(recipe_lists::remove_favorite),
        )
        .route("/download_shopping_cart", get(shopping_list::download))
}

/// Create all routes for the API.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .nest("/api/recipes", recipe_routes())
}

/// Build the full application with its middleware stack.
///
/// Sentry layers are added by the binary on top of this so tests can drive the
/// router without a Sentry client.
pub fn app(state: AppState) -> Router {
    let session_layer = create_session_layer(state.pool(), state.config());

    routes()
        .layer(session_layer)
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}
