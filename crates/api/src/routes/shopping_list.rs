//! Shopping list download.
//!
//! Aggregates the user's cart, renders it to PDF, and returns the document as
//! an attachment. An empty cart still yields a valid title-only PDF.

use axum::{
    extract::State,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::instrument;

use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::services::shopping_list::{aggregate_cart, render_blocking};
use crate::state::AppState;

/// MIME type of the rendered document.
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// `Content-Disposition` sent with every shopping list.
pub const SHOPPING_LIST_DISPOSITION: &str = r#"attachment; filename="shopping_cart.pdf""#;

/// Download the shopping list as a PDF.
///
/// GET /api/recipes/download_shopping_cart
#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn download(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Response> {
    let lines = aggregate_cart(state.pool(), user.id).await?;
    let line_count = lines.len();

    let document = render_blocking(lines, state.config().font.clone()).await?;

    tracing::info!(
        lines = line_count,
        bytes = document.len(),
        "Shopping list delivered"
    );
    Ok(pdf_attachment(document))
}

/// Wrap a rendered document in a downloadable response.
#[must_use]
pub fn pdf_attachment(document: Vec<u8>) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(PDF_CONTENT_TYPE)),
            (
                header::CONTENT_DISPOSITION,
                HeaderValue::from_static(SHOPPING_LIST_DISPOSITION),
            ),
        ],
        document,
    )
        .into_response()
}
