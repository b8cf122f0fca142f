//! Shopping list pipeline: cart aggregation, page layout, PDF output.
//!
//! ```text
//! CartRepository::ingredient_lines ─► foodgram_core::aggregate ─► layout ─► pdf
//! ```
//!
//! Aggregation is async (it reads the store); rendering is pure CPU work and
//! runs on the blocking pool so a large list never stalls the runtime.

pub mod layout;
pub mod pdf;

use std::path::PathBuf;

use sqlx::PgPool;
use thiserror::Error;
use tracing::instrument;

use foodgram_core::{AggregatedLine, UserId, aggregate};

use crate::db::{CartRepository, RepositoryError};

pub use layout::{Layout, Page, TextRun};

/// Typeface used when drawing the shopping list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FontSource {
    /// DejaVu Sans, compiled into the binary.
    #[default]
    Embedded,
    /// A TrueType file read on every render and embedded into the document.
    File(PathBuf),
}

/// Errors that can occur while rendering a shopping list.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The configured font file could not be read.
    #[error("font {path} unavailable: {source}")]
    FontUnavailable {
        /// Path that failed to load.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The font data is not a usable TrueType face.
    #[error("invalid font: {0}")]
    InvalidFont(String),

    /// The font has no glyph for a character of the list.
    #[error("font has no glyph for {0:?}")]
    UnsupportedCharacter(char),

    /// Serializing the document failed.
    #[error("pdf writer error: {0}")]
    Pdf(String),

    /// The render task panicked or was cancelled.
    #[error("render task failed: {0}")]
    Task(String),
}

/// Collect the aggregated shopping list for a user's cart.
///
/// Returns an empty list when the cart is empty.
///
/// # Errors
///
/// Returns `RepositoryError` if the store read fails or holds an invalid amount.
#[instrument(skip(pool))]
pub async fn aggregate_cart(
    pool: &PgPool,
    user_id: UserId,
) -> Result<Vec<AggregatedLine>, RepositoryError> {
    let lines = CartRepository::new(pool).ingredient_lines(user_id).await?;
    let list = aggregate(lines);

    tracing::debug!(lines = list.len(), "Shopping list aggregated");
    Ok(list)
}

/// Render aggregated lines into a PDF document.
///
/// The layout is computed first, then the font is loaded and registered once
/// for the whole document. Font data lives only for the duration of the call.
///
/// # Errors
///
/// Returns `RenderError` if the font cannot be loaded or the PDF cannot be written.
pub fn render(lines: &[AggregatedLine], font: &FontSource) -> Result<Vec<u8>, RenderError> {
    let layout = layout::layout(lines);
    pdf::write(&layout, font)
}

/// Render on the blocking thread pool.
///
/// # Errors
///
/// Returns `RenderError` if rendering fails or the worker task does not complete.
pub async fn render_blocking(
    lines: Vec<AggregatedLine>,
    font: FontSource,
) -> Result<Vec<u8>, RenderError> {
    tokio::task::spawn_blocking(move || render(&lines, &font))
        .await
        .map_err(|e| RenderError::Task(e.to_string()))?
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_render_embedded_font_produces_pdf() {
        let lines = vec![AggregatedLine::new("Flour", "g", 500)];
        let bytes = render(&lines, &FontSource::Embedded).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn test_render_empty_list_produces_pdf() {
        let bytes = render(&[], &FontSource::Embedded).unwrap();

        let doc = lopdf::Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn test_render_missing_font_file() {
        let font = FontSource::File(PathBuf::from("/nonexistent/fonts/missing.ttf"));
        let err = render(&[], &font).unwrap_err();
        assert!(matches!(err, RenderError::FontUnavailable { .. }));
        assert!(err.to_string().contains("missing.ttf"));
    }

    #[tokio::test]
    async fn test_render_blocking_multi_page() {
        let lines: Vec<AggregatedLine> = (0..60)
            .map(|i| AggregatedLine::new(format!("Item {i:02}"), "pcs", 1))
            .collect();
        let bytes = render_blocking(lines, FontSource::Embedded).await.unwrap();

        let doc = lopdf::Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 3);
    }
}
