//! PDF serialization of a shopping list layout.
//!
//! Text is always drawn with an embedded TrueType face so non-Latin ingredient
//! names (Cyrillic in particular) survive. Output is visually deterministic
//! only: the writer stamps a fresh document ID and creation date into the
//! metadata on every call.

use std::borrow::Cow;

use printpdf::{IndirectFontRef, Mm, PdfDocument, Pt};

use super::layout::Layout;
use super::{FontSource, RenderError};

/// Document title stored in the PDF metadata.
pub const DOCUMENT_TITLE: &str = "Shopping list";

/// DejaVu Sans, the default typeface (Bitstream Vera license, see `assets/fonts`).
pub const EMBEDDED_FONT: &[u8] = include_bytes!("../../../assets/fonts/DejaVuSans.ttf");

/// A4 width.
const PAGE_WIDTH: Mm = Mm(210.0);

/// A4 height.
const PAGE_HEIGHT: Mm = Mm(297.0);

const LAYER_NAME: &str = "Content";

/// Serialize a layout to PDF bytes.
///
/// # Errors
///
/// Returns `RenderError` if the font cannot be loaded, lacks a glyph for any
/// character of the layout, or the document cannot be serialized.
pub fn write(layout: &Layout, font: &FontSource) -> Result<Vec<u8>, RenderError> {
    let data = load_font(font)?;
    check_coverage(&data, layout)?;

    let (doc, first_page, first_layer) =
        PdfDocument::new(DOCUMENT_TITLE, PAGE_WIDTH, PAGE_HEIGHT, LAYER_NAME);
    let font: IndirectFontRef = doc
        .add_external_font(data.as_ref())
        .map_err(|e| RenderError::InvalidFont(e.to_string()))?;

    let mut targets = vec![(first_page, first_layer)];
    for _ in 1..layout.page_count() {
        targets.push(doc.add_page(PAGE_WIDTH, PAGE_HEIGHT, LAYER_NAME));
    }

    for (page, (page_index, layer_index)) in layout.pages.iter().zip(targets) {
        let layer = doc.get_page(page_index).get_layer(layer_index);

        for run in &page.runs {
            layer.use_text(
                run.text.as_str(),
                run.font_size,
                Mm::from(Pt(run.x)),
                Mm::from(Pt(run.y)),
                &font,
            );
        }
    }

    let bytes = doc
        .save_to_bytes()
        .map_err(|e| RenderError::Pdf(e.to_string()))?;

    tracing::debug!(
        pages = layout.page_count(),
        bytes = bytes.len(),
        "Shopping list rendered"
    );
    Ok(bytes)
}

/// Font bytes for this render.
///
/// File fonts are read here and released when the render returns; the
/// document keeps its own embedded copy.
fn load_font(source: &FontSource) -> Result<Cow<'static, [u8]>, RenderError> {
    match source {
        FontSource::Embedded => Ok(Cow::Borrowed(EMBEDDED_FONT)),
        FontSource::File(path) => std::fs::read(path)
            .map(Cow::Owned)
            .map_err(|source| RenderError::FontUnavailable {
                path: path.clone(),
                source,
            }),
    }
}

/// Fail instead of letting the writer drop characters the face cannot draw.
fn check_coverage(data: &[u8], layout: &Layout) -> Result<(), RenderError> {
    let face = ttf_parser::Face::parse(data, 0)
        .map_err(|e| RenderError::InvalidFont(e.to_string()))?;

    let missing = layout
        .pages
        .iter()
        .flat_map(|page| &page.runs)
        .flat_map(|run| run.text.chars())
        .find(|&ch| face.glyph_index(ch).is_none());

    missing.map_or(Ok(()), |ch| Err(RenderError::UnsupportedCharacter(ch)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::path::PathBuf;

    use foodgram_core::AggregatedLine;
    use lopdf::content::Content;

    use super::super::layout::{TITLE, layout};
    use super::*;

    /// Text operands of every `Tj` operator, grouped by page.
    fn page_texts(bytes: &[u8]) -> Vec<Vec<Vec<u8>>> {
        let doc = lopdf::Document::load_mem(bytes).unwrap();
        doc.get_pages()
            .values()
            .map(|&page_id| {
                let content = Content::decode(&doc.get_page_content(page_id).unwrap()).unwrap();
                content
                    .operations
                    .iter()
                    .filter(|op| op.operator == "Tj")
                    .filter_map(|op| op.operands.first())
                    .filter_map(|operand| operand.as_str().ok())
                    .map(<[u8]>::to_vec)
                    .collect()
            })
            .collect()
    }

    /// Glyph IDs the writer emits for `text` with the embedded face.
    fn glyphs(text: &str) -> Vec<u8> {
        let face = ttf_parser::Face::parse(EMBEDDED_FONT, 0).unwrap();
        text.chars()
            .flat_map(|ch| face.glyph_index(ch).unwrap().0.to_be_bytes())
            .collect()
    }

    fn items(n: usize) -> Vec<AggregatedLine> {
        (0..n)
            .map(|i| AggregatedLine::new(format!("Item {i:02}"), "pcs", 1))
            .collect()
    }

    #[test]
    fn test_write_emits_pdf_header_and_trailer() {
        let bytes = write(&layout(&[]), &FontSource::Embedded).unwrap();

        assert!(bytes.starts_with(b"%PDF-"));
        let tail = String::from_utf8_lossy(&bytes[bytes.len().saturating_sub(32)..]).into_owned();
        assert!(tail.contains("%%EOF"));
    }

    #[test]
    fn test_empty_list_is_one_title_only_page() {
        let pages = page_texts(&write(&layout(&[]), &FontSource::Embedded).unwrap());

        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0], vec![glyphs(TITLE)]);
    }

    #[test]
    fn test_document_page_count_matches_layout() {
        for (n, expected) in [(0, 1), (19, 1), (20, 2), (41, 3)] {
            let doc = layout(&items(n));
            let pages = page_texts(&write(&doc, &FontSource::Embedded).unwrap());

            assert_eq!(pages.len(), expected, "n = {n}");
            assert_eq!(pages.len(), doc.page_count(), "n = {n}");
        }
    }

    #[test]
    fn test_every_item_reaches_the_document() {
        let input = items(41);
        let pages = page_texts(&write(&layout(&input), &FontSource::Embedded).unwrap());

        assert_eq!(pages[0][0], glyphs(TITLE));
        assert_eq!(pages[0][1], glyphs("1.  Item 00 - 1 pcs"));
        assert_eq!(pages[1][0], glyphs("20.  Item 19 - 1 pcs"));
        assert_eq!(pages[2].last().unwrap(), &glyphs("41.  Item 40 - 1 pcs"));
        assert_eq!(pages.iter().map(Vec::len).sum::<usize>(), input.len() + 1);
        assert!(pages[1..].iter().flatten().all(|text| *text != glyphs(TITLE)));
    }

    #[test]
    fn test_cyrillic_names_are_drawn() {
        let flour = write(
            &layout(&[AggregatedLine::new("Мука", "г", 500)]),
            &FontSource::Embedded,
        )
        .unwrap();
        let salt = write(
            &layout(&[AggregatedLine::new("Соль", "г", 500)]),
            &FontSource::Embedded,
        )
        .unwrap();

        let flour_line = &page_texts(&flour)[0][1];
        let salt_line = &page_texts(&salt)[0][1];
        assert_eq!(flour_line, &glyphs("1.  Мука - 500 г"));
        assert_eq!(salt_line, &glyphs("1.  Соль - 500 г"));
        assert_ne!(flour_line, salt_line);
    }

    #[test]
    fn test_font_file_is_embedded() {
        let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/fonts/DejaVuSans.ttf");
        let bytes = write(
            &layout(&[AggregatedLine::new("Молоко", "мл", 300)]),
            &FontSource::File(path),
        )
        .unwrap();

        let pages = page_texts(&bytes);
        assert_eq!(pages[0][1], glyphs("1.  Молоко - 300 мл"));
    }

    #[test]
    fn test_character_outside_font_is_an_error() {
        let err = write(
            &layout(&[AggregatedLine::new("漢方", "g", 5)]),
            &FontSource::Embedded,
        )
        .unwrap_err();

        assert!(matches!(err, RenderError::UnsupportedCharacter('漢')));
    }

    #[test]
    fn test_garbage_font_file_is_invalid() {
        let path = std::env::temp_dir().join(format!(
            "foodgram-not-a-font-{}.ttf",
            std::process::id()
        ));
        std::fs::write(&path, b"definitely not a font").unwrap();

        let err = write(&layout(&[]), &FontSource::File(path.clone())).unwrap_err();
        std::fs::remove_file(&path).ok();

        assert!(matches!(err, RenderError::InvalidFont(_)));
    }
}
