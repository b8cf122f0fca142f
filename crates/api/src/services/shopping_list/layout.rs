//! Page layout for the shopping list document.
//!
//! All coordinates are PDF points measured from the bottom-left corner of an
//! A4 page. The layout is pure: the same input always yields the same runs at
//! the same positions, independent of how the document is later serialized.

use foodgram_core::AggregatedLine;

/// Heading drawn at the top of the first page.
pub const TITLE: &str = "Shopping list:";

/// Horizontal position of every run.
pub const LEFT_X: f32 = 100.0;

/// Baseline of the heading.
pub const TITLE_Y: f32 = 690.0;

/// Heading font size.
pub const TITLE_FONT_SIZE: f32 = 32.0;

/// Baseline of the first item on the first page.
pub const FIRST_LINE_Y: f32 = 650.0;

/// Baseline of the first item on every continuation page.
pub const CONTINUATION_Y: f32 = 700.0;

/// Items whose baseline would fall below this start a new page.
pub const BOTTOM_Y: f32 = 100.0;

/// Vertical distance between consecutive items.
pub const LINE_SPACING: f32 = 30.0;

/// Item font size.
pub const LINE_FONT_SIZE: f32 = 20.0;

/// A single piece of text at a fixed position.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub font_size: f32,
}

/// Text runs belonging to one page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub runs: Vec<TextRun>,
}

/// A laid-out document. Always holds at least one page.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub pages: Vec<Page>,
}

impl Layout {
    /// Number of pages.
    #[must_use]
    pub const fn page_count(&self) -> usize {
        self.pages.len()
    }
}

/// Format one numbered item, e.g. `"1.  Flour - 500 g"`.
#[must_use]
pub fn format_line(index: usize, line: &AggregatedLine) -> String {
    format!(
        "{index}.  {} - {} {}",
        line.ingredient_name, line.total_amount, line.measurement_unit
    )
}

/// Lay out aggregated lines across as many A4 pages as needed.
///
/// The heading sits on the first page. Items start below it and move down by
/// [`LINE_SPACING`]; once the cursor has dropped below [`BOTTOM_Y`] the next
/// item opens a new page at [`CONTINUATION_Y`]. The last page is kept even
/// when it carries nothing but the heading.
#[must_use]
pub fn layout(lines: &[AggregatedLine]) -> Layout {
    let mut pages = Vec::new();
    let mut current = Page {
        runs: vec![TextRun {
            text: TITLE.to_string(),
            x: LEFT_X,
            y: TITLE_Y,
            font_size: TITLE_FONT_SIZE,
        }],
    };
    let mut y = FIRST_LINE_Y;

    for (index, line) in lines.iter().enumerate() {
        if y < BOTTOM_Y {
            pages.push(std::mem::take(&mut current));
            y = CONTINUATION_Y;
        }

        current.runs.push(TextRun {
            text: format_line(index + 1, line),
            x: LEFT_X,
            y,
            font_size: LINE_FONT_SIZE,
        });
        y -= LINE_SPACING;
    }

    pages.push(current);
    Layout { pages }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::float_cmp)]
mod tests {
    use super::*;

    fn items(n: usize) -> Vec<AggregatedLine> {
        (0..n)
            .map(|i| AggregatedLine::new(format!("Ingredient {i:03}"), "g", 10))
            .collect()
    }

    /// 19 items fit on the first page, 21 on every later one.
    fn expected_pages(n: usize) -> usize {
        if n <= 19 { 1 } else { 1 + (n - 19).div_ceil(21) }
    }

    #[test]
    fn test_empty_list_is_single_title_page() {
        let doc = layout(&[]);

        assert_eq!(doc.page_count(), 1);
        assert_eq!(
            doc.pages[0].runs,
            vec![TextRun {
                text: "Shopping list:".to_string(),
                x: 100.0,
                y: 690.0,
                font_size: 32.0,
            }]
        );
    }

    #[test]
    fn test_line_format() {
        let line = AggregatedLine::new("Flour", "g", 500);
        assert_eq!(format_line(1, &line), "1.  Flour - 500 g");
    }

    #[test]
    fn test_first_page_positions() {
        let doc = layout(&items(3));
        let ys: Vec<f32> = doc.pages[0].runs.iter().skip(1).map(|r| r.y).collect();

        assert_eq!(ys, [650.0, 620.0, 590.0]);
        assert!(doc.pages[0].runs.iter().skip(1).all(|r| r.x == 100.0));
        assert!(
            doc.pages[0]
                .runs
                .iter()
                .skip(1)
                .all(|r| r.font_size == 20.0)
        );
    }

    #[test]
    fn test_items_are_numbered_from_one() {
        let doc = layout(&items(2));
        assert!(doc.pages[0].runs[1].text.starts_with("1.  "));
        assert!(doc.pages[0].runs[2].text.starts_with("2.  "));
    }

    #[test]
    fn test_nineteen_items_fit_first_page() {
        let doc = layout(&items(19));

        assert_eq!(doc.page_count(), 1);
        assert_eq!(doc.pages[0].runs.last().unwrap().y, 110.0);
    }

    #[test]
    fn test_twentieth_item_opens_second_page() {
        let doc = layout(&items(20));

        assert_eq!(doc.page_count(), 2);
        let second = &doc.pages[1].runs;
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].y, 700.0);
        assert!(second[0].text.starts_with("20.  "));
    }

    #[test]
    fn test_continuation_page_holds_twenty_one_items() {
        let doc = layout(&items(40));

        assert_eq!(doc.page_count(), 2);
        let second = &doc.pages[1].runs;
        assert_eq!(second.len(), 21);
        assert_eq!(second.last().unwrap().y, 100.0);

        assert_eq!(doc.page_count(), expected_pages(40));
        assert_eq!(layout(&items(41)).page_count(), 3);
    }

    #[test]
    fn test_title_only_on_first_page() {
        let doc = layout(&items(45));
        let titles = doc
            .pages
            .iter()
            .flat_map(|p| &p.runs)
            .filter(|r| r.text == TITLE)
            .count();
        assert_eq!(titles, 1);
    }

    #[test]
    fn test_page_count_formula() {
        for n in [0, 1, 18, 19, 20, 39, 40, 41, 61, 62, 100, 250] {
            assert_eq!(layout(&items(n)).page_count(), expected_pages(n), "n = {n}");
        }
    }

    #[test]
    fn test_every_item_is_laid_out_once() {
        let input = items(75);
        let doc = layout(&input);
        let drawn = doc.pages.iter().map(|p| p.runs.len()).sum::<usize>() - 1;
        assert_eq!(drawn, input.len());
    }

    #[test]
    fn test_no_run_below_bottom_margin() {
        let doc = layout(&items(120));
        assert!(
            doc
                .pages
                .iter()
                .flat_map(|p| &p.runs)
                .all(|r| r.y >= BOTTOM_Y)
        );
    }

    #[test]
    fn test_layout_is_deterministic() {
        let input = items(33);
        assert_eq!(layout(&input), layout(&input));
    }
}
