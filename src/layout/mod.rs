//! Page-local layout analysis.
//!
//! The Phase 1 pipeline enriches one page at a time, in place:
//! - column boundary detection from the center distribution of
//!   single-column elements,
//! - band and row assignment for every element,
//! - bottom-edge correction for truncated column ends.
//!
//! Pages are independent of one another; each pass exclusively borrows its
//! page. The reading-order composer consumes the enriched result.

pub mod assign;
pub mod bottom_edge;
pub mod boundary;
pub mod reading_order;

// Re-export main entry points
pub use assign::{assign_columns_and_rows, band_for_center};
pub use bottom_edge::correct_bottom_edges;
pub use boundary::detect_column_boundaries;
pub use reading_order::{compose_page, joined, Fragment};

use crate::config::LayoutConfig;
use crate::page::Page;

/// Run the full page-local pipeline on one page.
///
/// After this the page's shapes carry `column_number`/`row_number` and
/// corrected geometry, and the page is ready for the composer and the span
/// collector.
pub fn enrich_page(page: &mut Page, config: &LayoutConfig) {
    let boundaries = detect_column_boundaries(&page.shapes, page.image_width);
    assign_columns_and_rows(page, boundaries, config);
    correct_bottom_edges(page, config);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::page::{Label, Shape};

    #[test]
    fn test_enrich_page_end_to_end() {
        // Three columns of body text on a 3000-wide page, with the middle
        // column's last block truncated short of the others.
        let block = |x: f32, y1: f32, y2: f32| {
            Shape::new(
                Label::BodyText,
                vec![Point::new(x, y1), Point::new(x + 800.0, y2)],
            )
        };
        let mut page = Page::new(
            vec![
                block(100.0, 100.0, 2000.0),
                block(1100.0, 100.0, 1200.0),
                block(2100.0, 100.0, 2000.0),
                Shape::new(
                    Label::WideTitle,
                    vec![Point::new(0.0, 0.0), Point::new(3000.0, 80.0)],
                ),
            ],
            3000.0,
        );

        enrich_page(&mut page, &LayoutConfig::default());

        assert_eq!(page.shapes[0].column_number, Some(1));
        assert_eq!(page.shapes[1].column_number, Some(2));
        assert_eq!(page.shapes[2].column_number, Some(3));
        assert_eq!(page.shapes[3].column_number, Some(0));
        // The truncated middle column caught up with the 2000.0 baseline.
        assert_eq!(page.shapes[1].bbox().bottom(), 2000.0);
    }
}
