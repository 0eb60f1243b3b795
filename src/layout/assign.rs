//! Column and row assignment.
//!
//! Classifies every layout element into a band (0 = full width, 1..3 = a
//! reading column) and numbers each band's elements top to bottom. Runs in
//! place on a page the caller exclusively owns.

use crate::config::LayoutConfig;
use crate::page::{Label, Page};

/// Band index for a horizontal center, given the two boundaries.
///
/// # Examples
///
/// ```
/// use broadsheet::layout::assign::band_for_center;
///
/// assert_eq!(band_for_center(50.0, 300.0, 700.0), 1);
/// assert_eq!(band_for_center(500.0, 300.0, 700.0), 2);
/// assert_eq!(band_for_center(950.0, 300.0, 700.0), 3);
/// ```
pub fn band_for_center(center_x: f32, boundary1: f32, boundary2: f32) -> u32 {
    if center_x < boundary1 {
        1
    } else if center_x < boundary2 {
        2
    } else {
        3
    }
}

/// Assign `column_number` and `row_number` to every shape on the page.
///
/// Banding rules, in priority order:
/// - page headers and wide titles span all bands (band 0, no row);
/// - advertisements wider than `wide_ad_ratio` x the average band width are
///   treated as full width, narrower ones are banded by center;
/// - body text, column subtitles and any unclassified label are banded by
///   center.
///
/// Rows: within each band, shapes are numbered `1..` by ascending top-y;
/// ties keep discovery order (stable sort) so the result is reproducible.
pub fn assign_columns_and_rows(
    page: &mut Page,
    boundaries: (f32, f32),
    config: &LayoutConfig,
) {
    let (boundary1, boundary2) = boundaries;
    let avg_band_width = config.band_width(page.image_width);

    for shape in &mut page.shapes {
        let column = match &shape.label {
            Label::PageHeader | Label::WideTitle => 0,
            Label::Advertisement => {
                if shape.bbox().width() > config.wide_ad_ratio * avg_band_width {
                    0
                } else {
                    band_for_center(shape.center_x(), boundary1, boundary2)
                }
            },
            _ => band_for_center(shape.center_x(), boundary1, boundary2),
        };
        shape.column_number = Some(column);
        shape.row_number = None;
    }

    for band in 1..=config.band_count {
        let mut members: Vec<usize> = page
            .shapes
            .iter()
            .enumerate()
            .filter(|(_, s)| s.column_number == Some(band))
            .map(|(i, _)| i)
            .collect();

        // Stable: equal top-y values keep discovery order.
        members.sort_by(|&a, &b| {
            page.shapes[a]
                .bbox()
                .top()
                .partial_cmp(&page.shapes[b].bbox().top())
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        for (row, &idx) in members.iter().enumerate() {
            page.shapes[idx].row_number = Some(row as u32 + 1);
        }
    }
}
