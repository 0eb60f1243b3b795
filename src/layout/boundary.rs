//! Column boundary detection.
//!
//! Infers the two vertical separators that split a page into three reading
//! bands. Column whitespace gutters are the most reliable visual signal of
//! the layout even under noisy OCR boxes, and the two largest gaps in the
//! sorted 1-D projection of single-column element centers are a stable proxy
//! for the gutter positions.

use crate::page::Shape;

/// Detect the two column boundaries of a page.
///
/// Candidates are the shapes whose label is reliably one band wide
/// (body text and column subtitles). With fewer than 3 candidates there is
/// no usable distribution; the page falls back to equal thirds.
///
/// The returned pair is sorted ascending.
///
/// # Examples
///
/// ```
/// use broadsheet::layout::boundary::detect_column_boundaries;
///
/// // No candidates: equal thirds of a 900-wide page.
/// let (b1, b2) = detect_column_boundaries(&[], 900.0);
/// assert_eq!((b1, b2), (300.0, 600.0));
/// ```
pub fn detect_column_boundaries(shapes: &[Shape], image_width: f32) -> (f32, f32) {
    let mut centers: Vec<f32> = shapes
        .iter()
        .filter(|s| s.label.is_single_column_candidate())
        .map(|s| s.center_x())
        .collect();

    if centers.len() < 3 {
        return (image_width / 3.0, 2.0 * image_width / 3.0);
    }

    centers.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    // Gap between each consecutive pair of centers, with its midpoint.
    let mut gaps: Vec<(f32, f32)> = centers
        .windows(2)
        .map(|pair| (pair[1] - pair[0], (pair[1] + pair[0]) / 2.0))
        .collect();

    // Largest gaps first; exact size ties prefer the leftmost gap so the
    // result never depends on incidental sort behavior.
    gaps.sort_by(|a, b| {
        b.0.partial_cmp(&a.0)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
    });

    let mut boundary1 = gaps[0].1;
    let mut boundary2 = gaps[1].1;
    if boundary1 > boundary2 {
        std::mem::swap(&mut boundary1, &mut boundary2);
    }

    log::debug!(
        "Column boundaries from {} candidates: x={:.1}, x={:.1}",
        centers.len(),
        boundary1,
        boundary2
    );

    (boundary1, boundary2)
}
