//! Bottom-edge correction.
//!
//! The upstream layout tool under-detects trailing whitespace-bounded text,
//! so the last body-text box in a column frequently stops short of the true
//! printed column bottom. Left uncorrected, cross-page collection under-reads
//! content near page bottoms. This pass finds each band's bottommost body
//! text, checks that nothing else sits below it, and pulls all such shapes
//! down to a common baseline.

use crate::config::LayoutConfig;
use crate::geometry::Point;
use crate::page::{Label, Page};

/// Extend truncated column bottoms to a common baseline.
///
/// Per band: the body-text shape with the greatest bottom-y is a correction
/// candidate if no other shape on the page sits "below" it, i.e. has its
/// top-y within `[bottom - tol, bottom + 3*tol]` while overlapping it
/// horizontally. All candidates are extended to the maximum candidate
/// bottom-y; their polygon is rewritten to the two-corner form
/// `[(x1, y1), (x2, target)]`, preserving top edge and horizontal span.
///
/// Bands with no candidate are left untouched. Runs after column/row
/// assignment.
pub fn correct_bottom_edges(page: &mut Page, config: &LayoutConfig) {
    let tol = config.below_tolerance;
    let mut candidates: Vec<usize> = Vec::new();

    for band in 1..=config.band_count {
        // Bottommost body text of the band; a tie takes the last in
        // discovery order, only its geometry matters.
        let bottommost = page
            .shapes
            .iter()
            .enumerate()
            .filter(|(_, s)| s.label == Label::BodyText && s.column_number == Some(band))
            .max_by(|(_, a), (_, b)| {
                a.bbox()
                    .bottom()
                    .partial_cmp(&b.bbox().bottom())
                    .unwrap_or(std::cmp::Ordering::Equal)
            });

        let Some((idx, shape)) = bottommost else {
            continue;
        };

        let bbox = shape.bbox();
        let bottom = bbox.bottom();
        let has_below = page.shapes.iter().enumerate().any(|(other_idx, other)| {
            if other_idx == idx {
                return false;
            }
            let other_bbox = other.bbox();
            other_bbox.top() >= bottom - tol
                && other_bbox.top() <= bottom + 3.0 * tol
                && bbox.overlaps_horizontally(&other_bbox)
        });

        if has_below {
            log::debug!("Band {}: bottommost body text has content below, skipping", band);
        } else {
            candidates.push(idx);
        }
    }

    if candidates.is_empty() {
        return;
    }

    let target = candidates
        .iter()
        .map(|&i| page.shapes[i].bbox().bottom())
        .fold(f32::MIN, f32::max);

    log::debug!(
        "Extending {} column bottom(s) to y={:.1}",
        candidates.len(),
        target
    );

    for idx in candidates {
        let bbox = page.shapes[idx].bbox();
        page.shapes[idx].points = vec![
            Point::new(bbox.x1, bbox.y1),
            Point::new(bbox.x2, target),
        ];
    }
}
