//! Reading-order composition.
//!
//! Linearizes one enriched page into an ordered stream of tagged text
//! fragments: full-width titles first (top to bottom), then band-major,
//! row-minor content with a break marker whenever the band changes. A
//! sequence producer, not a search; the only state is the last band seen.

use std::fmt;

use crate::page::{Label, Page};

/// One tagged fragment of a page's reading-order stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    /// Full-width title text.
    Title(String),
    /// In-band subtitle text.
    Subtitle(String),
    /// Plain body text.
    Body(String),
    /// Marker emitted when the stream enters a new band.
    ColumnBreak(u32),
}

impl Fragment {
    /// The fragment's text, if it carries any.
    pub fn text(&self) -> Option<&str> {
        match self {
            Fragment::Title(t) | Fragment::Subtitle(t) | Fragment::Body(t) => Some(t),
            Fragment::ColumnBreak(_) => None,
        }
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fragment::Title(t) => write!(f, "[TITLE] {}", t),
            Fragment::Subtitle(t) => write!(f, "[SUBTITLE] {}", t),
            Fragment::Body(t) => write!(f, "{}", t),
            Fragment::ColumnBreak(n) => write!(f, "[COLUMN {}]", n),
        }
    }
}

/// Join rendered fragments with a caller-chosen separator.
pub fn joined(fragments: &[Fragment], separator: &str) -> String {
    fragments
        .iter()
        .map(Fragment::to_string)
        .collect::<Vec<_>>()
        .join(separator)
}

/// Compose one page's reading-order stream.
///
/// Expects an enriched page (column/row assigned). Wide titles come first,
/// sorted by ascending top-y; then body text and column subtitles in
/// `(column, row)` order, with a [`Fragment::ColumnBreak`] ahead of each
/// band's first emitted fragment. Shapes without extractable text produce
/// nothing.
pub fn compose_page(page: &Page) -> Vec<Fragment> {
    let mut fragments = Vec::new();

    let mut titles: Vec<&crate::page::Shape> = page
        .shapes
        .iter()
        .filter(|s| s.label == Label::WideTitle)
        .collect();
    titles.sort_by(|a, b| {
        a.bbox()
            .top()
            .partial_cmp(&b.bbox().top())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    for title in titles {
        if let Some(text) = title.text() {
            fragments.push(Fragment::Title(text.to_string()));
        }
    }

    let mut banded: Vec<&crate::page::Shape> = page
        .shapes
        .iter()
        .filter(|s| {
            matches!(s.label, Label::BodyText | Label::ColumnSubtitle) && s.is_banded()
        })
        .collect();
    banded.sort_by_key(|s| (s.column_number, s.row_number));

    let mut current_column: Option<u32> = None;
    for shape in banded {
        let Some(text) = shape.text() else {
            continue;
        };
        let column = shape.column_number.unwrap_or(0);
        if current_column != Some(column) {
            fragments.push(Fragment::ColumnBreak(column));
            current_column = Some(column);
        }
        match shape.label {
            Label::ColumnSubtitle => fragments.push(Fragment::Subtitle(text.to_string())),
            _ => fragments.push(Fragment::Body(text.to_string())),
        }
    }

    fragments
}
