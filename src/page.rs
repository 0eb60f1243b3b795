//! Domain types for one scanned newspaper page.
//!
//! A [`Page`] is a flat list of detected layout elements ([`Shape`]s). Shapes
//! come out of the upstream layout tool with a label and a polygon; the
//! layout pipeline (see [`crate::layout`]) enriches them in place with a band
//! (`column_number`) and a top-to-bottom position within the band
//! (`row_number`).

use crate::geometry::{BBox, Point};

/// Classification of a layout element.
///
/// The variants mirror the label vocabulary of the annotation tool; labels it
/// does not know are preserved verbatim in [`Label::Other`] so records
/// round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Label {
    /// Running page header (page number, date line).
    PageHeader,
    /// Full-width title spanning all bands; marks a new issue or section.
    WideTitle,
    /// Subtitle set inside a single band, introducing a recurring column.
    ColumnSubtitle,
    /// Body text block within one band.
    BodyText,
    /// Advertisement; may sit in one band or span the page.
    Advertisement,
    /// Any label this crate does not classify.
    Other(String),
}

impl Label {
    /// Parse a wire-format label tag.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "page-header" => Label::PageHeader,
            "wide-title" => Label::WideTitle,
            "column-subtitle" => Label::ColumnSubtitle,
            "body-text" => Label::BodyText,
            "advertisement" => Label::Advertisement,
            other => Label::Other(other.to_string()),
        }
    }

    /// The wire-format tag for this label.
    pub fn tag(&self) -> &str {
        match self {
            Label::PageHeader => "page-header",
            Label::WideTitle => "wide-title",
            Label::ColumnSubtitle => "column-subtitle",
            Label::BodyText => "body-text",
            Label::Advertisement => "advertisement",
            Label::Other(tag) => tag,
        }
    }

    /// Whether shapes with this label vote for column boundaries.
    ///
    /// Only elements that are reliably one band wide carry a useful
    /// horizontal-center signal.
    pub fn is_single_column_candidate(&self) -> bool {
        matches!(self, Label::BodyText | Label::ColumnSubtitle)
    }
}

/// One detected layout element on a page.
#[derive(Debug, Clone)]
pub struct Shape {
    /// Element classification.
    pub label: Label,
    /// Polygon drawn by the layout tool; only its bounding box is used.
    pub points: Vec<Point>,
    /// Extracted text, if any. Absent or whitespace-only text is `None`.
    pub text: Option<String>,
    /// Assigned band: 0 spans all bands, 1..K is a reading column.
    /// `None` until the assigner has run.
    pub column_number: Option<u32>,
    /// 1-based top-to-bottom position within the band. Full-width shapes
    /// (band 0) carry no row.
    pub row_number: Option<u32>,
}

impl Shape {
    /// Create a shape from its label and polygon, with no text.
    pub fn new(label: Label, points: Vec<Point>) -> Self {
        Self {
            label,
            points,
            text: None,
            column_number: None,
            row_number: None,
        }
    }

    /// Bounding box of the polygon; degenerate `(0,0,0,0)` for malformed
    /// geometry (fewer than 2 points).
    pub fn bbox(&self) -> BBox {
        BBox::of_points(&self.points)
    }

    /// Horizontal center, used for band assignment.
    pub fn center_x(&self) -> f32 {
        self.bbox().center_x()
    }

    /// Extracted text, if the shape carries any.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Both band and row assigned, i.e. the shape takes part in banded
    /// reading order.
    pub fn is_banded(&self) -> bool {
        matches!(self.column_number, Some(c) if c > 0) && self.row_number.is_some()
    }
}

/// One scanned sheet: its layout elements plus the reference width used for
/// the default-thirds fallback.
#[derive(Debug, Clone)]
pub struct Page {
    /// Layout elements in discovery order.
    pub shapes: Vec<Shape>,
    /// Page image width in layout units.
    pub image_width: f32,
    /// This page's position in the corpus total order.
    pub sequence_index: usize,
}

impl Page {
    /// Create a page from shapes and its image width. The sequence index is
    /// set when the page joins a corpus.
    pub fn new(shapes: Vec<Shape>, image_width: f32) -> Self {
        Self {
            shapes,
            image_width,
            sequence_index: 0,
        }
    }
}
