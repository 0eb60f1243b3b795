//! Serde interchange records for per-page layout files.
//!
//! One JSON record per page, as produced by the annotation/OCR toolchain.
//! The records are tolerant by design: text can live in several places
//! (direct `text`, a nested OCR result, or legacy `description`/`content`/
//! `value` fields), `imageWidth` may be absent, and fields this crate does
//! not understand are preserved so an enriched record round-trips.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::DEFAULT_IMAGE_WIDTH;
use crate::error::{Error, Result};
use crate::geometry::Point;
use crate::page::{Label, Page, Shape};

/// Nested OCR result attached to a shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OcrResult {
    /// Recognized text for the shape's region.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ocr_text: Option<String>,

    /// OCR engine fields we carry along unchanged (confidence, language, ...).
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// One layout element as stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShapeRecord {
    /// Label tag, e.g. `"body-text"`.
    pub label: String,

    /// Polygon points as `[x, y]` pairs.
    #[serde(default)]
    pub points: Vec<[f32; 2]>,

    /// Direct text field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Nested OCR result; its `ocr_text` wins over every other text field.
    /// Stored as `tesseract_output` by the OCR toolchain.
    #[serde(rename = "tesseract_output", default, skip_serializing_if = "Option::is_none")]
    pub ocr_output: Option<OcrResult>,

    /// Legacy text fallback.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Legacy text fallback; may hold a non-string scalar.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Value>,

    /// Legacy text fallback; may hold a non-string scalar.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,

    /// Band assignment. Any pre-existing value is overwritten by the
    /// assigner; it is kept here so enriched records serialize in place.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_number: Option<u32>,

    /// Row assignment, 1-based within the band.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_number: Option<u32>,

    /// Unrecognized fields, preserved round-trip.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// One page record as stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageRecord {
    /// Layout elements in discovery order. A record without `shapes` is
    /// malformed and fails to parse.
    pub shapes: Vec<ShapeRecord>,

    /// Page image width in layout units.
    #[serde(rename = "imageWidth", default, skip_serializing_if = "Option::is_none")]
    pub image_width: Option<f32>,

    /// Unrecognized fields, preserved round-trip.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Coerce a legacy scalar field to text the way the original toolchain did:
/// strings pass through, other scalars are stringified, null is absent.
fn coerce_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => non_empty(s),
        other => non_empty(&other.to_string()),
    }
}

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

impl ShapeRecord {
    /// Extract the shape's text, first non-empty source wins:
    /// OCR output, then `text`, then `description`/`content`/`value`.
    pub fn extract_text(&self) -> Option<String> {
        if let Some(ocr) = &self.ocr_output {
            if let Some(text) = ocr.ocr_text.as_deref().and_then(non_empty) {
                return Some(text);
            }
        }
        if let Some(text) = self.text.as_deref().and_then(non_empty) {
            return Some(text);
        }
        if let Some(text) = self.description.as_deref().and_then(non_empty) {
            return Some(text);
        }
        for value in [&self.content, &self.value].into_iter().flatten() {
            if let Some(text) = coerce_text(value) {
                return Some(text);
            }
        }
        None
    }

    /// Convert to the in-memory [`Shape`]. Pre-existing `column_number` /
    /// `row_number` are deliberately dropped; the assigner owns them.
    pub fn to_shape(&self) -> Shape {
        Shape {
            label: Label::from_tag(&self.label),
            points: self.points.iter().map(|p| Point::new(p[0], p[1])).collect(),
            text: self.extract_text(),
            column_number: None,
            row_number: None,
        }
    }
}

impl PageRecord {
    /// Parse a page record from raw JSON text.
    ///
    /// `id` only labels the error; callers that tolerate malformed pages
    /// (the corpus loader) log it and keep going.
    pub fn parse(id: &str, json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::MalformedRecord {
            id: id.to_string(),
            reason: e.to_string(),
        })
    }

    /// Parse a page record from an already-deserialized JSON value.
    pub fn from_value(id: &str, value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| Error::MalformedRecord {
            id: id.to_string(),
            reason: e.to_string(),
        })
    }

    /// Build the in-memory [`Page`] this record describes.
    pub fn to_page(&self) -> Page {
        let shapes = self.shapes.iter().map(ShapeRecord::to_shape).collect();
        Page::new(shapes, self.image_width.unwrap_or(DEFAULT_IMAGE_WIDTH))
    }

    /// Write an enriched page's geometry and assignments back into this
    /// record, so the enriched file keeps every field it arrived with.
    ///
    /// The page must have been built from this record: shapes correspond
    /// by index.
    pub fn absorb(&mut self, page: &Page) {
        debug_assert_eq!(self.shapes.len(), page.shapes.len());
        for (record, shape) in self.shapes.iter_mut().zip(&page.shapes) {
            record.points = shape.points.iter().map(|p| [p.x, p.y]).collect();
            record.column_number = shape.column_number;
            record.row_number = shape.row_number;
        }
    }
}
