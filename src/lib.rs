//! # Broadsheet
//!
//! Reading-order reconstruction and cross-page column extraction for
//! digitized newspaper OCR layouts.
//!
//! Scanned broadsheet pages arrive as per-page JSON records: labeled layout
//! polygons with OCR text attached. This crate rebuilds the logical reading
//! order of each page (a fixed three-band column model plus full-width
//! elements) and follows a recurring named column across page boundaries,
//! extracting its complete content as one span.
//!
//! ## Pipeline
//!
//! - **Phase 1, page-local** ([`layout`]): column boundary detection from
//!   the center distribution of single-column elements, band/row assignment
//!   for every element, bottom-edge correction for truncated columns.
//!   Pages are independent and may be processed in any order.
//! - **Phase 2, corpus-order-dependent**: the reading-order composer
//!   ([`layout::reading_order`]) linearizes one enriched page; the span
//!   collector ([`collector`]) scans forward across the corpus from a marker
//!   subtitle to its stop boundary and collects everything in between.
//!
//! Nothing in the corpus-level operations is fatal: malformed records,
//! degenerate polygons and missing markers are logged, skipped and counted.
//!
//! ## Quick Start
//!
//! ```
//! use broadsheet::{Corpus, LayoutConfig, MarkerQuery, SpanCollector};
//!
//! # fn main() -> broadsheet::Result<()> {
//! let records = vec![
//!     ("page1".to_string(), r#"{"shapes": [
//!         {"label": "column-subtitle", "points": [[1100, 200], [1900, 280]],
//!          "text": "TŐKE ÉS MUNKA"},
//!         {"label": "body-text", "points": [[1100, 300], [1900, 900]],
//!          "text": "A sztrájk tovább tart."}
//!     ], "imageWidth": 3000}"#),
//! ];
//!
//! let mut corpus = Corpus::from_json_records(records);
//! corpus.enrich(&LayoutConfig::default());
//!
//! let query = MarkerQuery::new(["tőke", "munka"])?;
//! let spans = SpanCollector::new(&corpus, query).collect_all();
//! assert_eq!(spans.len(), 1);
//! assert!(spans[0].content.contains("sztrájk"));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

// Error handling
pub mod error;

// Configuration
pub mod config;

// Geometry and domain model
pub mod corpus;
pub mod geometry;
pub mod page;
pub mod record;

// Page-local layout analysis (Phase 1) and reading-order composition
pub mod layout;

// Marker matching and cross-page span collection (Phase 2)
pub mod collector;
pub mod search;

// Re-export main types
pub use collector::{Span, SpanCollector, Termination};
pub use config::LayoutConfig;
pub use corpus::{natural_cmp, Corpus, CorpusEntry, Position};
pub use error::{Error, Result};
pub use layout::{compose_page, enrich_page, Fragment};
pub use page::{Label, Page, Shape};
pub use record::PageRecord;
pub use search::{normalize_for_match, MarkerQuery};
