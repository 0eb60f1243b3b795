//! Cross-page span collection.
//!
//! Given a marker subtitle found on some page, locate where the tracked
//! column's content ends — the first following wide title (a new issue or
//! section) or a different, non-matching subtitle — then collect exactly the
//! content between marker (exclusive) and stop (exclusive).
//!
//! The two passes (stop search, then collection) scan the same canonical
//! order: within a page, shapes by `(column, row)` with wide titles taking
//! synthetic band-0 positions ahead of all banded content; across pages, by
//! ascending sequence index. Splitting the passes keeps the stop boundary
//! explicit and independently testable. The collector never mutates the
//! corpus, so identical inputs always produce identical spans.

use serde::Serialize;

use crate::corpus::{Corpus, Position};
use crate::layout::reading_order::{joined, Fragment};
use crate::page::{Label, Page, Shape};
use crate::search::{find_marker, page_header_text, MarkerQuery};

/// Header used when a marker page carries no wide title.
const UNKNOWN_ISSUE: &str = "Unknown Issue";

/// How a collection run ended. Both outcomes are successes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Termination {
    /// An explicit stop element was found (and excluded from the content).
    Stopped,
    /// The scan ran to the end of the corpus (or the page cap) without
    /// finding a stop element.
    Exhausted,
}

/// The collected content and metadata of one marker-to-stop traversal.
/// Immutable after construction.
#[derive(Debug, Clone, Serialize)]
pub struct Span {
    /// Issue header: the marker page's first wide-title text.
    pub header_text: String,
    /// Collected content, fragments joined with blank lines.
    pub content: String,
    /// Identifier of the page the marker was found on.
    pub source_page_id: String,
    /// The marker subtitle's text.
    pub marker_text: String,
    /// Where collection started (the marker's position).
    pub start: Position,
    /// The recorded stop position, if the run was [`Termination::Stopped`].
    pub stop: Option<Position>,
    /// Content length in characters.
    pub content_length: usize,
    /// How the run ended.
    pub termination: Termination,
}

/// Collects cross-page spans from an enriched corpus.
///
/// Holds only borrowed, read-only state; independent traversals can run
/// side by side.
#[derive(Debug)]
pub struct SpanCollector<'a> {
    corpus: &'a Corpus,
    query: MarkerQuery,
    max_pages: Option<usize>,
}

impl<'a> SpanCollector<'a> {
    /// Create a collector over an enriched corpus.
    pub fn new(corpus: &'a Corpus, query: MarkerQuery) -> Self {
        Self {
            corpus,
            query,
            max_pages: None,
        }
    }

    /// Cap how many pages (starting at the marker page) a forward scan may
    /// visit. The corpus may be unbounded; interactive callers set this.
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = Some(max_pages);
        self
    }

    /// Find the first marker on the given page and collect its span.
    ///
    /// `None` when the page is unloaded or carries no marker — a legitimate
    /// negative result.
    pub fn collect_at(&self, page_index: usize) -> Option<Span> {
        let page = self.corpus.page(page_index)?;
        let marker = find_marker(page, &self.query)?;
        self.collect_from(page_index, marker)
    }

    /// Collect the span that starts at an already-found marker.
    ///
    /// The marker must be banded (the page enriched); an unassigned marker
    /// is logged and yields `None`.
    pub fn collect_from(&self, page_index: usize, marker: &Shape) -> Option<Span> {
        let (Some(column), Some(row)) = (marker.column_number, marker.row_number) else {
            log::warn!(
                "Marker on page {} has no column/row assignment; run enrichment first",
                page_index
            );
            return None;
        };
        let start = Position::new(page_index, column, row);

        let stop = self.find_stop(start);
        let fragments = self.collect_content(start, stop);

        let page = self.corpus.page(page_index)?;
        let header_text = page_header_text(page).unwrap_or(UNKNOWN_ISSUE).to_string();
        let content = joined(&fragments, "\n\n");

        Some(Span {
            header_text,
            content_length: content.chars().count(),
            content,
            source_page_id: self
                .corpus
                .entry(page_index)
                .map(|e| e.id.clone())
                .unwrap_or_default(),
            marker_text: marker.text().unwrap_or_default().to_string(),
            start,
            stop,
            termination: if stop.is_some() {
                Termination::Stopped
            } else {
                Termination::Exhausted
            },
        })
    }

    /// Sweep the whole corpus: one span per page that carries a marker.
    ///
    /// Pages that fail to load or carry no marker are skipped; the sweep
    /// always completes.
    pub fn collect_all(&self) -> Vec<Span> {
        (0..self.corpus.len())
            .filter_map(|i| self.collect_at(i))
            .collect()
    }

    /// Exclusive end of a forward scan starting on `start_page`.
    fn scan_end(&self, start_page: usize) -> usize {
        match self.max_pages {
            Some(max) => self.corpus.len().min(start_page.saturating_add(max)),
            None => self.corpus.len(),
        }
    }

    /// Stop-search pass: the position of the first wide title or
    /// non-matching subtitle strictly after `start`, if any.
    fn find_stop(&self, start: Position) -> Option<Position> {
        for page_index in start.page..self.scan_end(start.page) {
            let Some(page) = self.corpus.page(page_index) else {
                // Unloadable pages are skipped, not fatal.
                continue;
            };
            for (column, row, shape) in scan_order(page) {
                let position = Position::new(page_index, column, row);
                if position <= start {
                    continue;
                }
                match shape.label {
                    Label::WideTitle => {
                        log::debug!("Stop element: wide title at {:?}", position);
                        return Some(position);
                    },
                    Label::ColumnSubtitle => {
                        // A subtitle that still matches the marker is a
                        // continuation heading, not a boundary. Textless
                        // subtitles are OCR dropouts and stop nothing.
                        if shape.text().is_some_and(|t| !self.query.matches(t)) {
                            log::debug!("Stop element: new subtitle at {:?}", position);
                            return Some(position);
                        }
                    },
                    _ => {},
                }
            }
        }
        None
    }

    /// Collection pass: tagged fragments strictly between `start` and
    /// `stop` (or to the end of the scan range when there is no stop).
    fn collect_content(&self, start: Position, stop: Option<Position>) -> Vec<Fragment> {
        let mut fragments = Vec::new();
        for page_index in start.page..self.scan_end(start.page) {
            if stop.is_some_and(|s| page_index > s.page) {
                break;
            }
            let Some(page) = self.corpus.page(page_index) else {
                continue;
            };
            for (column, row, shape) in scan_order(page) {
                let position = Position::new(page_index, column, row);
                if position <= start {
                    continue;
                }
                // Everything ordered at or after the stop key is excluded;
                // this also covers duplicate-position collisions.
                if stop.is_some_and(|s| position >= s) {
                    break;
                }
                let Some(text) = shape.text() else {
                    continue;
                };
                match shape.label {
                    Label::ColumnSubtitle => fragments.push(Fragment::Subtitle(text.to_string())),
                    Label::BodyText => fragments.push(Fragment::Body(text.to_string())),
                    _ => {},
                }
            }
        }
        fragments
    }
}

/// One page's shapes in canonical scan order.
///
/// Wide titles take synthetic positions `(0, 1..)` by ascending top-y, so
/// they sort ahead of all banded content on their page and are reachable as
/// stop elements. Banded shapes follow by `(column, row)`. Shapes without
/// assignments do not participate.
fn scan_order(page: &Page) -> Vec<(u32, u32, &Shape)> {
    let mut entries: Vec<(u32, u32, &Shape)> = Vec::new();

    let mut titles: Vec<&Shape> = page
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
    for (i, title) in titles.into_iter().enumerate() {
        entries.push((0, i as u32 + 1, title));
    }

    for shape in &page.shapes {
        if let (Some(column), Some(row)) = (shape.column_number, shape.row_number) {
            if column > 0 {
                entries.push((column, row, shape));
            }
        }
    }

    entries.sort_by_key(|&(column, row, _)| (column, row));

    // Duplicate (column, row) keys are a data-quality defect; report them
    // rather than silently letting one shadow the other. Strict position
    // ordering in the passes above keeps the outcome deterministic anyway.
    for window in entries.windows(2) {
        if (window[0].0, window[0].1) == (window[1].0, window[1].1) {
            log::warn!(
                "Page {}: duplicate position (column {}, row {})",
                page.sequence_index,
                window[0].0,
                window[0].1
            );
        }
    }

    entries
}
