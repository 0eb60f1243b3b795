//! The corpus: an ordered run of pages forming one continuous reading
//! sequence.
//!
//! The order of entries is the single source of truth for "what comes next"
//! during cross-page traversal. Entries whose records failed to parse keep
//! their slot (so sequence indices stay stable) but carry no page; every
//! traversal simply skips them.

use std::cmp::Ordering;

use serde::Serialize;

use crate::config::LayoutConfig;
use crate::page::Page;
use crate::record::PageRecord;

/// A traversal cursor: where we are in the corpus, without owning any shape.
///
/// Ordering is lexicographic over `(page, column, row)`, which is exactly
/// canonical reading order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Position {
    /// Sequence index of the page in the corpus.
    pub page: usize,
    /// Band on that page (0 = full width).
    pub column: u32,
    /// Row within the band (synthetic, top-y order, for band 0).
    pub row: u32,
}

impl Position {
    /// Create a position.
    pub fn new(page: usize, column: u32, row: u32) -> Self {
        Self { page, column, row }
    }
}

/// One slot in the corpus: a page identifier plus the page itself, if its
/// record loaded.
#[derive(Debug, Clone)]
pub struct CorpusEntry {
    /// Source identifier of the page (typically the record's file stem).
    pub id: String,
    /// The loaded page, or `None` if the record was malformed.
    pub page: Option<Page>,
}

/// The ordered sequence of pages. Exclusively owns its pages.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    entries: Vec<CorpusEntry>,
}

impl Corpus {
    /// Create an empty corpus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a corpus from already-ordered `(id, record)` pairs.
    ///
    /// The given order is taken as the corpus total order; use
    /// [`Corpus::from_unordered_records`] when the caller has not sorted.
    pub fn from_records(records: impl IntoIterator<Item = (String, PageRecord)>) -> Self {
        let mut corpus = Self::new();
        for (id, record) in records {
            corpus.push_page(id, record.to_page());
        }
        corpus
    }

    /// Build a corpus from unordered `(id, record)` pairs, sorting by the
    /// natural order of identifiers ("page2" before "page10").
    pub fn from_unordered_records(
        records: impl IntoIterator<Item = (String, PageRecord)>,
    ) -> Self {
        let mut records: Vec<(String, PageRecord)> = records.into_iter().collect();
        records.sort_by(|a, b| natural_cmp(&a.0, &b.0));
        Self::from_records(records)
    }

    /// Build a corpus from already-ordered `(id, raw JSON)` pairs.
    ///
    /// Malformed records are logged and keep their slot as unloadable
    /// entries; nothing here is fatal.
    pub fn from_json_records<'a>(
        records: impl IntoIterator<Item = (String, &'a str)>,
    ) -> Self {
        let mut corpus = Self::new();
        for (id, json) in records {
            match PageRecord::parse(&id, json) {
                Ok(record) => {
                    let page = record.to_page();
                    corpus.push_page(id, page);
                },
                Err(e) => {
                    log::warn!("Skipping unloadable page record: {}", e);
                    corpus.push_unloadable(id);
                },
            }
        }
        corpus
    }

    /// Append a loaded page, assigning the next sequence index.
    pub fn push_page(&mut self, id: String, mut page: Page) {
        page.sequence_index = self.entries.len();
        self.entries.push(CorpusEntry {
            id,
            page: Some(page),
        });
    }

    /// Append a slot for a page whose record failed to load. The slot keeps
    /// sequence indices stable; traversal skips it.
    pub fn push_unloadable(&mut self, id: String) {
        self.entries.push(CorpusEntry { id, page: None });
    }

    /// Number of slots (loaded or not).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the corpus has no slots at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The entry at a sequence index.
    pub fn entry(&self, index: usize) -> Option<&CorpusEntry> {
        self.entries.get(index)
    }

    /// The loaded page at a sequence index, if any.
    pub fn page(&self, index: usize) -> Option<&Page> {
        self.entries.get(index).and_then(|e| e.page.as_ref())
    }

    /// Iterate over all entries in corpus order.
    pub fn iter(&self) -> impl Iterator<Item = &CorpusEntry> {
        self.entries.iter()
    }

    /// Run the page-local enrichment pipeline (boundary detection, column/row
    /// assignment, bottom-edge correction) over every loaded page.
    ///
    /// Returns how many pages were enriched. Pages are independent; each is
    /// exclusively borrowed for the duration of its own pass.
    pub fn enrich(&mut self, config: &LayoutConfig) -> usize {
        let mut enriched = 0;
        for entry in &mut self.entries {
            if let Some(page) = entry.page.as_mut() {
                crate::layout::enrich_page(page, config);
                enriched += 1;
            }
        }
        enriched
    }
}

/// Compare two page identifiers in natural order.
///
/// Identifiers are split into alternating non-digit/digit runs; digit runs
/// compare numerically (no overflow: zero-stripped length, then digits),
/// non-digit runs compare case-insensitively. Equal keys fall back to plain
/// string order so the comparator stays total.
///
/// # Examples
///
/// ```
/// use broadsheet::corpus::natural_cmp;
/// use std::cmp::Ordering;
///
/// assert_eq!(natural_cmp("page2", "page10"), Ordering::Less);
/// assert_eq!(natural_cmp("Page3", "page3"), Ordering::Less);
/// ```
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut ai = a.chars().peekable();
    let mut bi = b.chars().peekable();

    loop {
        match (ai.peek().copied(), bi.peek().copied()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(ca), Some(cb)) => {
                let da = ca.is_ascii_digit();
                let db = cb.is_ascii_digit();
                if da && db {
                    let run_a = take_run(&mut ai, |c| c.is_ascii_digit());
                    let run_b = take_run(&mut bi, |c| c.is_ascii_digit());
                    let na = run_a.trim_start_matches('0');
                    let nb = run_b.trim_start_matches('0');
                    let ord = na.len().cmp(&nb.len()).then_with(|| na.cmp(nb));
                    if ord != Ordering::Equal {
                        return ord;
                    }
                } else if da != db {
                    // Digit runs sort before non-digit runs.
                    return if da { Ordering::Less } else { Ordering::Greater };
                } else {
                    let run_a = take_run(&mut ai, |c| !c.is_ascii_digit()).to_lowercase();
                    let run_b = take_run(&mut bi, |c| !c.is_ascii_digit()).to_lowercase();
                    let ord = run_a.cmp(&run_b);
                    if ord != Ordering::Equal {
                        return ord;
                    }
                }
            },
        }
    }
}

fn take_run(
    iter: &mut std::iter::Peekable<std::str::Chars<'_>>,
    pred: impl Fn(char) -> bool,
) -> String {
    let mut run = String::new();
    while let Some(&c) = iter.peek() {
        if !pred(c) {
            break;
        }
        run.push(c);
        iter.next();
    }
    run
}
