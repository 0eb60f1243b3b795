//! End-to-end tests for the cross-page span collector.
//!
//! These build small corpora from JSON records, run the full enrichment
//! pipeline, and verify the collector's stop-boundary semantics exactly.

use broadsheet::{Corpus, LayoutConfig, MarkerQuery, Position, SpanCollector, Termination};
use serde_json::json;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// ============================================================================
// Helper Functions for Creating Mock Corpora
// ============================================================================

fn shape_json(label: &str, x1: f32, y1: f32, x2: f32, y2: f32, text: &str) -> serde_json::Value {
    json!({
        "label": label,
        "points": [[x1, y1], [x2, y2]],
        "text": text,
    })
}

/// Left x of a band on the 3000-wide test page.
fn band_x(band: u32) -> f32 {
    (band as f32 - 1.0) * 1000.0 + 100.0
}

/// A one-band shape in the given band, vertically placed by slot.
fn banded(label: &str, band: u32, slot: u32, text: &str) -> serde_json::Value {
    let y1 = 200.0 + slot as f32 * 300.0;
    shape_json(label, band_x(band), y1, band_x(band) + 800.0, y1 + 250.0, text)
}

fn corpus_from(pages: Vec<(&str, Vec<serde_json::Value>)>) -> Corpus {
    let mut corpus = Corpus::from_records(
        pages
            .into_iter()
            .map(|(id, shapes)| {
                let value = json!({ "shapes": shapes, "imageWidth": 3000.0 });
                (
                    id.to_string(),
                    broadsheet::PageRecord::from_value(id, value).unwrap(),
                )
            })
            .collect::<Vec<_>>(),
    );
    corpus.enrich(&LayoutConfig::default());
    corpus
}

fn query() -> MarkerQuery {
    MarkerQuery::new(["tőke", "munka"]).unwrap()
}

/// The §8 scenario: marker at page 1 band 2 row 3; the earliest non-matching
/// banded element after it is page 2 band 1 row 1.
fn three_page_corpus() -> Corpus {
    corpus_from(vec![
        (
            "1905_21_page1",
            vec![
                shape_json("wide-title", 0.0, 0.0, 3000.0, 150.0, "NÉPSZAVA 1905"),
                banded("body-text", 1, 0, "band1 row1"),
                banded("body-text", 1, 1, "band1 row2"),
                banded("body-text", 2, 0, "band2 row1"),
                banded("body-text", 2, 1, "band2 row2"),
                banded("column-subtitle", 2, 2, "TŐKE ÉS MUNKA"),
                banded("body-text", 2, 3, "band2 row4"),
                banded("body-text", 2, 4, "band2 row5"),
                banded("body-text", 3, 0, "band3 row1"),
                banded("body-text", 3, 1, "band3 row2"),
            ],
        ),
        (
            "1905_21_page2",
            vec![
                banded("column-subtitle", 1, 0, "A SZERKESZTŐ ÜZENETEI"),
                banded("body-text", 1, 1, "page2 band1 row2"),
                banded("body-text", 2, 0, "page2 band2 row1"),
                banded("body-text", 3, 0, "page2 band3 row1"),
            ],
        ),
        (
            "1905_21_page3",
            vec![banded("body-text", 1, 0, "page3 never reached")],
        ),
    ])
}

// ============================================================================
// Stop-Boundary Semantics
// ============================================================================

#[test]
fn test_marker_position_after_enrichment() {
    let corpus = three_page_corpus();
    let page = corpus.page(0).unwrap();
    let marker = page
        .shapes
        .iter()
        .find(|s| s.text().is_some_and(|t| t.contains("TŐKE")))
        .unwrap();
    assert_eq!(marker.column_number, Some(2));
    assert_eq!(marker.row_number, Some(3));
}

#[test]
fn test_stop_boundary_exact_inclusion_exclusion() {
    init_logging();
    let corpus = three_page_corpus();
    let span = SpanCollector::new(&corpus, query()).collect_at(0).unwrap();

    // Page 1's remaining band-2 rows and all of band 3 are in.
    assert!(span.content.contains("band2 row4"));
    assert!(span.content.contains("band2 row5"));
    assert!(span.content.contains("band3 row1"));
    assert!(span.content.contains("band3 row2"));

    // The marker itself and everything before it are out.
    assert!(!span.content.contains("TŐKE ÉS MUNKA"));
    assert!(!span.content.contains("band2 row1"));
    assert!(!span.content.contains("band1 row1"));

    // Nothing from page 2: the stop element is its band 1 row 1 subtitle.
    assert!(!span.content.contains("SZERKESZTŐ"));
    assert!(!span.content.contains("page2"));
    assert!(!span.content.contains("page3"));

    assert_eq!(span.start, Position::new(0, 2, 3));
    assert_eq!(span.stop, Some(Position::new(1, 1, 1)));
    assert_eq!(span.termination, Termination::Stopped);
}

#[test]
fn test_span_metadata() {
    let corpus = three_page_corpus();
    let span = SpanCollector::new(&corpus, query()).collect_at(0).unwrap();

    assert_eq!(span.header_text, "NÉPSZAVA 1905");
    assert_eq!(span.marker_text, "TŐKE ÉS MUNKA");
    assert_eq!(span.source_page_id, "1905_21_page1");
    assert_eq!(span.content_length, span.content.chars().count());
    assert!(span.content_length > 0);
}

#[test]
fn test_collection_crosses_page_without_stop_on_it() {
    // Page 2 holds only continuing body text; collection flows through it
    // to the stop on page 3.
    let corpus = corpus_from(vec![
        (
            "page1",
            vec![
                banded("column-subtitle", 3, 0, "tőke és munka"),
                banded("body-text", 3, 1, "page1 tail"),
            ],
        ),
        (
            "page2",
            vec![
                banded("body-text", 1, 0, "page2 continuation"),
                banded("body-text", 2, 0, "page2 more"),
            ],
        ),
        (
            "page3",
            vec![
                shape_json("wide-title", 0.0, 0.0, 3000.0, 150.0, "NEXT ISSUE"),
                banded("body-text", 1, 1, "page3 body"),
            ],
        ),
    ]);
    let span = SpanCollector::new(&corpus, query()).collect_at(0).unwrap();

    assert!(span.content.contains("page1 tail"));
    assert!(span.content.contains("page2 continuation"));
    assert!(span.content.contains("page2 more"));
    assert!(!span.content.contains("page3 body"));
    assert_eq!(span.stop, Some(Position::new(2, 0, 1)));
    assert_eq!(span.termination, Termination::Stopped);
}

#[test]
fn test_subtitle_fragments_tagged() {
    let corpus = corpus_from(vec![(
        "page1",
        vec![
            banded("column-subtitle", 1, 0, "tőke és munka"),
            banded("body-text", 1, 1, "plain body"),
            banded("column-subtitle", 1, 2, "tőke és munka (folytatás)"),
        ],
    )]);
    let span = SpanCollector::new(&corpus, query()).collect_at(0).unwrap();
    assert!(span.content.contains("plain body"));
    assert!(span.content.contains("[SUBTITLE] tőke és munka (folytatás)"));
}

// ============================================================================
// Termination States
// ============================================================================

#[test]
fn test_exhausted_when_no_stop_exists() {
    let corpus = corpus_from(vec![
        (
            "page1",
            vec![
                banded("column-subtitle", 2, 0, "tőke és munka"),
                banded("body-text", 2, 1, "tail one"),
            ],
        ),
        ("page2", vec![banded("body-text", 1, 0, "tail two")]),
    ]);
    let span = SpanCollector::new(&corpus, query()).collect_at(0).unwrap();

    assert_eq!(span.termination, Termination::Exhausted);
    assert_eq!(span.stop, None);
    assert!(span.content.contains("tail one"));
    assert!(span.content.contains("tail two"));
}

#[test]
fn test_no_marker_is_a_negative_result() {
    let corpus = corpus_from(vec![(
        "page1",
        vec![banded("body-text", 1, 0, "nothing to find")],
    )]);
    assert!(SpanCollector::new(&corpus, query()).collect_at(0).is_none());
}

// ============================================================================
// Determinism
// ============================================================================

#[test]
fn test_collector_is_deterministic() {
    let corpus = three_page_corpus();
    let collector = SpanCollector::new(&corpus, query());

    let first = collector.collect_at(0).unwrap();
    let second = collector.collect_at(0).unwrap();

    assert_eq!(first.content, second.content);
    assert_eq!(first.stop, second.stop);
    assert_eq!(first.termination, second.termination);
    assert_eq!(first.content_length, second.content_length);
}

#[test]
fn test_corpus_sweep_finds_each_marker_page() {
    let corpus = corpus_from(vec![
        (
            "page1",
            vec![
                banded("column-subtitle", 1, 0, "tőke és munka"),
                banded("body-text", 1, 1, "first span"),
            ],
        ),
        (
            "page2",
            vec![
                shape_json("wide-title", 0.0, 0.0, 3000.0, 150.0, "ISSUE 22"),
                banded("column-subtitle", 1, 1, "tőke és munka"),
                banded("body-text", 1, 2, "second span"),
            ],
        ),
    ]);
    let spans = SpanCollector::new(&corpus, query()).collect_all();

    assert_eq!(spans.len(), 2);
    // The first span stops at page 2's wide title.
    assert_eq!(spans[0].stop, Some(Position::new(1, 0, 1)));
    assert!(spans[0].content.contains("first span"));
    assert!(!spans[0].content.contains("second span"));
    // The second runs to corpus end.
    assert_eq!(spans[1].termination, Termination::Exhausted);
    assert_eq!(spans[1].header_text, "ISSUE 22");
}

#[test]
fn test_span_serializes_for_downstream_tools() {
    let corpus = three_page_corpus();
    let span = SpanCollector::new(&corpus, query()).collect_at(0).unwrap();
    let value = serde_json::to_value(&span).unwrap();

    assert_eq!(value["source_page_id"], "1905_21_page1");
    assert_eq!(value["start"]["column"], 2);
    assert_eq!(value["start"]["row"], 3);
    assert_eq!(value["termination"], "Stopped");
}
