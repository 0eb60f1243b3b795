//! Marker matching.
//!
//! A recurring feature column is identified by its subtitle: a
//! column-subtitle shape whose text contains a configured set of required
//! words. OCR output of century-old newsprint is noisy, so matching is
//! deliberately loose: case-insensitive, diacritic-insensitive, and each
//! required term is an independent containment check rather than a phrase.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::error::{Error, Result};
use crate::page::{Label, Page, Shape};

/// Normalize text for matching: lowercase, strip diacritics (NFD, drop
/// combining marks), collapse whitespace runs to single spaces.
///
/// # Examples
///
/// ```
/// use broadsheet::search::normalize_for_match;
///
/// assert_eq!(normalize_for_match("  TŐKE és\n MUNKA "), "toke es munka");
/// ```
pub fn normalize_for_match(text: &str) -> String {
    let folded: String = text
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect();
    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// The set of required substrings that identifies a tracked column's marker.
///
/// All terms must be contained in the normalized text, in any order.
#[derive(Debug, Clone)]
pub struct MarkerQuery {
    required: Vec<String>,
}

impl MarkerQuery {
    /// Build a query from required terms. The terms themselves are
    /// normalized, so callers may pass accented forms.
    ///
    /// Returns [`Error::EmptyMarkerQuery`] when no non-empty term remains;
    /// an unconstrained query would match every subtitle.
    pub fn new<I, S>(terms: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let required: Vec<String> = terms
            .into_iter()
            .map(|t| normalize_for_match(t.as_ref()))
            .filter(|t| !t.is_empty())
            .collect();
        if required.is_empty() {
            return Err(Error::EmptyMarkerQuery);
        }
        Ok(Self { required })
    }

    /// The normalized required terms.
    pub fn required(&self) -> &[String] {
        &self.required
    }

    /// Whether the text contains every required term.
    pub fn matches(&self, text: &str) -> bool {
        let normalized = normalize_for_match(text);
        self.required.iter().all(|term| normalized.contains(term))
    }

    /// Whether the shape is a marker for this query: a column subtitle whose
    /// text matches.
    pub fn matches_shape(&self, shape: &Shape) -> bool {
        shape.label == Label::ColumnSubtitle
            && shape.text().is_some_and(|t| self.matches(t))
    }
}

/// Find the first marker on a page, in discovery order.
///
/// `None` is a legitimate negative result, not an error.
pub fn find_marker<'a>(page: &'a Page, query: &MarkerQuery) -> Option<&'a Shape> {
    page.shapes.iter().find(|s| query.matches_shape(s))
}

/// Text of the page's first wide title, used as the issue header of a span.
pub fn page_header_text(page: &Page) -> Option<&str> {
    page.shapes
        .iter()
        .find(|s| s.label == Label::WideTitle)
        .and_then(Shape::text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    fn subtitle(text: &str) -> Shape {
        let mut s = Shape::new(
            Label::ColumnSubtitle,
            vec![Point::new(0.0, 0.0), Point::new(100.0, 40.0)],
        );
        s.text = Some(text.to_string());
        s
    }

    #[test]
    fn test_normalize_strips_diacritics_and_case() {
        assert_eq!(normalize_for_match("TŐKE ÉS MUNKA"), "toke es munka");
        assert_eq!(normalize_for_match("Frühjahrsmüdigkeit"), "fruhjahrsmudigkeit");
    }

    #[test]
    fn test_normalize_collapses_whitespace() {
        assert_eq!(normalize_for_match(" a \t b \n\n c "), "a b c");
    }

    #[test]
    fn test_query_terms_in_any_order() {
        let query = MarkerQuery::new(["tőke", "munka"]).unwrap();
        assert!(query.matches("MUNKA és tőke"));
        assert!(query.matches("a tőke. és a munka."));
        assert!(!query.matches("csak munka"));
    }

    #[test]
    fn test_query_accent_insensitive_both_ways() {
        let query = MarkerQuery::new(["toke", "munka"]).unwrap();
        assert!(query.matches("TŐKE ÉS MUNKA"));
    }

    #[test]
    fn test_containment_not_word_boundary() {
        // Independent containment: a term inside a longer word still counts.
        let query = MarkerQuery::new(["munka"]).unwrap();
        assert!(query.matches("munkaügy"));
    }

    #[test]
    fn test_empty_query_rejected() {
        assert!(matches!(
            MarkerQuery::new(Vec::<&str>::new()),
            Err(Error::EmptyMarkerQuery)
        ));
        assert!(matches!(
            MarkerQuery::new(["   ", "\t"]),
            Err(Error::EmptyMarkerQuery)
        ));
    }

    #[test]
    fn test_matches_shape_requires_subtitle_label() {
        let query = MarkerQuery::new(["munka"]).unwrap();
        let mut body = subtitle("tőke és munka");
        body.label = Label::BodyText;
        assert!(!query.matches_shape(&body));
        assert!(query.matches_shape(&subtitle("tőke és munka")));
    }

    #[test]
    fn test_find_marker_first_in_discovery_order() {
        let query = MarkerQuery::new(["munka"]).unwrap();
        let page = Page::new(
            vec![
                subtitle("sport"),
                subtitle("munka I."),
                subtitle("munka II."),
            ],
            3000.0,
        );
        let found = find_marker(&page, &query).unwrap();
        assert_eq!(found.text(), Some("munka I."));
    }

    #[test]
    fn test_page_header_text() {
        let mut title = Shape::new(
            Label::WideTitle,
            vec![Point::new(0.0, 0.0), Point::new(100.0, 40.0)],
        );
        title.text = Some("NÉPSZAVA 1905".to_string());
        let page = Page::new(vec![subtitle("x"), title], 3000.0);
        assert_eq!(page_header_text(&page), Some("NÉPSZAVA 1905"));

        let empty = Page::new(vec![subtitle("x")], 3000.0);
        assert_eq!(page_header_text(&empty), None);
    }
}
