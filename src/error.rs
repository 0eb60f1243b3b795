//! Error types for the layout library.
//!
//! Per-page problems (malformed records, degenerate geometry, missing markers)
//! are deliberately not errors: corpus-level operations always complete and
//! report success counts instead. The variants here cover the few places where
//! a caller hands us something unusable up front.

/// Result type alias for layout library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during layout processing.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A page record could not be deserialized.
    #[error("Malformed page record '{id}': {reason}")]
    MalformedRecord {
        /// Identifier of the offending page
        id: String,
        /// Reason deserialization failed
        reason: String,
    },

    /// A marker query was built with no required terms.
    ///
    /// An empty query would match every subtitle, turning the span collector
    /// into an unbounded sweep; callers must supply at least one term.
    #[error("Marker query has no required terms")]
    EmptyMarkerQuery,

    /// JSON error from the underlying serialization layer.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
