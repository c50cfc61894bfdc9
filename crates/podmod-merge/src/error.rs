//! Error types for the merge crate.

/// Errors that can occur while merging generated content into a manifest.
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    /// No line in the source matched the insertion anchor.
    #[error("failed to match anchor {anchor:?} in contents")]
    NoMatch { anchor: String },

    /// A tagged section has a begin marker without a matching end marker
    /// (or the end marker comes first).
    #[error("unbalanced generated section for tag '{tag}': begin={begin:?}, end={end:?}")]
    UnbalancedSection {
        tag: String,
        begin: Option<usize>,
        end: Option<usize>,
    },

    /// Tags are embedded in single-line comments and must be non-empty.
    #[error("invalid tag {0:?}: must be non-empty and contain no whitespace")]
    InvalidTag(String),
}

/// Convenience alias for merge results.
pub type MergeResult<T> = Result<T, MergeError>;
