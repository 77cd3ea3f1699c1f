use thiserror::Error;

/// Errors returned by the clustering pipeline and its file surfaces.
#[derive(Debug, Error)]
pub enum Error {
    /// Input slice is empty.
    #[error("empty input")]
    EmptyInput,

    /// Fewer records than needed to form a single pair.
    #[error("too few records: need at least 2, found {found}")]
    TooFewRecords {
        /// Number of records supplied.
        found: usize,
    },

    /// A pair key was requested for a record and itself.
    #[error("pair key requires two distinct records, got {index} twice")]
    SelfPair {
        /// The repeated record index.
        index: usize,
    },

    /// Invalid parameter value.
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Human-readable explanation.
        message: &'static str,
    },

    /// Vectors (or per-record slices) have inconsistent lengths.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Expected length.
        expected: usize,
        /// Found length.
        found: usize,
    },

    /// A candidate list violates the descending-density ordering or id layout.
    #[error("invalid candidate list: {0}")]
    InvalidCandidates(String),

    /// Underlying I/O failure while reading or writing a file surface.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;
