//! Error types shared across the crate.
//!
//! Most "no value" outcomes (empty sample, index out of range) are
//! reported as `Option::None`. [`StatsError`] is reserved for failures
//! the caller must be able to tell apart from an ordinary absent value.

/// Failures reported by fallible operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum StatsError {
    /// The operation needs at least one observation.
    #[error("sample is empty")]
    EmptySample,

    /// Least-squares fit requested on data with no spread in x.
    #[error("regression is degenerate: all x values are equal")]
    DegenerateRegression,

    /// Parameters violate distribution constraints.
    #[error("invalid distribution parameters: {0}")]
    InvalidParameters(String),
}

/// Result alias for fallible statistics operations.
pub type StatsResult<T> = Result<T, StatsError>;
