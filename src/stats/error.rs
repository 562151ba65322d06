//! Statistics error types

use thiserror::Error;

/// Errors from fits that are undefined for the given input
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StatsError {
    /// Input series were empty
    #[error("Empty input series")]
    Empty,

    /// Paired series had different lengths
    #[error("Length mismatch: x has {x} values, y has {y}")]
    LengthMismatch { x: usize, y: usize },

    /// All x values are identical, so the slope is undefined
    #[error("x values have zero variance; slope is undefined")]
    ZeroVarianceX,
}

/// Result type alias for statistics operations
pub type StatsResult<T> = Result<T, StatsError>;
