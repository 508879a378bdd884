//! Error types for loop-analysis operations.

use thiserror::Error;

/// Result type for loop-analysis operations.
pub type ControlResult<T> = Result<T, ControlError>;

/// Errors that can occur while building or sweeping loop responses.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ControlError {
    /// Invalid argument provided to a control function.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// Rational function whose denominator is empty or identically zero.
    #[error("Degenerate transfer function: {what}")]
    DegenerateDenominator { what: String },

    /// Non-physical or non-finite numeric input (including malformed sweep grids).
    #[error("Numeric error: {0}")]
    Numeric(#[from] bk_core::BkError),
}
