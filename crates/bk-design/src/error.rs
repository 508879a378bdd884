//! Error types for converter design checks.

use thiserror::Error;

pub type DesignResult<T> = Result<T, DesignError>;

/// Reasons an operating point or design request is rejected.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DesignError {
    #[error("{what} must be positive (got {value})")]
    NonPositive { what: &'static str, value: f64 },

    #[error("{what} must not be negative (got {value})")]
    Negative { what: &'static str, value: f64 },

    #[error(
        "output voltage {output_voltage} V must be below input voltage {input_voltage} V for a buck converter"
    )]
    NotStepDown {
        input_voltage: f64,
        output_voltage: f64,
    },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Circuit parameters rejected: {0}")]
    Circuit(#[from] bk_core::BkError),
}
