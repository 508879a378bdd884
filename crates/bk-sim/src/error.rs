//! Error types for simulation operations.

use thiserror::Error;

/// Errors encountered while setting up a time-domain run.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Non-physical condition: {what}")]
    NonPhysical { what: &'static str },

    #[error("Step budget exceeded: {requested} steps requested, limit is {limit}")]
    TooManySteps { requested: usize, limit: usize },

    #[error("Circuit parameters rejected: {0}")]
    Circuit(#[from] bk_core::BkError),
}

pub type SimResult<T> = Result<T, SimError>;
