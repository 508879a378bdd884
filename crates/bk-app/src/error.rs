//! Error types for the bk-app service layer.

use std::path::PathBuf;

/// Application error type that wraps errors from the engine crates
/// and gives the CLI one error to report.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Project error: {0}")]
    Project(String),

    #[error("Failed to write file: {path}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Project validation failed: {0}")]
    Validation(String),

    #[error("Circuit definition rejected: {0}")]
    Circuit(String),

    #[error("Simulation error: {0}")]
    Simulation(String),

    #[error("Loop analysis error: {0}")]
    Control(String),

    #[error("Design check failed: {0}")]
    Design(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for bk-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<bk_project::ProjectError> for AppError {
    fn from(err: bk_project::ProjectError) -> Self {
        match err {
            bk_project::ProjectError::Validation(v) => AppError::Validation(v.to_string()),
            other => AppError::Project(other.to_string()),
        }
    }
}

impl From<bk_project::ValidationError> for AppError {
    fn from(err: bk_project::ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<bk_core::BkError> for AppError {
    fn from(err: bk_core::BkError) -> Self {
        AppError::Circuit(err.to_string())
    }
}

impl From<bk_sim::SimError> for AppError {
    fn from(err: bk_sim::SimError) -> Self {
        AppError::Simulation(err.to_string())
    }
}

impl From<bk_control::ControlError> for AppError {
    fn from(err: bk_control::ControlError) -> Self {
        AppError::Control(err.to_string())
    }
}

impl From<bk_design::DesignError> for AppError {
    fn from(err: bk_design::DesignError) -> Self {
        AppError::Design(err.to_string())
    }
}
