//! Shared application service layer for buckflow.
//!
//! Turns project files into engine inputs, runs the analyses and reports
//! failures through one [`AppError`] type for the CLI.

pub mod analysis_service;
pub mod compile;
pub mod error;
pub mod project_service;

pub use analysis_service::{
    ConductionReport, LoopRun, SimulationRun, classify_mode, compute_dcm_parameters,
    design_compensator, optimize_inductor, project_compensator, project_conduction,
    project_inductor, project_loop, project_simulation, run_time_domain_simulation, sweep_bode,
};
pub use error::{AppError, AppResult};
pub use project_service::{ProjectSummary, load_project, save_project, summarize, validate_project};
