//! Project loading, saving, validation, and introspection.

use std::path::Path;

use bk_project::schema::Project;
use serde::Serialize;
use bk_sim::SimulationSettings;

use crate::compile;
use crate::error::AppResult;

/// Headline numbers of a project's converter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectSummary {
    pub name: String,
    pub input_voltage: f64,
    pub ideal_output_voltage: f64,
    pub load_current: f64,
    pub switching_frequency: f64,
    /// LC resonance (Hz)
    pub resonance_hz: f64,
    pub has_compensator: bool,
}

/// Load a project; `.json` files as JSON, everything else as YAML.
pub fn load_project(path: &Path) -> AppResult<Project> {
    Ok(bk_project::load(path)?)
}

/// Save a project, format chosen by extension.
pub fn save_project(path: &Path, project: &Project) -> AppResult<()> {
    Ok(bk_project::save(path, project)?)
}

/// Schema validation plus a full compile of every section.
pub fn validate_project(project: &Project) -> AppResult<()> {
    bk_project::validate_project(project)?;

    let params = compile::circuit_parameters(&project.circuit)?;
    let settings: SimulationSettings = compile::simulation_settings(&project.simulation)?;
    if let Some(def) = &project.loop_analysis.compensator {
        compile::compensator(def)?;
    }
    compile::operating_point(&params).validate()?;

    tracing::debug!(
        name = %project.name,
        integrator = ?settings.integrator,
        "project validated"
    );
    Ok(())
}

pub fn summarize(project: &Project) -> AppResult<ProjectSummary> {
    let params = compile::circuit_parameters(&project.circuit)?;
    Ok(ProjectSummary {
        name: project.name.clone(),
        input_voltage: params.input_voltage,
        ideal_output_voltage: params.ideal_output_voltage(),
        load_current: params.ideal_load_current(),
        switching_frequency: params.switching_frequency,
        resonance_hz: params.natural_frequency() / (2.0 * std::f64::consts::PI),
        has_compensator: project.loop_analysis.compensator.is_some(),
    })
}
