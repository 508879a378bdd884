//! Analysis entry points: time-domain runs, conduction mode, inductor sizing,
//! Bode sweeps and compensator design.
//!
//! The parameter-level functions take engine types directly; the `project_*`
//! variants compile a [`Project`] first and time each phase.

use bk_control::{BodeAnalyzer, BodePlot, CompensationNetwork, PowerStage, StabilityReport};
use bk_core::CircuitParameters;
use bk_core::timing::{RunTiming, Timer};
use bk_design::{
    DcmParameters, InductorRecommendation, OperatingMode, boundary_current, classify,
    dcm_parameters,
};
use bk_project::schema::Project;
use bk_sim::{SimulationResults, SimulationSettings};
use serde::Serialize;
use tracing::info;

use crate::compile;
use crate::error::{AppError, AppResult};

/// Time-domain results with how long they took.
#[derive(Debug, Clone)]
pub struct SimulationRun {
    pub results: SimulationResults,
    pub timing: RunTiming,
}

/// Conduction mode and the figures behind it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConductionReport {
    pub mode: OperatingMode,
    pub boundary_current: f64,
    pub output_current: f64,
    pub parameters: DcmParameters,
}

/// One loop sweep, optionally with the compensator that was designed for it.
#[derive(Debug, Clone)]
pub struct LoopRun {
    pub compensator: Option<CompensationNetwork>,
    pub plot: BodePlot,
    pub report: StabilityReport,
    pub timing: RunTiming,
}

pub fn run_time_domain_simulation(
    params: &CircuitParameters,
    settings: &SimulationSettings,
) -> AppResult<SimulationResults> {
    Ok(bk_sim::run_time_domain_simulation(params, settings)?)
}

pub fn classify_mode(params: &CircuitParameters) -> OperatingMode {
    classify(&compile::operating_point(params))
}

pub fn compute_dcm_parameters(params: &CircuitParameters) -> AppResult<DcmParameters> {
    Ok(dcm_parameters(&compile::operating_point(params))?)
}

/// Size the inductor for the circuit's own load. The circuit is not modified.
pub fn optimize_inductor(
    params: &CircuitParameters,
    target_mode: OperatingMode,
    max_ripple_percent: f64,
) -> AppResult<InductorRecommendation> {
    Ok(bk_design::optimize_inductor(
        &compile::operating_point(params),
        target_mode,
        max_ripple_percent,
    )?)
}

pub fn sweep_bode(
    stage: &PowerStage,
    compensator: Option<&CompensationNetwork>,
    start_hz: f64,
    end_hz: f64,
    points: usize,
) -> AppResult<BodePlot> {
    let mut analyzer = BodeAnalyzer::new(*stage);
    if let Some(c) = compensator {
        analyzer = analyzer.with_compensator(*c);
    }
    Ok(analyzer.sweep(start_hz, end_hz, points)?)
}

/// Type II design for `target_crossover_hz`. The phase-margin target is
/// passed through but does not influence placement.
pub fn design_compensator(
    stage: &PowerStage,
    target_crossover_hz: f64,
    target_phase_margin_deg: f64,
) -> AppResult<CompensationNetwork> {
    Ok(BodeAnalyzer::new(*stage)
        .design_type2_compensation(target_crossover_hz, target_phase_margin_deg)?)
}

pub fn project_simulation(project: &Project) -> AppResult<SimulationRun> {
    let compile_timer = Timer::start("compile");
    let params = compile::circuit_parameters(&project.circuit)?;
    let settings = compile::simulation_settings(&project.simulation)?;
    let compile_time_s = compile_timer.stop();

    let solve_timer = Timer::start("simulate");
    let results = run_time_domain_simulation(&params, &settings)?;
    let timing = RunTiming {
        compile_time_s,
        solve_time_s: solve_timer.stop(),
    };

    info!(
        project = %project.name,
        samples = results.len(),
        total_time_s = timing.total_time_s(),
        "simulation finished"
    );
    Ok(SimulationRun { results, timing })
}

pub fn project_conduction(project: &Project) -> AppResult<ConductionReport> {
    let params = compile::circuit_parameters(&project.circuit)?;
    let point = compile::operating_point(&params);
    let parameters = dcm_parameters(&point)?;
    Ok(ConductionReport {
        mode: parameters.mode,
        boundary_current: boundary_current(&point),
        output_current: point.output_current,
        parameters,
    })
}

/// Inductor sizing with optional overrides of the project's design section.
pub fn project_inductor(
    project: &Project,
    target_mode: Option<OperatingMode>,
    max_ripple_percent: Option<f64>,
) -> AppResult<InductorRecommendation> {
    let params = compile::circuit_parameters(&project.circuit)?;
    let mode = target_mode.unwrap_or_else(|| compile::operating_mode(project.design.target_mode));
    let ripple = max_ripple_percent.unwrap_or(project.design.max_ripple_percent);
    optimize_inductor(&params, mode, ripple)
}

/// Type II design from the project's loop section, with optional overrides.
pub fn project_compensator(
    project: &Project,
    target_crossover_hz: Option<f64>,
    target_phase_margin_deg: Option<f64>,
) -> AppResult<CompensationNetwork> {
    let loop_def = &project.loop_analysis;
    let fc = target_crossover_hz
        .or(loop_def.target_crossover_hz)
        .ok_or_else(|| {
            AppError::InvalidInput(
                "no target crossover frequency given and none set in loop_analysis".to_string(),
            )
        })?;
    let pm = target_phase_margin_deg.unwrap_or(loop_def.target_phase_margin_deg);
    let params = compile::circuit_parameters(&project.circuit)?;
    design_compensator(&compile::power_stage(&params), fc, pm)
}

/// Sweep the project's loop.
///
/// With `target_crossover_hz` set a Type II network is designed first;
/// otherwise the configured compensator (if any) is used as given.
pub fn project_loop(project: &Project) -> AppResult<LoopRun> {
    let loop_def = &project.loop_analysis;

    let compile_timer = Timer::start("compile");
    let params = compile::circuit_parameters(&project.circuit)?;
    let stage = compile::power_stage(&params);
    let compensator = match (loop_def.target_crossover_hz, &loop_def.compensator) {
        (Some(fc), _) => Some(design_compensator(
            &stage,
            fc,
            loop_def.target_phase_margin_deg,
        )?),
        (None, Some(def)) => Some(compile::compensator(def)?),
        (None, None) => None,
    };
    let compile_time_s = compile_timer.stop();

    let solve_timer = Timer::start("sweep");
    let plot = sweep_bode(
        &stage,
        compensator.as_ref(),
        loop_def.start_hz,
        loop_def.end_hz,
        loop_def.points,
    )?;
    let timing = RunTiming {
        compile_time_s,
        solve_time_s: solve_timer.stop(),
    };

    let report = plot.stability_report();
    info!(project = %project.name, %report, "loop analysis finished");
    Ok(LoopRun {
        compensator,
        plot,
        report,
        timing,
    })
}
