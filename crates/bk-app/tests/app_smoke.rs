//! Smoke tests for the bk-app service layer against the demo projects.

use std::path::PathBuf;

use bk_app::{
    AppError, classify_mode, compile, compute_dcm_parameters, load_project, project_compensator,
    project_conduction, project_inductor, project_loop, project_simulation, save_project,
    summarize, validate_project,
};
use approx::{assert_abs_diff_eq, assert_relative_eq};
use bk_control::{CompensationNetwork, StabilityVerdict};
use bk_design::OperatingMode;

fn demo(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.pop(); // go to crates
    path.pop(); // go to repo root
    path.push("demos");
    path.push(name);
    path
}

#[test]
fn demo_projects_validate() {
    for name in ["buck_90v_13v.yaml", "buck_12v_type3.json"] {
        let project = load_project(&demo(name)).expect("demo should load");
        validate_project(&project).expect("demo should validate");
    }

    let summary = summarize(&load_project(&demo("buck_90v_13v.yaml")).unwrap()).unwrap();
    assert_abs_diff_eq!(summary.ideal_output_voltage, 12.996, epsilon = 1e-9);
    assert_abs_diff_eq!(summary.load_current, 12.996 / 2.6, epsilon = 1e-9);
    assert!(summary.resonance_hz > 7_000.0 && summary.resonance_hz < 7_500.0);
    assert!(!summary.has_compensator);
}

#[test]
fn project_roundtrips_through_service() {
    let project = load_project(&demo("buck_12v_type3.json")).unwrap();
    let path = std::env::temp_dir().join("bk_app_roundtrip.yaml");
    save_project(&path, &project).unwrap();
    assert_eq!(load_project(&path).unwrap(), project);
}

#[test]
fn simulation_settles_near_duty_times_input() {
    let project = load_project(&demo("buck_90v_13v.yaml")).unwrap();
    let run = project_simulation(&project).unwrap();
    let vout = run.results.metrics.average_output_voltage;
    assert!((vout - 12.996).abs() / 12.996 < 0.01, "vout = {vout}");
    assert!(run.results.inductor_current.iter().all(|&i| i >= 0.0));
    assert!(run.timing.total_time_s() >= run.timing.solve_time_s);
}

#[test]
fn conduction_report_for_heavy_load() {
    let project = load_project(&demo("buck_90v_13v.yaml")).unwrap();
    let report = project_conduction(&project).unwrap();
    assert_eq!(report.mode, OperatingMode::Ccm);
    assert!(report.output_current > report.boundary_current);
    assert_eq!(report.parameters.d3, 0.0);

    let params = compile::circuit_parameters(&project.circuit).unwrap();
    assert_eq!(classify_mode(&params), report.mode);
    assert_eq!(compute_dcm_parameters(&params).unwrap(), report.parameters);
}

#[test]
fn loop_with_designed_compensator() {
    let project = load_project(&demo("buck_90v_13v.yaml")).unwrap();
    let run = project_loop(&project).unwrap();
    assert!(matches!(
        run.compensator,
        Some(CompensationNetwork::TypeII { .. })
    ));
    assert_eq!(run.plot.len(), 300);
    assert_eq!(run.plot.frequencies_hz[0], 1.0);
    assert_eq!(run.plot.frequencies_hz[299], 1e6);
    assert_eq!(
        run.report.verdict == StabilityVerdict::Unstable,
        !run.plot.is_stable()
    );
}

#[test]
fn loop_with_configured_compensator() {
    let project = load_project(&demo("buck_12v_type3.json")).unwrap();
    let run = project_loop(&project).unwrap();
    assert!(matches!(
        run.compensator,
        Some(CompensationNetwork::TypeIII { .. })
    ));
    assert_eq!(run.plot.len(), 200);
}

#[test]
fn compensator_design_needs_a_crossover() {
    let project = load_project(&demo("buck_12v_type3.json")).unwrap();
    let err = project_compensator(&project, None, None).unwrap_err();
    assert!(matches!(err, AppError::InvalidInput(_)));

    let net = project_compensator(&project, Some(20e3), Some(60.0)).unwrap();
    assert!(matches!(net, CompensationNetwork::TypeII { pole_hz, .. } if (pole_hz - 200e3).abs() < 1e-6));
}

#[test]
fn inductor_sizing_uses_design_section_and_overrides() {
    let project = load_project(&demo("buck_12v_type3.json")).unwrap();
    let from_file = project_inductor(&project, None, None).unwrap();
    assert_eq!(from_file.target_mode, OperatingMode::Dcm);

    let ccm = project_inductor(&project, Some(OperatingMode::Ccm), Some(150.0)).unwrap();
    assert_relative_eq!(
        ccm.recommended_inductance / from_file.recommended_inductance,
        3.0,
        max_relative = 1e-9
    );
    assert!(ccm.ripple_within_limit);
    // The project's own inductance is untouched.
    assert_eq!(project.circuit.inductance_h, 4.7e-6);
}
