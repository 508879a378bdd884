use std::path::PathBuf;

use bk_project::schema::*;
use bk_project::{LATEST_VERSION, ProjectError, load, load_json, load_yaml, save_json, save_yaml};

fn demo(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../demos")
        .join(name)
}

fn project() -> Project {
    Project {
        version: LATEST_VERSION,
        name: "Roundtrip".to_string(),
        circuit: CircuitDef {
            input_voltage_v: 24.0,
            duty_cycle: 0.25,
            switching_frequency_hz: 200e3,
            inductance_h: 22e-6,
            capacitance_f: 47e-6,
            load_resistance_ohm: 3.0,
            parasitics: ParasiticsDef {
                inductor_esr_ohm: 0.01,
                capacitor_esr_ohm: 0.002,
                switch_on_resistance_ohm: 0.03,
                diode_forward_voltage_v: 0.45,
            },
        },
        simulation: SimulationDef {
            integrator: IntegratorDef::Rk2,
            max_steps: Some(500_000),
            ..SimulationDef::default()
        },
        loop_analysis: LoopAnalysisDef {
            compensator: Some(CompensatorDef::TypeII {
                gain: 1500.0,
                zero_hz: 2000.0,
                pole_hz: 50e3,
            }),
            ..LoopAnalysisDef::default()
        },
        design: DesignDef {
            target_mode: ModeDef::Bcm,
            max_ripple_percent: 25.0,
        },
    }
}

#[test]
fn roundtrip_yaml() {
    let path = std::env::temp_dir().join("bk_project_roundtrip.yaml");
    save_yaml(&path, &project()).unwrap();
    assert_eq!(load_yaml(&path).unwrap(), project());
}

#[test]
fn roundtrip_json() {
    let path = std::env::temp_dir().join("bk_project_roundtrip.json");
    save_json(&path, &project()).unwrap();
    assert_eq!(load_json(&path).unwrap(), project());
    // Extension dispatch picks the same loader.
    assert_eq!(load(&path).unwrap(), project());
}

#[test]
fn invalid_project_is_not_saved() {
    let mut bad = project();
    bad.circuit.inductance_h = 0.0;
    let path = std::env::temp_dir().join("bk_project_invalid.yaml");
    let err = save_yaml(&path, &bad).unwrap_err();
    assert!(matches!(err, ProjectError::Validation(_)));
}

#[test]
fn minimal_yaml_fills_defaults() {
    let yaml = "\
version: 1
name: minimal
circuit:
  input_voltage_v: 12.0
  duty_cycle: 0.5
  switching_frequency_hz: 100000.0
  inductance_h: 4.7e-5
  capacitance_f: 1.0e-4
  load_resistance_ohm: 5.0
";
    let p: Project = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(p.circuit.parasitics, ParasiticsDef::default());
    assert_eq!(p.simulation, SimulationDef::default());
    assert_eq!(p.loop_analysis, LoopAnalysisDef::default());
    assert_eq!(p.design, DesignDef::default());
    bk_project::validate_project(&p).unwrap();
}

#[test]
fn demo_projects_load() {
    let yaml = load(&demo("buck_90v_13v.yaml")).unwrap();
    assert_eq!(yaml.loop_analysis.target_crossover_hz, Some(10_000.0));
    assert_eq!(yaml.design.target_mode, ModeDef::Ccm);

    let json = load(&demo("buck_12v_type3.json")).unwrap();
    assert!(matches!(
        json.loop_analysis.compensator,
        Some(CompensatorDef::TypeIII { .. })
    ));
    assert_eq!(json.simulation, SimulationDef::default());
}
