//! Project schema definitions.
//!
//! Field names carry their SI unit so files stay readable by hand.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub version: u32,
    pub name: String,
    pub circuit: CircuitDef,
    #[serde(default)]
    pub simulation: SimulationDef,
    #[serde(default)]
    pub loop_analysis: LoopAnalysisDef,
    #[serde(default)]
    pub design: DesignDef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CircuitDef {
    pub input_voltage_v: f64,
    pub duty_cycle: f64,
    pub switching_frequency_hz: f64,
    pub inductance_h: f64,
    pub capacitance_f: f64,
    pub load_resistance_ohm: f64,
    #[serde(default)]
    pub parasitics: ParasiticsDef,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ParasiticsDef {
    pub inductor_esr_ohm: f64,
    pub capacitor_esr_ohm: f64,
    pub switch_on_resistance_ohm: f64,
    pub diode_forward_voltage_v: f64,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum IntegratorDef {
    Euler,
    Rk2,
    #[default]
    Rk4,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimulationDef {
    pub total_time_s: f64,
    pub pre_roll_time_s: f64,
    pub samples_per_cycle: usize,
    pub include_parasitics: bool,
    pub integrator: IntegratorDef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_steps: Option<usize>,
}

impl Default for SimulationDef {
    fn default() -> Self {
        Self {
            total_time_s: 1e-3,
            pre_roll_time_s: 5e-3,
            samples_per_cycle: 100,
            include_parasitics: false,
            integrator: IntegratorDef::default(),
            max_steps: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum CompensatorDef {
    TypeI {
        gain: f64,
    },
    TypeII {
        gain: f64,
        zero_hz: f64,
        pole_hz: f64,
    },
    TypeIII {
        gain: f64,
        zero_hz: f64,
        pole_hz: f64,
        zero2_hz: f64,
        pole2_hz: f64,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoopAnalysisDef {
    pub start_hz: f64,
    pub end_hz: f64,
    pub points: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compensator: Option<CompensatorDef>,
    /// Crossover for automatic Type II design; none keeps `compensator` as given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_crossover_hz: Option<f64>,
    pub target_phase_margin_deg: f64,
}

impl Default for LoopAnalysisDef {
    fn default() -> Self {
        Self {
            start_hz: 1.0,
            end_hz: 1e6,
            points: 300,
            compensator: None,
            target_crossover_hz: None,
            target_phase_margin_deg: 45.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum ModeDef {
    #[default]
    Ccm,
    Dcm,
    Bcm,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DesignDef {
    pub target_mode: ModeDef,
    pub max_ripple_percent: f64,
}

impl Default for DesignDef {
    fn default() -> Self {
        Self {
            target_mode: ModeDef::default(),
            max_ripple_percent: 30.0,
        }
    }
}
