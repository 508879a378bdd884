//! Compilation of project definitions into engine parameter types.

use bk_control::{CompensationNetwork, PowerStage};
use bk_core::{CircuitParameters, farads, henries, hz, ohms, unitless, volts};
use bk_design::{OperatingMode, OperatingPoint};
use bk_project::schema::{CircuitDef, CompensatorDef, IntegratorDef, ModeDef, SimulationDef};
use bk_sim::{IntegratorType, SimulationSettings};

use crate::error::AppResult;

/// Build validated circuit parameters, parasitics included.
pub fn circuit_parameters(def: &CircuitDef) -> AppResult<CircuitParameters> {
    let p = &def.parasitics;
    let params = CircuitParameters::ideal(
        volts(def.input_voltage_v),
        unitless(def.duty_cycle),
        hz(def.switching_frequency_hz),
        henries(def.inductance_h),
        farads(def.capacitance_f),
        ohms(def.load_resistance_ohm),
    )?
    .with_parasitics(
        ohms(p.inductor_esr_ohm),
        ohms(p.capacitor_esr_ohm),
        ohms(p.switch_on_resistance_ohm),
        volts(p.diode_forward_voltage_v),
    )?;
    Ok(params)
}

pub fn integrator(def: IntegratorDef) -> IntegratorType {
    match def {
        IntegratorDef::Euler => IntegratorType::Euler,
        IntegratorDef::Rk2 => IntegratorType::Rk2,
        IntegratorDef::Rk4 => IntegratorType::Rk4,
    }
}

pub fn simulation_settings(def: &SimulationDef) -> AppResult<SimulationSettings> {
    let defaults = SimulationSettings::default();
    let settings = SimulationSettings {
        total_time: def.total_time_s,
        pre_roll_time: def.pre_roll_time_s,
        samples_per_cycle: def.samples_per_cycle,
        include_parasitics: def.include_parasitics,
        integrator: integrator(def.integrator),
        max_steps: def.max_steps.unwrap_or(defaults.max_steps),
    };
    settings.validate()?;
    Ok(settings)
}

pub fn compensator(def: &CompensatorDef) -> AppResult<CompensationNetwork> {
    let network = match *def {
        CompensatorDef::TypeI { gain } => CompensationNetwork::TypeI { gain },
        CompensatorDef::TypeII {
            gain,
            zero_hz,
            pole_hz,
        } => CompensationNetwork::TypeII {
            gain,
            zero_hz,
            pole_hz,
        },
        CompensatorDef::TypeIII {
            gain,
            zero_hz,
            pole_hz,
            zero2_hz,
            pole2_hz,
        } => CompensationNetwork::TypeIII {
            gain,
            zero_hz,
            pole_hz,
            zero2_hz,
            pole2_hz,
        },
    };
    network.validate()?;
    Ok(network)
}

/// Definition form of a compensator, for writing designs back into a project.
pub fn compensator_def(network: &CompensationNetwork) -> CompensatorDef {
    match *network {
        CompensationNetwork::TypeI { gain } => CompensatorDef::TypeI { gain },
        CompensationNetwork::TypeII {
            gain,
            zero_hz,
            pole_hz,
        } => CompensatorDef::TypeII {
            gain,
            zero_hz,
            pole_hz,
        },
        CompensationNetwork::TypeIII {
            gain,
            zero_hz,
            pole_hz,
            zero2_hz,
            pole2_hz,
        } => CompensatorDef::TypeIII {
            gain,
            zero_hz,
            pole_hz,
            zero2_hz,
            pole2_hz,
        },
    }
}

pub fn power_stage(params: &CircuitParameters) -> PowerStage {
    PowerStage::from(params)
}

pub fn operating_point(params: &CircuitParameters) -> OperatingPoint {
    OperatingPoint::from_circuit(params)
}

pub fn operating_mode(def: ModeDef) -> OperatingMode {
    match def {
        ModeDef::Ccm => OperatingMode::Ccm,
        ModeDef::Dcm => OperatingMode::Dcm,
        ModeDef::Bcm => OperatingMode::Bcm,
    }
}
