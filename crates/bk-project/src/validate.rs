//! Project validation logic.

use crate::LATEST_VERSION;
use crate::schema::{CircuitDef, CompensatorDef, DesignDef, LoopAnalysisDef, Project, SimulationDef};

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

fn invalid(field: &str, value: impl ToString, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn positive(field: &str, value: f64) -> Result<(), ValidationError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, value, "must be positive"))
    }
}

fn non_negative(field: &str, value: f64) -> Result<(), ValidationError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, value, "must not be negative"))
    }
}

pub fn validate_project(project: &Project) -> Result<(), ValidationError> {
    if project.version == 0 || project.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: project.version,
        });
    }
    validate_circuit(&project.circuit)?;
    validate_simulation(&project.simulation)?;
    validate_loop_analysis(&project.loop_analysis)?;
    validate_design(&project.design)?;
    Ok(())
}

fn validate_circuit(c: &CircuitDef) -> Result<(), ValidationError> {
    positive("circuit.input_voltage_v", c.input_voltage_v)?;
    positive("circuit.switching_frequency_hz", c.switching_frequency_hz)?;
    positive("circuit.inductance_h", c.inductance_h)?;
    positive("circuit.capacitance_f", c.capacitance_f)?;
    positive("circuit.load_resistance_ohm", c.load_resistance_ohm)?;
    if !(c.duty_cycle > 0.0 && c.duty_cycle < 1.0) {
        return Err(invalid(
            "circuit.duty_cycle",
            c.duty_cycle,
            "must be strictly between 0 and 1",
        ));
    }

    let p = &c.parasitics;
    non_negative("circuit.parasitics.inductor_esr_ohm", p.inductor_esr_ohm)?;
    non_negative("circuit.parasitics.capacitor_esr_ohm", p.capacitor_esr_ohm)?;
    non_negative(
        "circuit.parasitics.switch_on_resistance_ohm",
        p.switch_on_resistance_ohm,
    )?;
    non_negative(
        "circuit.parasitics.diode_forward_voltage_v",
        p.diode_forward_voltage_v,
    )?;
    Ok(())
}

fn validate_simulation(s: &SimulationDef) -> Result<(), ValidationError> {
    positive("simulation.total_time_s", s.total_time_s)?;
    non_negative("simulation.pre_roll_time_s", s.pre_roll_time_s)?;
    if s.samples_per_cycle < 2 {
        return Err(invalid(
            "simulation.samples_per_cycle",
            s.samples_per_cycle,
            "must be at least 2",
        ));
    }
    if s.max_steps == Some(0) {
        return Err(invalid("simulation.max_steps", 0, "must be positive"));
    }
    Ok(())
}

fn validate_loop_analysis(l: &LoopAnalysisDef) -> Result<(), ValidationError> {
    positive("loop_analysis.start_hz", l.start_hz)?;
    positive("loop_analysis.end_hz", l.end_hz)?;
    if l.end_hz <= l.start_hz {
        return Err(invalid(
            "loop_analysis.end_hz",
            l.end_hz,
            "must be above start_hz",
        ));
    }
    if l.points < 2 {
        return Err(invalid("loop_analysis.points", l.points, "must be at least 2"));
    }
    if let Some(fc) = l.target_crossover_hz {
        positive("loop_analysis.target_crossover_hz", fc)?;
    }
    if !l.target_phase_margin_deg.is_finite() {
        return Err(invalid(
            "loop_analysis.target_phase_margin_deg",
            l.target_phase_margin_deg,
            "must be finite",
        ));
    }
    if let Some(comp) = &l.compensator {
        validate_compensator(comp)?;
    }
    Ok(())
}

fn validate_compensator(comp: &CompensatorDef) -> Result<(), ValidationError> {
    match comp {
        CompensatorDef::TypeI { gain } => positive("compensator.gain", *gain),
        CompensatorDef::TypeII {
            gain,
            zero_hz,
            pole_hz,
        } => {
            positive("compensator.gain", *gain)?;
            positive("compensator.zero_hz", *zero_hz)?;
            positive("compensator.pole_hz", *pole_hz)
        }
        CompensatorDef::TypeIII {
            gain,
            zero_hz,
            pole_hz,
            zero2_hz,
            pole2_hz,
        } => {
            positive("compensator.gain", *gain)?;
            positive("compensator.zero_hz", *zero_hz)?;
            positive("compensator.pole_hz", *pole_hz)?;
            positive("compensator.zero2_hz", *zero2_hz)?;
            positive("compensator.pole2_hz", *pole2_hz)
        }
    }
}

fn validate_design(d: &DesignDef) -> Result<(), ValidationError> {
    positive("design.max_ripple_percent", d.max_ripple_percent)
}
