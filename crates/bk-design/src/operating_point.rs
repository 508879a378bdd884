//! Steady-state operating point used by the design calculations.

use serde::{Deserialize, Serialize};

use bk_core::units::{Capacitance, Current, Frequency, Inductance, Voltage};
use bk_core::{CircuitParameters, si};

use crate::error::{DesignError, DesignResult};

/// Terminal conditions plus the magnetics being evaluated (SI units).
///
/// Passed by value into every calculation; sizing routines return a new
/// point via [`OperatingPoint::with_inductance`] instead of mutating one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OperatingPoint {
    pub input_voltage: f64,
    pub output_voltage: f64,
    pub output_current: f64,
    pub switching_frequency: f64,
    pub inductance: f64,
    /// Output capacitance; zero skips the ripple-voltage estimate.
    #[serde(default)]
    pub capacitance: f64,
}

impl OperatingPoint {
    pub fn new(
        input_voltage: Voltage,
        output_voltage: Voltage,
        output_current: Current,
        switching_frequency: Frequency,
        inductance: Inductance,
        capacitance: Capacitance,
    ) -> Self {
        Self {
            input_voltage: si::volts_of(input_voltage),
            output_voltage: si::volts_of(output_voltage),
            output_current: si::amps_of(output_current),
            switching_frequency: si::hz_of(switching_frequency),
            inductance: si::henries_of(inductance),
            capacitance: si::farads_of(capacitance),
        }
    }

    /// Lossless operating point of a circuit: `Vout = D Vin`, `Iout = Vout / R`.
    pub fn from_circuit(params: &CircuitParameters) -> Self {
        Self {
            input_voltage: params.input_voltage,
            output_voltage: params.ideal_output_voltage(),
            output_current: params.ideal_load_current(),
            switching_frequency: params.switching_frequency,
            inductance: params.inductance,
            capacitance: params.capacitance,
        }
    }

    pub fn with_inductance(self, inductance: f64) -> Self {
        Self { inductance, ..self }
    }

    pub fn with_output_current(self, output_current: f64) -> Self {
        Self {
            output_current,
            ..self
        }
    }

    /// CCM duty cycle `Vout / Vin`.
    pub fn duty_cycle(&self) -> f64 {
        self.output_voltage / self.input_voltage
    }

    /// Check the operating point is a realizable buck design.
    ///
    /// `Ok(())` is the pass flag; the error's message says what is wrong.
    pub fn validate(&self) -> DesignResult<()> {
        positive(self.input_voltage, "input voltage")?;
        positive(self.output_voltage, "output voltage")?;
        positive(self.switching_frequency, "switching frequency")?;
        positive(self.inductance, "inductance")?;
        non_negative(self.output_current, "output current")?;
        non_negative(self.capacitance, "capacitance")?;
        if self.output_voltage >= self.input_voltage {
            return Err(DesignError::NotStepDown {
                input_voltage: self.input_voltage,
                output_voltage: self.output_voltage,
            });
        }
        Ok(())
    }
}

fn positive(value: f64, what: &'static str) -> DesignResult<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(DesignError::NonPositive { what, value })
    }
}

fn non_negative(value: f64, what: &'static str) -> DesignResult<()> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(DesignError::Negative { what, value })
    }
}
