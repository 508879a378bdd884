//! Buck converter circuit parameters.

use serde::{Deserialize, Serialize};

use crate::error::{BkError, BkResult};
use crate::numeric::{ensure_non_negative, ensure_positive};
use crate::units::{Capacitance, Frequency, Inductance, Ratio, Resistance, Voltage, si};

/// Immutable snapshot of the converter's electrical parameters (SI units).
///
/// Every analysis takes one of these by reference; nothing downstream keeps it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircuitParameters {
    /// Input voltage (V)
    pub input_voltage: f64,
    /// Fraction of the switching period the switch conducts, in (0, 1)
    pub duty_cycle: f64,
    /// Switching frequency (Hz)
    pub switching_frequency: f64,
    /// Inductance (H)
    pub inductance: f64,
    /// Inductor series resistance (ohm)
    pub inductor_esr: f64,
    /// Output capacitance (F)
    pub capacitance: f64,
    /// Capacitor series resistance (ohm)
    pub capacitor_esr: f64,
    /// Load resistance (ohm)
    pub load_resistance: f64,
    /// Switch on-state resistance (ohm)
    pub switch_on_resistance: f64,
    /// Freewheeling diode forward drop (V)
    pub diode_forward_voltage: f64,
}

impl CircuitParameters {
    /// Lossless converter: every parasitic is zero.
    pub fn ideal(
        input_voltage: Voltage,
        duty_cycle: Ratio,
        switching_frequency: Frequency,
        inductance: Inductance,
        capacitance: Capacitance,
        load_resistance: Resistance,
    ) -> BkResult<Self> {
        let params = Self {
            input_voltage: si::volts_of(input_voltage),
            duty_cycle: si::ratio_of(duty_cycle),
            switching_frequency: si::hz_of(switching_frequency),
            inductance: si::henries_of(inductance),
            inductor_esr: 0.0,
            capacitance: si::farads_of(capacitance),
            capacitor_esr: 0.0,
            load_resistance: si::ohms_of(load_resistance),
            switch_on_resistance: 0.0,
            diode_forward_voltage: 0.0,
        };
        params.validate()?;
        Ok(params)
    }

    /// Attach parasitic elements.
    pub fn with_parasitics(
        mut self,
        inductor_esr: Resistance,
        capacitor_esr: Resistance,
        switch_on_resistance: Resistance,
        diode_forward_voltage: Voltage,
    ) -> BkResult<Self> {
        self.inductor_esr = si::ohms_of(inductor_esr);
        self.capacitor_esr = si::ohms_of(capacitor_esr);
        self.switch_on_resistance = si::ohms_of(switch_on_resistance);
        self.diode_forward_voltage = si::volts_of(diode_forward_voltage);
        self.validate()?;
        Ok(self)
    }

    /// Check the parameter invariants.
    ///
    /// Primary elements must be strictly positive; parasitics may be zero.
    pub fn validate(&self) -> BkResult<()> {
        ensure_positive(self.input_voltage, "input_voltage")?;
        ensure_positive(self.switching_frequency, "switching_frequency")?;
        ensure_positive(self.inductance, "inductance")?;
        ensure_positive(self.capacitance, "capacitance")?;
        ensure_positive(self.load_resistance, "load_resistance")?;
        ensure_non_negative(self.inductor_esr, "inductor_esr")?;
        ensure_non_negative(self.capacitor_esr, "capacitor_esr")?;
        ensure_non_negative(self.switch_on_resistance, "switch_on_resistance")?;
        ensure_non_negative(self.diode_forward_voltage, "diode_forward_voltage")?;
        if !(self.duty_cycle > 0.0 && self.duty_cycle < 1.0) {
            return Err(BkError::OutOfRange {
                what: "duty_cycle",
                value: self.duty_cycle,
            });
        }
        Ok(())
    }

    /// Switching period (s).
    pub fn switching_period(&self) -> f64 {
        1.0 / self.switching_frequency
    }

    /// Lossless CCM output voltage, `D * Vin`.
    pub fn ideal_output_voltage(&self) -> f64 {
        self.duty_cycle * self.input_voltage
    }

    /// Load current at the lossless output voltage.
    pub fn ideal_load_current(&self) -> f64 {
        self.ideal_output_voltage() / self.load_resistance
    }

    /// LC natural frequency (rad/s).
    pub fn natural_frequency(&self) -> f64 {
        1.0 / (self.inductance * self.capacitance).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{farads, henries, hz, ohms, unitless, volts};

    fn nominal() -> CircuitParameters {
        CircuitParameters::ideal(
            volts(12.0),
            unitless(0.5),
            hz(100e3),
            henries(47e-6),
            farads(100e-6),
            ohms(5.0),
        )
        .unwrap()
    }

    #[test]
    fn ideal_has_no_parasitics() {
        let p = nominal();
        assert_eq!(p.inductor_esr, 0.0);
        assert_eq!(p.diode_forward_voltage, 0.0);
        assert_eq!(p.ideal_output_voltage(), 6.0);
        assert!((p.ideal_load_current() - 1.2).abs() < 1e-12);
        assert!((p.switching_period() - 1e-5).abs() < 1e-18);
    }

    #[test]
    fn duty_cycle_must_be_open_interval() {
        let mut p = nominal();
        p.duty_cycle = 1.0;
        assert!(p.validate().is_err());
        p.duty_cycle = 0.0;
        assert!(p.validate().is_err());
    }

    #[test]
    fn parasitics_reject_negative_values() {
        let err = nominal()
            .with_parasitics(ohms(-0.1), ohms(0.0), ohms(0.0), volts(0.0))
            .unwrap_err();
        assert!(format!("{err}").contains("inductor_esr"));
    }

    #[test]
    fn primary_elements_must_be_positive() {
        let mut p = nominal();
        p.inductance = 0.0;
        assert!(p.validate().is_err());
    }
}
