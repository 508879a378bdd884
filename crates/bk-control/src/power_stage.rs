//! Small-signal control-to-output model of the buck power stage.

use std::f64::consts::PI;

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use bk_core::{BkResult, CircuitParameters, ensure_non_negative, ensure_positive};

use crate::error::ControlResult;
use crate::transfer_function::TransferFunction;

/// Duty-to-output transfer function parameters.
///
/// `Gvd(s) = Vin / (L C s^2 + (L/R + ESR C) s + (1 + ESR/R))`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerStage {
    pub input_voltage: f64,
    pub inductance: f64,
    pub capacitance: f64,
    pub capacitor_esr: f64,
    pub load_resistance: f64,
}

impl PowerStage {
    pub fn new(
        input_voltage: f64,
        inductance: f64,
        capacitance: f64,
        capacitor_esr: f64,
        load_resistance: f64,
    ) -> BkResult<Self> {
        ensure_positive(input_voltage, "input_voltage")?;
        ensure_positive(inductance, "inductance")?;
        ensure_positive(capacitance, "capacitance")?;
        ensure_non_negative(capacitor_esr, "capacitor_esr")?;
        ensure_positive(load_resistance, "load_resistance")?;
        Ok(Self {
            input_voltage,
            inductance,
            capacitance,
            capacitor_esr,
            load_resistance,
        })
    }

    /// Denominator coefficients `[LC, L/R + ESR C, 1 + ESR/R]`.
    fn denominator(&self) -> [f64; 3] {
        let (l, c, esr, r) = (
            self.inductance,
            self.capacitance,
            self.capacitor_esr,
            self.load_resistance,
        );
        [l * c, l / r + esr * c, 1.0 + esr / r]
    }

    /// Closed-form response at complex frequency `s`.
    pub fn response(&self, s: Complex64) -> Complex64 {
        let [a, b, c] = self.denominator();
        self.input_voltage / (a * s * s + b * s + c)
    }

    /// Response at `s = j 2 pi f`.
    pub fn response_at_frequency(&self, frequency_hz: f64) -> Complex64 {
        self.response(Complex64::new(0.0, 2.0 * PI * frequency_hz))
    }

    /// LC resonance in rad/s.
    pub fn natural_frequency(&self) -> f64 {
        1.0 / (self.inductance * self.capacitance).sqrt()
    }

    /// Rational-function form.
    pub fn to_transfer_function(&self) -> ControlResult<TransferFunction> {
        TransferFunction::new(vec![self.input_voltage], self.denominator().to_vec())
    }
}

impl From<&CircuitParameters> for PowerStage {
    fn from(p: &CircuitParameters) -> Self {
        Self {
            input_voltage: p.input_voltage,
            inductance: p.inductance,
            capacitance: p.capacitance,
            capacitor_esr: p.capacitor_esr,
            load_resistance: p.load_resistance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn stage() -> PowerStage {
        PowerStage::new(90.0, 47e-6, 10e-6, 5e-3, 2.6).unwrap()
    }

    #[test]
    fn dc_response_is_attenuated_input() {
        let g = stage().response_at_frequency(0.0);
        assert_relative_eq!(g.re, 90.0 / (1.0 + 5e-3 / 2.6), max_relative = 1e-12);
        assert!(g.im.abs() < 1e-12);
    }

    #[test]
    fn closed_form_matches_rational_form() {
        let st = stage();
        let tf = st.to_transfer_function().unwrap();
        for f in [1.0, 7.3e3, 1.0e6] {
            let a = st.response_at_frequency(f);
            let b = tf.evaluate_at_frequency(f);
            assert_relative_eq!(a.norm(), b.norm(), max_relative = 1e-9);
        }
        // Lightly damped LC: complex pole pair in the left half-plane.
        let poles = tf.poles();
        assert_eq!(poles.len(), 2);
        assert!(poles.iter().all(|p| p.re < 0.0 && p.im != 0.0));
    }

    #[test]
    fn resonance_matches_lc() {
        assert_relative_eq!(
            stage().natural_frequency(),
            1.0 / (47e-6_f64 * 10e-6).sqrt(),
            max_relative = 1e-12
        );
    }

    #[test]
    fn rejects_non_physical_values() {
        assert!(PowerStage::new(90.0, 0.0, 10e-6, 0.0, 2.6).is_err());
        assert!(PowerStage::new(90.0, 47e-6, 10e-6, -1.0, 2.6).is_err());
    }
}
