//! Rational transfer functions `H(s) = N(s) / D(s)` in the Laplace variable.
//!
//! Coefficients are stored highest degree first. Composition keeps the full
//! (unreduced) products, so common factors are never cancelled.

use std::f64::consts::PI;
use std::fmt;

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::error::{ControlError, ControlResult};
use crate::polynomial;

/// Denominator magnitude below which a response is reported as zero.
pub const DENOMINATOR_EPS: f64 = 1e-10;

/// Rational function of `s`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Coefficients")]
pub struct TransferFunction {
    numerator: Vec<f64>,
    denominator: Vec<f64>,
}

/// Unchecked wire form; deserialization goes through [`TransferFunction::new`].
#[derive(Deserialize)]
struct Coefficients {
    numerator: Vec<f64>,
    denominator: Vec<f64>,
}

impl TryFrom<Coefficients> for TransferFunction {
    type Error = ControlError;

    fn try_from(c: Coefficients) -> ControlResult<Self> {
        Self::new(c.numerator, c.denominator)
    }
}

impl TransferFunction {
    /// Build from coefficient sequences (highest degree first).
    ///
    /// The denominator must contain at least one nonzero coefficient.
    pub fn new(numerator: Vec<f64>, denominator: Vec<f64>) -> ControlResult<Self> {
        if polynomial::is_zero(&denominator) {
            return Err(ControlError::DegenerateDenominator {
                what: format!("denominator {denominator:?} is identically zero"),
            });
        }
        if numerator.is_empty() {
            return Err(ControlError::InvalidArg {
                what: "numerator must have at least one coefficient",
            });
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }

    /// Pure gain `H(s) = k`.
    pub fn gain(k: f64) -> Self {
        Self {
            numerator: vec![k],
            denominator: vec![1.0],
        }
    }

    pub fn numerator(&self) -> &[f64] {
        &self.numerator
    }

    pub fn denominator(&self) -> &[f64] {
        &self.denominator
    }

    /// Degree of the denominator.
    pub fn order(&self) -> usize {
        polynomial::degree(&self.denominator)
    }

    /// `H(s)`; returns zero when `|D(s)|` is below [`DENOMINATOR_EPS`].
    pub fn evaluate(&self, s: Complex64) -> Complex64 {
        let den = polynomial::eval(&self.denominator, s);
        if den.norm() < DENOMINATOR_EPS {
            return Complex64::new(0.0, 0.0);
        }
        polynomial::eval(&self.numerator, s) / den
    }

    /// `H(j 2 pi f)`.
    pub fn evaluate_at_frequency(&self, frequency_hz: f64) -> Complex64 {
        self.evaluate(Complex64::new(0.0, 2.0 * PI * frequency_hz))
    }

    /// `20 log10 |H(j 2 pi f)|`.
    pub fn magnitude_db(&self, frequency_hz: f64) -> f64 {
        20.0 * self.evaluate_at_frequency(frequency_hz).norm().log10()
    }

    /// Principal-value phase of `H(j 2 pi f)` in degrees.
    pub fn phase_deg(&self, frequency_hz: f64) -> f64 {
        self.evaluate_at_frequency(frequency_hz).arg().to_degrees()
    }

    /// Ratio of the constant terms; infinite when the denominator has a pole at the origin.
    pub fn dc_gain(&self) -> f64 {
        let n0 = self.numerator.last().copied().unwrap_or(0.0);
        let d0 = self.denominator.last().copied().unwrap_or(0.0);
        if d0 == 0.0 {
            return f64::INFINITY;
        }
        n0 / d0
    }

    /// Denominator roots (closed form, degree <= 2 only).
    pub fn poles(&self) -> Vec<Complex64> {
        polynomial::roots(&self.denominator)
    }

    /// Numerator roots (closed form, degree <= 2 only).
    pub fn zeros(&self) -> Vec<Complex64> {
        polynomial::roots(&self.numerator)
    }

    /// All computable poles lie in the open left half-plane.
    ///
    /// Above second order no poles are computed and the check passes vacuously.
    pub fn is_stable(&self) -> bool {
        self.poles().iter().all(|p| p.re < 0.0)
    }

    /// Cascade: `self * other`.
    pub fn series(&self, other: &Self) -> Self {
        Self {
            numerator: polynomial::multiply(&self.numerator, &other.numerator),
            denominator: polynomial::multiply(&self.denominator, &other.denominator),
        }
    }

    /// Sum: `self + other`.
    pub fn parallel(&self, other: &Self) -> Self {
        Self {
            numerator: polynomial::add(
                &polynomial::multiply(&self.numerator, &other.denominator),
                &polynomial::multiply(&other.numerator, &self.denominator),
            ),
            denominator: polynomial::multiply(&self.denominator, &other.denominator),
        }
    }

    /// Closed loop `G / (1 + G H)` with `self` as the forward path `G`.
    ///
    /// Computed as `G` in series with `D_GH / (N_GH + D_GH)`, giving
    /// `N_G D_G D_H / (D_G (N_G N_H + D_G D_H))`.
    pub fn feedback(&self, h: &Self) -> Self {
        let loop_gain = self.series(h);
        let closing = polynomial::add(&loop_gain.numerator, &loop_gain.denominator);
        Self {
            numerator: polynomial::multiply(&self.numerator, &loop_gain.denominator),
            denominator: polynomial::multiply(&self.denominator, &closing),
        }
    }
}

fn fmt_poly(f: &mut fmt::Formatter<'_>, coeffs: &[f64]) -> fmt::Result {
    let n = coeffs.len();
    let mut first = true;
    for (i, &c) in coeffs.iter().enumerate() {
        let power = n - 1 - i;
        if c == 0.0 && n > 1 {
            continue;
        }
        if !first {
            write!(f, " + ")?;
        }
        first = false;
        match power {
            0 => write!(f, "{c}")?,
            1 => write!(f, "{c}s")?,
            _ => write!(f, "{c}s^{power}")?,
        }
    }
    if first {
        write!(f, "0")?;
    }
    Ok(())
}

impl fmt::Display for TransferFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        fmt_poly(f, &self.numerator)?;
        write!(f, ") / (")?;
        fmt_poly(f, &self.denominator)?;
        write!(f, ")")
    }
}
