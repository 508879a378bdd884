//! Error-amplifier compensation networks (Type I/II/III).

use std::f64::consts::PI;
use std::fmt;

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::error::{ControlError, ControlResult};
use crate::polynomial;
use crate::transfer_function::TransferFunction;

/// Compensator family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompensatorType {
    TypeI,
    TypeII,
    TypeIII,
}

impl fmt::Display for CompensatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TypeI => write!(f, "Type I"),
            Self::TypeII => write!(f, "Type II"),
            Self::TypeIII => write!(f, "Type III"),
        }
    }
}

/// Compensation network. All corner frequencies are in Hz.
///
/// - Type I: `K / s`
/// - Type II: `K (1 + s/wz) / (s (1 + s/wp))`
/// - Type III: `K (1 + s/wz1)(1 + s/wz2) / (s (1 + s/wp1)(1 + s/wp2))`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CompensationNetwork {
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

fn check_corner(v: f64, what: &'static str) -> ControlResult<()> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(ControlError::InvalidArg { what })
    }
}

/// `1 + s / (2 pi f)`
fn corner(s: Complex64, hz: f64) -> Complex64 {
    s / (2.0 * PI * hz) + 1.0
}

impl CompensationNetwork {
    pub fn kind(&self) -> CompensatorType {
        match self {
            Self::TypeI { .. } => CompensatorType::TypeI,
            Self::TypeII { .. } => CompensatorType::TypeII,
            Self::TypeIII { .. } => CompensatorType::TypeIII,
        }
    }

    pub fn gain(&self) -> f64 {
        match *self {
            Self::TypeI { gain } | Self::TypeII { gain, .. } | Self::TypeIII { gain, .. } => gain,
        }
    }

    /// Check the gain is finite and every corner frequency is positive.
    pub fn validate(&self) -> ControlResult<()> {
        if !self.gain().is_finite() {
            return Err(ControlError::InvalidArg {
                what: "compensator gain must be finite",
            });
        }
        match *self {
            Self::TypeI { .. } => Ok(()),
            Self::TypeII {
                zero_hz, pole_hz, ..
            } => {
                check_corner(zero_hz, "compensator zero must be positive")?;
                check_corner(pole_hz, "compensator pole must be positive")
            }
            Self::TypeIII {
                zero_hz,
                pole_hz,
                zero2_hz,
                pole2_hz,
                ..
            } => {
                check_corner(zero_hz, "compensator zero must be positive")?;
                check_corner(pole_hz, "compensator pole must be positive")?;
                check_corner(zero2_hz, "compensator second zero must be positive")?;
                check_corner(pole2_hz, "compensator second pole must be positive")
            }
        }
    }

    /// Closed-form response at complex frequency `s`.
    pub fn response(&self, s: Complex64) -> Complex64 {
        match *self {
            Self::TypeI { gain } => gain / s,
            Self::TypeII {
                gain,
                zero_hz,
                pole_hz,
            } => gain * corner(s, zero_hz) / (s * corner(s, pole_hz)),
            Self::TypeIII {
                gain,
                zero_hz,
                pole_hz,
                zero2_hz,
                pole2_hz,
            } => {
                gain * corner(s, zero_hz) * corner(s, zero2_hz)
                    / (s * corner(s, pole_hz) * corner(s, pole2_hz))
            }
        }
    }

    /// Response at `s = j 2 pi f`.
    pub fn response_at_frequency(&self, frequency_hz: f64) -> Complex64 {
        self.response(Complex64::new(0.0, 2.0 * PI * frequency_hz))
    }

    /// Rational-function form, for composition with other transfer functions.
    pub fn to_transfer_function(&self) -> ControlResult<TransferFunction> {
        self.validate()?;
        let lead = |hz: f64| vec![1.0 / (2.0 * PI * hz), 1.0];
        let integrator = vec![1.0, 0.0];
        match *self {
            Self::TypeI { gain } => TransferFunction::new(vec![gain], integrator),
            Self::TypeII {
                gain,
                zero_hz,
                pole_hz,
            } => TransferFunction::new(
                lead(zero_hz).iter().map(|c| gain * c).collect(),
                polynomial::multiply(&integrator, &lead(pole_hz)),
            ),
            Self::TypeIII {
                gain,
                zero_hz,
                pole_hz,
                zero2_hz,
                pole2_hz,
            } => {
                let num = polynomial::multiply(&lead(zero_hz), &lead(zero2_hz));
                let den = polynomial::multiply(
                    &integrator,
                    &polynomial::multiply(&lead(pole_hz), &lead(pole2_hz)),
                );
                TransferFunction::new(num.iter().map(|c| gain * c).collect(), den)
            }
        }
    }
}

impl fmt::Display for CompensationNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::TypeI { gain } => write!(f, "Type I: K={gain:.4e}"),
            Self::TypeII {
                gain,
                zero_hz,
                pole_hz,
            } => write!(
                f,
                "Type II: K={gain:.4e}, fz={zero_hz:.3} Hz, fp={pole_hz:.3} Hz"
            ),
            Self::TypeIII {
                gain,
                zero_hz,
                pole_hz,
                zero2_hz,
                pole2_hz,
            } => write!(
                f,
                "Type III: K={gain:.4e}, fz1={zero_hz:.3} Hz, fp1={pole_hz:.3} Hz, fz2={zero2_hz:.3} Hz, fp2={pole2_hz:.3} Hz"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn type_one_is_pure_integrator() {
        let c = CompensationNetwork::TypeI { gain: 10.0 };
        let v = c.response_at_frequency(1.0 / (2.0 * PI));
        // 10 / j = -10j
        assert_relative_eq!(v.im, -10.0, max_relative = 1e-12);
        assert!(v.re.abs() < 1e-12);
        assert_eq!(c.kind(), CompensatorType::TypeI);
    }

    #[test]
    fn closed_form_matches_rational_form() {
        let networks = [
            CompensationNetwork::TypeI { gain: 3.0 },
            CompensationNetwork::TypeII {
                gain: 2.5e3,
                zero_hz: 2.3e3,
                pole_hz: 100e3,
            },
            CompensationNetwork::TypeIII {
                gain: 1.0e4,
                zero_hz: 1.0e3,
                pole_hz: 50e3,
                zero2_hz: 2.0e3,
                pole2_hz: 80e3,
            },
        ];
        for net in networks {
            let tf = net.to_transfer_function().unwrap();
            for f in [10.0, 1.0e3, 37.0e3, 1.0e6] {
                let a = net.response_at_frequency(f);
                let b = tf.evaluate_at_frequency(f);
                assert_relative_eq!(a.re, b.re, max_relative = 1e-9, epsilon = 1e-12);
                assert_relative_eq!(a.im, b.im, max_relative = 1e-9, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn invalid_corners_rejected() {
        let c = CompensationNetwork::TypeII {
            gain: 1.0,
            zero_hz: 0.0,
            pole_hz: 1.0e3,
        };
        assert!(c.validate().is_err());
        assert!(c.to_transfer_function().is_err());
    }

    #[test]
    fn display_names() {
        let c = CompensationNetwork::TypeII {
            gain: 1.0,
            zero_hz: 10.0,
            pole_hz: 100.0,
        };
        assert_eq!(c.kind().to_string(), "Type II");
        assert!(c.to_string().starts_with("Type II"));
    }
}
