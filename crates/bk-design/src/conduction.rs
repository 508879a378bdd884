//! Conduction-mode classification and inductor-current figures.
//!
//! All results are closed-form steady-state estimates for an ideal buck:
//!
//! - boundary current `Icrit = Vout (Vin - Vout) / (2 L fs Vin)`
//! - CCM: ripple `dI = (Vin - Vout) D / (L fs)`, current never reaches zero
//! - DCM: the period splits into on time `D1`, freewheel `D2` and dead time `D3`

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::DesignResult;
use crate::operating_point::OperatingPoint;

/// Load currents within this distance of the boundary count as BCM (A).
pub const BOUNDARY_TOLERANCE_A: f64 = 1e-3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OperatingMode {
    /// Continuous conduction
    Ccm,
    /// Discontinuous conduction
    Dcm,
    /// Boundary (critical) conduction
    Bcm,
}

impl OperatingMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ccm => "CCM",
            Self::Dcm => "DCM",
            Self::Bcm => "BCM",
        }
    }
}

impl fmt::Display for OperatingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Duty splits and inductor-current figures for one operating point.
///
/// `d1 + d2 + d3 == 1`; `d3 == 0` whenever the CCM formulas were used.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DcmParameters {
    /// Switch on-time fraction
    pub d1: f64,
    /// Diode conduction fraction
    pub d2: f64,
    /// Zero-current fraction
    pub d3: f64,
    pub peak_current: f64,
    pub average_current: f64,
    pub rms_current: f64,
    /// Output voltage ripple estimate (V), zero without capacitance
    pub output_ripple: f64,
    pub mode: OperatingMode,
}

impl DcmParameters {
    /// Peak-to-peak inductor current ripple.
    pub fn current_ripple(&self, point: &OperatingPoint) -> f64 {
        if self.d3 > 0.0 {
            self.peak_current
        } else {
            ccm_ripple(point)
        }
    }
}

/// Load current at the CCM/DCM boundary. Zero when `L`, `fs` or `Vin` is zero.
pub fn boundary_current(point: &OperatingPoint) -> f64 {
    let OperatingPoint {
        input_voltage: vin,
        output_voltage: vout,
        switching_frequency: fs,
        inductance: l,
        ..
    } = *point;
    if l == 0.0 || fs == 0.0 || vin == 0.0 {
        return 0.0;
    }
    vout * (vin - vout) / (2.0 * l * fs * vin)
}

/// BCM within [`BOUNDARY_TOLERANCE_A`] of the boundary, DCM below it, CCM above.
pub fn classify(point: &OperatingPoint) -> OperatingMode {
    let icrit = boundary_current(point);
    let mode = if (point.output_current - icrit).abs() < BOUNDARY_TOLERANCE_A {
        OperatingMode::Bcm
    } else if point.output_current < icrit {
        OperatingMode::Dcm
    } else {
        OperatingMode::Ccm
    };
    debug!(icrit, iout = point.output_current, %mode, "conduction mode classified");
    mode
}

fn ccm_ripple(point: &OperatingPoint) -> f64 {
    let vin = point.input_voltage;
    let vout = point.output_voltage;
    (vin - vout) * point.duty_cycle() / (point.inductance * point.switching_frequency)
}

fn ripple_voltage(point: &OperatingPoint, charge_current: f64) -> f64 {
    if point.capacitance > 0.0 {
        charge_current / (8.0 * point.capacitance * point.switching_frequency)
    } else {
        0.0
    }
}

/// Continuous-conduction figures. The mode field is still the classified mode.
pub fn ccm_parameters(point: &OperatingPoint) -> DesignResult<DcmParameters> {
    point.validate()?;
    Ok(ccm_unchecked(point, classify(point)))
}

fn ccm_unchecked(point: &OperatingPoint, mode: OperatingMode) -> DcmParameters {
    let d = point.duty_cycle();
    let iout = point.output_current;
    let ripple = ccm_ripple(point);
    DcmParameters {
        d1: d,
        d2: 1.0 - d,
        d3: 0.0,
        peak_current: iout + ripple / 2.0,
        average_current: iout,
        rms_current: (iout * iout + ripple * ripple / 12.0).sqrt(),
        output_ripple: ripple_voltage(point, ripple),
        mode,
    }
}

/// Duty splits and currents, assuming discontinuous conduction first.
///
/// The on-time is `D1 = (Vout/Vin) sqrt(Iout/Icrit)`, which equals the CCM
/// duty cycle at the boundary and shrinks with lighter load. When the implied
/// dead time `D3` comes out negative the load is too heavy for DCM and the
/// CCM formulas are returned instead.
///
/// RMS current is the exact value for a 0 to peak to 0 triangle occupying
/// `D1 + D2` of the period, `Ipk sqrt((D1 + D2) / 3)`.
pub fn dcm_parameters(point: &OperatingPoint) -> DesignResult<DcmParameters> {
    point.validate()?;
    let mode = classify(point);

    let vin = point.input_voltage;
    let vout = point.output_voltage;
    let iout = point.output_current;
    let icrit = boundary_current(point);

    let d1 = (vout / vin) * (iout / icrit).sqrt();
    let d2 = d1 * (vin - vout) / vout;
    let d3 = 1.0 - d1 - d2;
    if d3 < 0.0 {
        debug!(d3, "dead time negative, using continuous-conduction formulas");
        return Ok(ccm_unchecked(point, mode));
    }

    let conducting = d1 + d2;
    let peak = if conducting > 0.0 {
        2.0 * iout / conducting
    } else {
        0.0
    };

    Ok(DcmParameters {
        d1,
        d2,
        d3,
        peak_current: peak,
        average_current: iout,
        rms_current: peak * (conducting / 3.0).sqrt(),
        output_ripple: ripple_voltage(point, peak),
        mode,
    })
}
