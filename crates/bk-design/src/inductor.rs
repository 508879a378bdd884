//! Inductor sizing around the conduction boundary.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::conduction::{OperatingMode, dcm_parameters};
use crate::error::{DesignError, DesignResult};
use crate::operating_point::OperatingPoint;

/// Margin applied to the peak current when specifying saturation current.
pub const SATURATION_MARGIN: f64 = 1.3;

/// Sizing result. The operating point it was computed from is left untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InductorRecommendation {
    pub target_mode: OperatingMode,
    /// Inductance that puts the load exactly on the CCM/DCM boundary (H)
    pub minimum_inductance: f64,
    pub recommended_inductance: f64,
    pub saturation_current: f64,
    pub rms_current: f64,
    /// Peak-to-peak inductor current ripple at the recommended value (A)
    pub ripple_current: f64,
    /// Ripple as a percentage of the load current
    pub ripple_percent: f64,
    pub ripple_within_limit: bool,
    pub rationale: String,
}

/// Boundary inductance `Vout (Vin - Vout) / (2 Iout fs Vin)`.
pub fn minimum_inductance(point: &OperatingPoint) -> f64 {
    let vin = point.input_voltage;
    let vout = point.output_voltage;
    vout * (vin - vout) / (2.0 * point.output_current * point.switching_frequency * vin)
}

fn margin_for(mode: OperatingMode) -> f64 {
    match mode {
        OperatingMode::Ccm => 1.5,
        OperatingMode::Dcm => 0.5,
        OperatingMode::Bcm => 1.0,
    }
}

/// Recommend an inductance for `target_mode` at the given load.
///
/// `1.5 Lmin` keeps continuous conduction, `0.5 Lmin` forces discontinuous
/// conduction and `Lmin` sits on the boundary. Currents are re-derived at the
/// recommended value; `max_ripple_percent` only sets `ripple_within_limit`.
pub fn optimize_inductor(
    point: &OperatingPoint,
    target_mode: OperatingMode,
    max_ripple_percent: f64,
) -> DesignResult<InductorRecommendation> {
    point.validate()?;
    if !(point.output_current > 0.0) {
        return Err(DesignError::NonPositive {
            what: "output current",
            value: point.output_current,
        });
    }
    if !(max_ripple_percent > 0.0 && max_ripple_percent.is_finite()) {
        return Err(DesignError::NonPositive {
            what: "max ripple percent",
            value: max_ripple_percent,
        });
    }

    let l_min = minimum_inductance(point);
    let factor = margin_for(target_mode);
    let recommended = factor * l_min;

    let sized = point.with_inductance(recommended);
    let params = dcm_parameters(&sized)?;
    let ripple = params.current_ripple(&sized);
    let ripple_percent = 100.0 * ripple / point.output_current;
    let within = ripple_percent <= max_ripple_percent;

    let rationale = format!(
        "{target_mode} target: {factor} x Lmin ({:.2} uH) = {:.2} uH; \
         peak {:.3} A, ripple {:.3} A ({ripple_percent:.1}% of load, limit {max_ripple_percent:.1}%){}",
        l_min * 1e6,
        recommended * 1e6,
        params.peak_current,
        ripple,
        if within { "" } else { "; ripple exceeds limit" },
    );

    info!(
        mode = %target_mode,
        l_min,
        recommended,
        ripple_percent,
        "inductor sized"
    );

    Ok(InductorRecommendation {
        target_mode,
        minimum_inductance: l_min,
        recommended_inductance: recommended,
        saturation_current: SATURATION_MARGIN * params.peak_current,
        rms_current: params.rms_current,
        ripple_current: ripple,
        ripple_percent,
        ripple_within_limit: within,
        rationale,
    })
}
