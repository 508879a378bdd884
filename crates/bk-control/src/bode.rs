//! Bode sweep, stability margins and automatic Type-II compensation.
//!
//! The loop response is the closed-form power stage optionally cascaded with a
//! compensator. Phase is kept as the principal value in (-180, 180]; margins
//! come from a single left-to-right threshold scan, so a wrap that jumps over
//! -180 deg is not reported as a phase crossover.

use std::f64::consts::PI;
use std::fmt;

use num_complex::Complex64;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use bk_core::{ensure_positive, lerp, log_space};

use crate::compensator::CompensationNetwork;
use crate::error::{ControlError, ControlResult};
use crate::power_stage::PowerStage;

/// Compensator pole placement relative to the target crossover.
pub const POLE_TO_CROSSOVER_RATIO: f64 = 10.0;

/// Magnitude/phase sweep with derived margins. Immutable once produced.
///
/// `frequencies_hz`, `magnitude_db` and `phase_deg` are co-indexed and
/// ascending in frequency. Margins and crossovers are NaN when the matching
/// crossing does not occur inside the swept range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodePlot {
    pub frequencies_hz: Vec<f64>,
    pub magnitude_db: Vec<f64>,
    pub phase_deg: Vec<f64>,
    pub phase_margin_deg: f64,
    pub gain_margin_db: f64,
    pub crossover_hz: f64,
    pub phase_crossover_hz: f64,
}

impl BodePlot {
    /// Build from co-indexed sequences and extract margins.
    pub fn from_response(
        frequencies_hz: Vec<f64>,
        magnitude_db: Vec<f64>,
        phase_deg: Vec<f64>,
    ) -> ControlResult<Self> {
        if frequencies_hz.len() != magnitude_db.len() || frequencies_hz.len() != phase_deg.len()
        {
            return Err(ControlError::InvalidArg {
                what: "bode sequences must have equal length",
            });
        }
        let (phase_margin_deg, crossover_hz) =
            phase_margin(&frequencies_hz, &magnitude_db, &phase_deg);
        let (gain_margin_db, phase_crossover_hz) =
            gain_margin(&frequencies_hz, &magnitude_db, &phase_deg);
        Ok(Self {
            frequencies_hz,
            magnitude_db,
            phase_deg,
            phase_margin_deg,
            gain_margin_db,
            crossover_hz,
            phase_crossover_hz,
        })
    }

    pub fn len(&self) -> usize {
        self.frequencies_hz.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies_hz.is_empty()
    }

    /// Stable iff both margins are positive. A missing (NaN) margin fails.
    pub fn is_stable(&self) -> bool {
        self.phase_margin_deg > 0.0 && self.gain_margin_db > 0.0
    }

    pub fn stability_report(&self) -> StabilityReport {
        let verdict = if !self.is_stable() {
            StabilityVerdict::Unstable
        } else if self.phase_margin_deg < 30.0 {
            StabilityVerdict::Marginal
        } else if self.phase_margin_deg < 45.0 {
            StabilityVerdict::Acceptable
        } else {
            StabilityVerdict::Good
        };
        StabilityReport {
            verdict,
            phase_margin_deg: self.phase_margin_deg,
            gain_margin_db: self.gain_margin_db,
            crossover_hz: self.crossover_hz,
            phase_crossover_hz: self.phase_crossover_hz,
        }
    }
}

/// Phase-margin bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StabilityVerdict {
    Unstable,
    Marginal,
    Acceptable,
    Good,
}

impl StabilityVerdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unstable => "UNSTABLE",
            Self::Marginal => "MARGINAL",
            Self::Acceptable => "ACCEPTABLE",
            Self::Good => "GOOD",
        }
    }
}

impl fmt::Display for StabilityVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Verdict plus the numbers it was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StabilityReport {
    pub verdict: StabilityVerdict,
    pub phase_margin_deg: f64,
    pub gain_margin_db: f64,
    pub crossover_hz: f64,
    pub phase_crossover_hz: f64,
}

impl fmt::Display for StabilityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (PM={:.1} deg at {:.1} Hz, GM={:.1} dB at {:.1} Hz)",
            self.verdict,
            self.phase_margin_deg,
            self.crossover_hz,
            self.gain_margin_db,
            self.phase_crossover_hz
        )
    }
}

/// First 0 dB down-crossing: `(180 + phase, frequency)`, or NaNs.
pub fn phase_margin(freqs: &[f64], mag_db: &[f64], phase_deg: &[f64]) -> (f64, f64) {
    for i in 1..freqs.len().min(mag_db.len()).min(phase_deg.len()) {
        if mag_db[i - 1] >= 0.0 && mag_db[i] < 0.0 {
            let frac = (0.0 - mag_db[i - 1]) / (mag_db[i] - mag_db[i - 1]);
            let fc = lerp(freqs[i - 1], freqs[i], frac);
            let phase = lerp(phase_deg[i - 1], phase_deg[i], frac);
            return (180.0 + phase, fc);
        }
    }
    (f64::NAN, f64::NAN)
}

/// First -180 deg down-crossing: `(-magnitude, frequency)`, or NaNs.
pub fn gain_margin(freqs: &[f64], mag_db: &[f64], phase_deg: &[f64]) -> (f64, f64) {
    for i in 1..freqs.len().min(mag_db.len()).min(phase_deg.len()) {
        if phase_deg[i - 1] > -180.0 && phase_deg[i] <= -180.0 {
            let frac = (-180.0 - phase_deg[i - 1]) / (phase_deg[i] - phase_deg[i - 1]);
            let f180 = lerp(freqs[i - 1], freqs[i], frac);
            let mag = lerp(mag_db[i - 1], mag_db[i], frac);
            return (-mag, f180);
        }
    }
    (f64::NAN, f64::NAN)
}

/// Loop-gain analyzer: power stage times optional compensator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodeAnalyzer {
    stage: PowerStage,
    compensator: Option<CompensationNetwork>,
}

impl BodeAnalyzer {
    pub fn new(stage: PowerStage) -> Self {
        Self {
            stage,
            compensator: None,
        }
    }

    pub fn with_compensator(mut self, compensator: CompensationNetwork) -> Self {
        self.compensator = Some(compensator);
        self
    }

    pub fn stage(&self) -> &PowerStage {
        &self.stage
    }

    pub fn compensator(&self) -> Option<&CompensationNetwork> {
        self.compensator.as_ref()
    }

    /// Composite loop response at complex frequency `s`.
    pub fn response(&self, s: Complex64) -> Complex64 {
        let g = self.stage.response(s);
        match &self.compensator {
            Some(c) => g * c.response(s),
            None => g,
        }
    }

    /// `(magnitude dB, principal phase deg)` at one frequency.
    pub fn point(&self, frequency_hz: f64) -> (f64, f64) {
        let h = self.response(Complex64::new(0.0, 2.0 * PI * frequency_hz));
        (20.0 * h.norm().log10(), h.arg().to_degrees())
    }

    /// Sweep `points` log-spaced frequencies from `start_hz` to `end_hz` inclusive.
    ///
    /// Points are independent and evaluated in parallel; results keep grid order.
    pub fn sweep(&self, start_hz: f64, end_hz: f64, points: usize) -> ControlResult<BodePlot> {
        let freqs = log_space(start_hz, end_hz, points)?;
        let evaluated: Vec<(f64, f64)> = freqs.par_iter().map(|&f| self.point(f)).collect();
        let (mag, phase): (Vec<f64>, Vec<f64>) = evaluated.into_iter().unzip();

        let plot = BodePlot::from_response(freqs, mag, phase)?;
        if plot.crossover_hz.is_nan() {
            debug!(start_hz, end_hz, "no 0 dB crossing in sweep range");
        }
        if plot.phase_crossover_hz.is_nan() {
            debug!(start_hz, end_hz, "no -180 deg crossing in sweep range");
        }
        info!(
            points,
            phase_margin_deg = plot.phase_margin_deg,
            gain_margin_db = plot.gain_margin_db,
            crossover_hz = plot.crossover_hz,
            "bode sweep complete"
        );
        Ok(plot)
    }

    /// Type-II compensator for a target crossover frequency.
    ///
    /// - gain cancels the power stage's magnitude at the target crossover
    /// - zero sits at the LC resonance
    /// - pole sits at [`POLE_TO_CROSSOVER_RATIO`] times the target crossover
    ///
    /// `target_phase_margin_deg` is accepted for interface compatibility and
    /// does not influence placement; check the achieved margin with a sweep.
    pub fn design_type2_compensation(
        &self,
        target_crossover_hz: f64,
        target_phase_margin_deg: f64,
    ) -> ControlResult<CompensationNetwork> {
        ensure_positive(target_crossover_hz, "target_crossover_hz")?;

        let stage_db = 20.0
            * self
                .stage
                .response_at_frequency(target_crossover_hz)
                .norm()
                .log10();
        let gain = 10.0_f64.powf(-stage_db / 20.0);
        let zero_hz = self.stage.natural_frequency() / (2.0 * PI);
        let pole_hz = POLE_TO_CROSSOVER_RATIO * target_crossover_hz;

        debug!(
            target_crossover_hz,
            target_phase_margin_deg, stage_db, gain, zero_hz, pole_hz, "type II compensator placed"
        );

        let network = CompensationNetwork::TypeII {
            gain,
            zero_hz,
            pole_hz,
        };
        network.validate()?;
        Ok(network)
    }
}
