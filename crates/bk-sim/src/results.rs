//! Recorded waveforms and their summary metrics.

use serde::{Deserialize, Serialize};

use bk_core::{mean, min_max, rms};

/// Scalar figures of merit over the recorded window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationMetrics {
    pub average_output_voltage: f64,
    /// Peak-to-peak output voltage ripple (V)
    pub output_ripple: f64,
    pub peak_inductor_current: f64,
    pub average_inductor_current: f64,
    pub rms_inductor_current: f64,
    /// Peak-to-peak inductor current ripple (A)
    pub inductor_current_ripple: f64,
}

/// Co-indexed sample sequences from one time-domain run.
///
/// Every vector has the same length; index `k` of each refers to `time[k]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationResults {
    pub time: Vec<f64>,
    pub inductor_current: Vec<f64>,
    pub output_voltage: Vec<f64>,
    pub switch_voltage: Vec<f64>,
    pub diode_voltage: Vec<f64>,
    pub switch_current: Vec<f64>,
    pub diode_current: Vec<f64>,
    pub metrics: SimulationMetrics,
}

/// One row of [`SimulationResults`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub time: f64,
    pub inductor_current: f64,
    pub output_voltage: f64,
    pub switch_voltage: f64,
    pub diode_voltage: f64,
    pub switch_current: f64,
    pub diode_current: f64,
}

impl SimulationResults {
    pub fn with_capacity(n: usize) -> Self {
        Self {
            time: Vec::with_capacity(n),
            inductor_current: Vec::with_capacity(n),
            output_voltage: Vec::with_capacity(n),
            switch_voltage: Vec::with_capacity(n),
            diode_voltage: Vec::with_capacity(n),
            switch_current: Vec::with_capacity(n),
            diode_current: Vec::with_capacity(n),
            metrics: SimulationMetrics::default(),
        }
    }

    pub fn push(&mut self, s: Sample) {
        self.time.push(s.time);
        self.inductor_current.push(s.inductor_current);
        self.output_voltage.push(s.output_voltage);
        self.switch_voltage.push(s.switch_voltage);
        self.diode_voltage.push(s.diode_voltage);
        self.switch_current.push(s.switch_current);
        self.diode_current.push(s.diode_current);
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn sample(&self, k: usize) -> Option<Sample> {
        Some(Sample {
            time: *self.time.get(k)?,
            inductor_current: *self.inductor_current.get(k)?,
            output_voltage: *self.output_voltage.get(k)?,
            switch_voltage: *self.switch_voltage.get(k)?,
            diode_voltage: *self.diode_voltage.get(k)?,
            switch_current: *self.switch_current.get(k)?,
            diode_current: *self.diode_current.get(k)?,
        })
    }

    pub fn samples(&self) -> impl Iterator<Item = Sample> + '_ {
        (0..self.len()).filter_map(|k| self.sample(k))
    }

    /// Recompute [`SimulationMetrics`] from the stored sequences.
    ///
    /// Pure function of the arrays, so calling it again gives the same result.
    pub fn calculate_metrics(&mut self) -> SimulationMetrics {
        let spread = |v: &[f64]| min_max(v).map(|(lo, hi)| hi - lo).unwrap_or(0.0);

        self.metrics = SimulationMetrics {
            average_output_voltage: mean(&self.output_voltage),
            output_ripple: spread(&self.output_voltage),
            peak_inductor_current: min_max(&self.inductor_current)
                .map(|(_, hi)| hi)
                .unwrap_or(0.0),
            average_inductor_current: mean(&self.inductor_current),
            rms_inductor_current: rms(&self.inductor_current),
            inductor_current_ripple: spread(&self.inductor_current),
        };
        self.metrics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(t: f64, il: f64, vo: f64) -> Sample {
        Sample {
            time: t,
            inductor_current: il,
            output_voltage: vo,
            switch_voltage: 0.0,
            diode_voltage: 0.0,
            switch_current: 0.0,
            diode_current: 0.0,
        }
    }

    #[test]
    fn metrics_over_recorded_rows() {
        let mut r = SimulationResults::default();
        r.push(row(0.0, 1.0, 4.9));
        r.push(row(1.0, 3.0, 5.1));
        let m = r.calculate_metrics();
        assert!((m.average_output_voltage - 5.0).abs() < 1e-12);
        assert!((m.output_ripple - 0.2).abs() < 1e-12);
        assert_eq!(m.peak_inductor_current, 3.0);
        assert_eq!(m.average_inductor_current, 2.0);
        assert!((m.rms_inductor_current - 5.0_f64.sqrt()).abs() < 1e-12);
        assert_eq!(m.inductor_current_ripple, 2.0);
    }

    #[test]
    fn metrics_are_idempotent() {
        let mut r = SimulationResults::default();
        for k in 0..50 {
            let t = k as f64 * 1e-6;
            r.push(row(t, (t * 1e5).sin().abs(), 5.0 + 0.01 * (t * 3e5).cos()));
        }
        let first = r.calculate_metrics();
        let second = r.calculate_metrics();
        assert_eq!(first, second);
        assert_eq!(r.metrics, first);
    }

    #[test]
    fn empty_results_have_zero_metrics() {
        let mut r = SimulationResults::default();
        assert!(r.is_empty());
        assert_eq!(r.calculate_metrics(), SimulationMetrics::default());
    }

    #[test]
    fn rows_stay_co_indexed() {
        let mut r = SimulationResults::with_capacity(2);
        r.push(row(0.0, 1.0, 2.0));
        r.push(row(1.0, 3.0, 4.0));
        assert_eq!(r.len(), 2);
        assert_eq!(r.sample(1), Some(row(1.0, 3.0, 4.0)));
        assert_eq!(r.sample(2), None);
        assert_eq!(r.samples().count(), 2);
    }
}
