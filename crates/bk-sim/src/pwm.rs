//! Fixed-frequency PWM gate.

use crate::model::SwitchState;

/// Falling edges closer than this (in steps) to a step boundary land on it.
const EDGE_SNAP: f64 = 1e-9;

/// Trailing-edge PWM: on for the first `duty * period` of every cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PwmGate {
    period: f64,
    duty_cycle: f64,
}

impl PwmGate {
    pub fn new(period: f64, duty_cycle: f64) -> Self {
        Self { period, duty_cycle }
    }

    pub fn period(&self) -> f64 {
        self.period
    }

    /// Fraction of step `index` during which the gate is on, on a grid of
    /// `samples_per_cycle` steps per period.
    ///
    /// Steps start on the rising edge, so the on interval is always the
    /// leading part of the step. A value strictly between 0 and 1 means the
    /// falling edge lands inside the step. Works on the integer phase so long
    /// runs do not drift from float accumulation.
    pub fn on_fraction(&self, index: u64, samples_per_cycle: usize) -> f64 {
        let spc = samples_per_cycle.max(1) as u64;
        let mut on_steps = self.duty_cycle * spc as f64;
        if (on_steps - on_steps.round()).abs() < EDGE_SNAP {
            on_steps = on_steps.round();
        }
        (on_steps - (index % spc) as f64).clamp(0.0, 1.0)
    }

    /// Gate state at the start of step `index`.
    pub fn state_at_sample(&self, index: u64, samples_per_cycle: usize) -> SwitchState {
        if self.on_fraction(index, samples_per_cycle) > 0.0 {
            SwitchState::On
        } else {
            SwitchState::Off
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn grid_aligned_edge_is_whole_steps() {
        let gate = PwmGate::new(10e-6, 0.3);
        assert_eq!(gate.on_fraction(29, 100), 1.0);
        assert_eq!(gate.on_fraction(30, 100), 0.0);
        assert_eq!(gate.period(), 10e-6);
    }

    #[test]
    fn sampled_gate_counts_on_samples() {
        let gate = PwmGate::new(10e-6, 0.25);
        let on = (0..400)
            .filter(|&k| gate.state_at_sample(k, 100).is_on())
            .count();
        assert_eq!(on, 100);
    }

    #[test]
    fn falling_edge_inside_a_step_is_fractional() {
        let gate = PwmGate::new(10e-6, 0.1444);
        assert_eq!(gate.on_fraction(13, 100), 1.0);
        assert_relative_eq!(gate.on_fraction(14, 100), 0.44, epsilon = 1e-9);
        assert_eq!(gate.on_fraction(15, 100), 0.0);
        assert_eq!(gate.state_at_sample(14, 100), SwitchState::On);
        assert_eq!(gate.state_at_sample(15, 100), SwitchState::Off);
        assert_eq!(gate.on_fraction(100, 100), 1.0);
    }

    #[test]
    fn on_fractions_integrate_to_duty_cycle() {
        let gate = PwmGate::new(10e-6, 0.1444);
        let total: f64 = (0..100).map(|k| gate.on_fraction(k, 100)).sum();
        assert_relative_eq!(total / 100.0, 0.1444, epsilon = 1e-12);
    }
}
