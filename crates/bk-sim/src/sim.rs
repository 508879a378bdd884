//! Waveform simulator: PWM-driven fixed-step integration of the buck model.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use bk_core::CircuitParameters;

use crate::buck::{BuckModel, BuckState, CircuitState};
use crate::error::{SimError, SimResult};
use crate::integrator::IntegratorType;
use crate::model::SwitchState;
use crate::pwm::PwmGate;
use crate::results::{Sample, SimulationResults};

/// Options for a time-domain run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// Recorded window length (seconds)
    pub total_time: f64,
    /// Unrecorded settling time integrated before the window (seconds)
    pub pre_roll_time: f64,
    /// Integration steps per switching period; one sample is recorded per step
    pub samples_per_cycle: usize,
    pub include_parasitics: bool,
    pub integrator: IntegratorType,
    /// Safety limit on pre-roll plus recorded steps
    pub max_steps: usize,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            total_time: 1e-3,
            pre_roll_time: 0.0,
            samples_per_cycle: 100,
            include_parasitics: false,
            integrator: IntegratorType::default(),
            max_steps: 10_000_000,
        }
    }
}

impl SimulationSettings {
    pub fn validate(&self) -> SimResult<()> {
        if !(self.total_time.is_finite() && self.total_time > 0.0) {
            return Err(SimError::InvalidArg {
                what: "total_time must be positive",
            });
        }
        if !(self.pre_roll_time.is_finite() && self.pre_roll_time >= 0.0) {
            return Err(SimError::InvalidArg {
                what: "pre_roll_time must be non-negative",
            });
        }
        if self.samples_per_cycle < 2 {
            return Err(SimError::InvalidArg {
                what: "samples_per_cycle must be at least 2",
            });
        }
        if self.max_steps == 0 {
            return Err(SimError::InvalidArg {
                what: "max_steps must be positive",
            });
        }
        Ok(())
    }
}

/// Owns the integration state of one converter.
///
/// State carries over between [`Simulator::run`] calls; call
/// [`Simulator::reset`] (or build a new simulator) before an independent run.
#[derive(Debug, Clone)]
pub struct Simulator {
    model: BuckModel,
    gate: PwmGate,
    settings: SimulationSettings,
    dt: f64,
    x: BuckState,
    step_index: u64,
}

impl Simulator {
    pub fn new(params: &CircuitParameters, settings: SimulationSettings) -> SimResult<Self> {
        params.validate()?;
        settings.validate()?;

        let gate = PwmGate::new(params.switching_period(), params.duty_cycle);
        let dt = gate.period() / settings.samples_per_cycle as f64;
        if !(dt.is_finite() && dt > 0.0) {
            return Err(SimError::NonPhysical {
                what: "time step is not a positive finite number",
            });
        }

        Ok(Self {
            model: BuckModel::new(params, settings.include_parasitics),
            gate,
            settings,
            dt,
            x: BuckState::zeros(),
            step_index: 0,
        })
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn settings(&self) -> &SimulationSettings {
        &self.settings
    }

    /// Back to the de-energized state at t = 0.
    pub fn reset(&mut self) {
        self.x = BuckState::zeros();
        self.step_index = 0;
    }

    fn time(&self) -> f64 {
        self.step_index as f64 * self.dt
    }

    fn gate_state(&self) -> SwitchState {
        self.gate
            .state_at_sample(self.step_index, self.settings.samples_per_cycle)
    }

    /// Snapshot of the current state and the gate at the current time.
    pub fn state(&self) -> CircuitState {
        CircuitState {
            inductor_current: self.x[0],
            capacitor_voltage: self.x[1],
            switch: self.gate_state(),
            time: self.time(),
        }
    }

    /// Advance one step.
    ///
    /// A step that contains the falling gate edge is split there: the on part
    /// is integrated first, then the off part, each with the gate held fixed.
    pub fn step(&mut self) -> CircuitState {
        let integrator = self.settings.integrator;
        let on = self
            .gate
            .on_fraction(self.step_index, self.settings.samples_per_cycle);
        self.x = if on >= 1.0 {
            integrator.step(&self.model, &self.x, SwitchState::On, self.dt)
        } else if on <= 0.0 {
            integrator.step(&self.model, &self.x, SwitchState::Off, self.dt)
        } else {
            let mid = integrator.step(&self.model, &self.x, SwitchState::On, on * self.dt);
            integrator.step(&self.model, &mid, SwitchState::Off, (1.0 - on) * self.dt)
        };
        self.step_index += 1;
        self.state()
    }

    /// Step count for `duration`, kept in `f64` so huge durations cannot overflow.
    fn steps_for(&self, duration: f64) -> f64 {
        (duration / self.dt).round()
    }

    fn sample(&self, t_rel: f64) -> Sample {
        let switch = self.gate_state();
        let il = self.x[0];
        let on = switch.is_on();
        Sample {
            time: t_rel,
            inductor_current: il,
            output_voltage: self.x[1],
            switch_voltage: self.model.switch_voltage(&self.x, switch),
            diode_voltage: self.model.diode_voltage(&self.x, switch),
            switch_current: if on { il } else { 0.0 },
            diode_current: if on { 0.0 } else { il },
        }
    }

    /// Integrate the pre-roll, then record the window and compute metrics.
    ///
    /// Recorded time starts at 0 at the end of the pre-roll.
    pub fn run(&mut self) -> SimResult<SimulationResults> {
        let pre_roll = self.steps_for(self.settings.pre_roll_time);
        let record = self.steps_for(self.settings.total_time).max(1.0);
        let requested = pre_roll + record;
        if !(requested <= self.settings.max_steps as f64) {
            return Err(SimError::TooManySteps {
                requested: requested as usize,
                limit: self.settings.max_steps,
            });
        }
        let pre_roll_steps = pre_roll as usize;
        let record_steps = record as usize;

        debug!(
            dt = self.dt,
            pre_roll_steps,
            record_steps,
            integrator = ?self.settings.integrator,
            "time-domain run starting"
        );

        for _ in 0..pre_roll_steps {
            self.step();
        }

        let origin = self.step_index;
        let mut results = SimulationResults::with_capacity(record_steps + 1);
        results.push(self.sample(0.0));
        for _ in 0..record_steps {
            self.step();
            let t_rel = (self.step_index - origin) as f64 * self.dt;
            results.push(self.sample(t_rel));
        }

        if results.output_voltage.iter().any(|v| !v.is_finite()) {
            return Err(SimError::NonPhysical {
                what: "state diverged; reduce the time step",
            });
        }

        let metrics = results.calculate_metrics();
        info!(
            samples = results.len(),
            vout_avg = metrics.average_output_voltage,
            il_peak = metrics.peak_inductor_current,
            "time-domain run complete"
        );
        Ok(results)
    }
}

/// One-shot run on a fresh simulator.
pub fn run_time_domain_simulation(
    params: &CircuitParameters,
    settings: &SimulationSettings,
) -> SimResult<SimulationResults> {
    Simulator::new(params, settings.clone())?.run()
}
