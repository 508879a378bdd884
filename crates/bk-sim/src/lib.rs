//! Time-domain simulation of the buck converter.
//!
//! Provides:
//! - Two-state switched model with optional parasitics
//! - Fixed-step Euler, Heun and RK4 integrators
//! - PWM gating and the waveform simulator with pre-roll
//! - Co-indexed result sequences and summary metrics

pub mod buck;
pub mod error;
pub mod integrator;
pub mod model;
pub mod pwm;
pub mod results;
pub mod sim;

pub use buck::{BuckModel, BuckState, CONDUCTION_THRESHOLD_A, CircuitState};
pub use error::{SimError, SimResult};
pub use integrator::{ForwardEuler, Heun, Integrator, IntegratorType, RK4};
pub use model::{SwitchState, SwitchedModel};
pub use pwm::PwmGate;
pub use results::{Sample, SimulationMetrics, SimulationResults};
pub use sim::{SimulationSettings, Simulator, run_time_domain_simulation};
