//! Frequency-domain loop analysis for buckflow.
//!
//! This crate covers the Laplace-domain half of the engine: rational transfer
//! function algebra, compensation networks, the closed-form small-signal
//! power stage and the Bode/margin analyzer that combines them.
//!
//! # Architecture
//!
//! - `polynomial` and `transfer_function` are standalone rational-function algebra
//! - `power_stage` and `compensator` have closed-form responses and can also
//!   be converted into a [`TransferFunction`] for composition
//! - `bode` sweeps the composite loop directly over the closed forms
//!
//! Everything is pure computation; nothing here keeps state between calls.

pub mod bode;
pub mod compensator;
pub mod error;
pub mod polynomial;
pub mod power_stage;
pub mod transfer_function;

pub use bode::{BodeAnalyzer, BodePlot, StabilityReport, StabilityVerdict, gain_margin, phase_margin};
pub use compensator::{CompensationNetwork, CompensatorType};
pub use error::{ControlError, ControlResult};
pub use num_complex::Complex64;
pub use power_stage::PowerStage;
pub use transfer_function::TransferFunction;
