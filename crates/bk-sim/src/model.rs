//! SwitchedModel trait for piecewise-defined dynamic systems.

use serde::{Deserialize, Serialize};

/// Conduction state of the main switch, held constant across one integration step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SwitchState {
    On,
    Off,
}

impl SwitchState {
    pub fn is_on(self) -> bool {
        matches!(self, Self::On)
    }
}

/// Trait for models whose right-hand side depends on a discrete switch state.
///
/// A SwitchedModel must implement:
/// - State type (Clone, for snapshots)
/// - Derivative computation: x_dot = f(x, switch)
/// - Vector arithmetic for integration: add states, scale by scalar
///
/// `project` is applied once after every completed step. It is a discrete
/// projection onto the admissible set, not part of the continuous dynamics.
pub trait SwitchedModel {
    /// State type (must be Clone).
    type State: Clone;

    /// Compute state derivative for the given switch state.
    fn derivatives(&self, x: &Self::State, switch: SwitchState) -> Self::State;

    /// Add two states element-wise: result = a + b.
    fn add(&self, a: &Self::State, b: &Self::State) -> Self::State;

    /// Scale a state by a scalar: result = scale * a.
    fn scale(&self, a: &Self::State, scale: f64) -> Self::State;

    /// Post-step projection. Identity by default.
    fn project(&self, x: Self::State) -> Self::State {
        x
    }
}
