//! Fixed-step time integrators.
//!
//! The switch state is an input held constant for the whole step: every stage
//! of a multi-stage method sees the same [`SwitchState`]. The model's
//! post-step projection runs once on the combined result, never between stages.

use serde::{Deserialize, Serialize};

use crate::model::{SwitchState, SwitchedModel};

/// Trait for time integrators.
pub trait Integrator {
    /// Advance state by one time step.
    fn step<M: SwitchedModel>(
        &self,
        model: &M,
        x: &M::State,
        switch: SwitchState,
        dt: f64,
    ) -> M::State;
}

/// Forward Euler (explicit, 1st order).
/// Calls derivatives() once per step.
#[derive(Clone, Debug)]
pub struct ForwardEuler;

impl Integrator for ForwardEuler {
    fn step<M: SwitchedModel>(
        &self,
        model: &M,
        x: &M::State,
        switch: SwitchState,
        dt: f64,
    ) -> M::State {
        let xdot = model.derivatives(x, switch);
        model.project(model.add(x, &model.scale(&xdot, dt)))
    }
}

/// Heun's method: Euler predictor, trapezoidal corrector (2nd order).
#[derive(Clone, Debug)]
pub struct Heun;

impl Integrator for Heun {
    fn step<M: SwitchedModel>(
        &self,
        model: &M,
        x: &M::State,
        switch: SwitchState,
        dt: f64,
    ) -> M::State {
        let k1 = model.derivatives(x, switch);
        let predictor = model.add(x, &model.scale(&k1, dt));
        let k2 = model.derivatives(&predictor, switch);

        let k_sum = model.add(&k1, &k2);
        model.project(model.add(x, &model.scale(&k_sum, 0.5 * dt)))
    }
}

/// Classical RK4 (Runge-Kutta 4th order) integrator.
#[derive(Clone, Debug)]
pub struct RK4;

impl Integrator for RK4 {
    fn step<M: SwitchedModel>(
        &self,
        model: &M,
        x: &M::State,
        switch: SwitchState,
        dt: f64,
    ) -> M::State {
        let k1 = model.derivatives(x, switch);

        let x2 = model.add(x, &model.scale(&k1, 0.5 * dt));
        let k2 = model.derivatives(&x2, switch);

        let x3 = model.add(x, &model.scale(&k2, 0.5 * dt));
        let k3 = model.derivatives(&x3, switch);

        let x4 = model.add(x, &model.scale(&k3, dt));
        let k4 = model.derivatives(&x4, switch);

        // Combine: x_new = x + (dt/6) * (k1 + 2*k2 + 2*k3 + k4)
        let k_sum = model.add(
            &model.add(&k1, &model.scale(&k2, 2.0)),
            &model.add(&model.scale(&k3, 2.0), &k4),
        );

        model.project(model.add(x, &model.scale(&k_sum, dt / 6.0)))
    }
}

/// Integrator selection for simulation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegratorType {
    /// Forward Euler (1st-order, 1 derivative call per step).
    Euler,
    /// Heun predictor-corrector (2nd-order, 2 derivative calls per step).
    Rk2,
    /// 4th-order Runge-Kutta (default, most accurate, 4 derivative calls per step).
    #[default]
    Rk4,
}

impl IntegratorType {
    /// Dispatch one step to the selected method.
    pub fn step<M: SwitchedModel>(
        self,
        model: &M,
        x: &M::State,
        switch: SwitchState,
        dt: f64,
    ) -> M::State {
        match self {
            Self::Euler => ForwardEuler.step(model, x, switch, dt),
            Self::Rk2 => Heun.step(model, x, switch, dt),
            Self::Rk4 => RK4.step(model, x, switch, dt),
        }
    }
}
