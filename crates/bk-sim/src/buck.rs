//! Two-state switched model of the buck converter.
//!
//! State vector is `[iL, vC]`: inductor current and capacitor voltage.
//!
//! | switch | condition       | diL/dt                          | dvC/dt                      |
//! |--------|-----------------|---------------------------------|-----------------------------|
//! | on     |                 | (Vin - vC - iL rL - iL rDS) / L | (iL - vC/R) / C [- vC/(rC C)] |
//! | off    | iL > threshold  | (-vC - iL rL - VF) / L          | (iL - vC/R) / C             |
//! | off    | iL <= threshold | 0                               | -vC / (R C)                 |
//!
//! With parasitics disabled rL, rDS, rC and VF are all treated as zero.
//! The bracketed rC term is only present when parasitics are modeled.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use bk_core::CircuitParameters;

use crate::model::{SwitchState, SwitchedModel};

/// Inductor current below which the diode is considered blocking.
pub const CONDUCTION_THRESHOLD_A: f64 = 1e-6;

/// `[inductor current (A), capacitor voltage (V)]`
pub type BuckState = Vector2<f64>;

/// Snapshot of the converter at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircuitState {
    pub inductor_current: f64,
    pub capacitor_voltage: f64,
    pub switch: SwitchState,
    pub time: f64,
}

/// Element values actually used by the equations.
#[derive(Debug, Clone, Copy)]
struct Elements {
    vin: f64,
    l: f64,
    c: f64,
    r: f64,
    r_l: f64,
    r_c: f64,
    r_ds: f64,
    v_f: f64,
}

/// Buck converter derivative model.
#[derive(Debug, Clone)]
pub struct BuckModel {
    e: Elements,
    include_parasitics: bool,
}

impl BuckModel {
    pub fn new(params: &CircuitParameters, include_parasitics: bool) -> Self {
        let parasitic = |v: f64| if include_parasitics { v } else { 0.0 };
        Self {
            e: Elements {
                vin: params.input_voltage,
                l: params.inductance,
                c: params.capacitance,
                r: params.load_resistance,
                r_l: parasitic(params.inductor_esr),
                r_c: parasitic(params.capacitor_esr),
                r_ds: parasitic(params.switch_on_resistance),
                v_f: parasitic(params.diode_forward_voltage),
            },
            include_parasitics,
        }
    }

    /// True when the diode blocks: switch off and no inductor current left.
    pub fn is_idle(&self, x: &BuckState, switch: SwitchState) -> bool {
        switch == SwitchState::Off && x[0] <= CONDUCTION_THRESHOLD_A
    }

    /// Switch-node voltage for the given state.
    pub fn switch_node_voltage(&self, x: &BuckState, switch: SwitchState) -> f64 {
        let e = &self.e;
        match switch {
            SwitchState::On => e.vin - x[0] * e.r_ds,
            SwitchState::Off if self.is_idle(x, switch) => x[1],
            SwitchState::Off => -e.v_f,
        }
    }

    /// Voltage across the switch (drain to source).
    pub fn switch_voltage(&self, x: &BuckState, switch: SwitchState) -> f64 {
        self.e.vin - self.switch_node_voltage(x, switch)
    }

    /// Voltage across the diode (cathode to anode).
    pub fn diode_voltage(&self, x: &BuckState, switch: SwitchState) -> f64 {
        self.switch_node_voltage(x, switch)
    }
}

impl SwitchedModel for BuckModel {
    type State = BuckState;

    fn derivatives(&self, x: &BuckState, switch: SwitchState) -> BuckState {
        let e = &self.e;
        let (il, vc) = (x[0], x[1]);

        match switch {
            SwitchState::On => {
                let dil = (e.vin - vc - il * e.r_l - il * e.r_ds) / e.l;
                let mut dvc = (il - vc / e.r) / e.c;
                if self.include_parasitics && e.r_c > 0.0 {
                    dvc -= vc / (e.r_c * e.c);
                }
                Vector2::new(dil, dvc)
            }
            SwitchState::Off if il > CONDUCTION_THRESHOLD_A => {
                let dil = (-vc - il * e.r_l - e.v_f) / e.l;
                let dvc = (il - vc / e.r) / e.c;
                Vector2::new(dil, dvc)
            }
            // Discontinuous conduction: capacitor alone feeds the load.
            SwitchState::Off => Vector2::new(0.0, -vc / (e.r * e.c)),
        }
    }

    fn add(&self, a: &BuckState, b: &BuckState) -> BuckState {
        a + b
    }

    fn scale(&self, a: &BuckState, scale: f64) -> BuckState {
        a * scale
    }

    /// Diode blocking: inductor current cannot reverse.
    fn project(&self, mut x: BuckState) -> BuckState {
        x[0] = x[0].max(0.0);
        x
    }
}
