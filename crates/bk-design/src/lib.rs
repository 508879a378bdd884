//! Steady-state design calculations for the buck converter.
//!
//! Classifies the conduction mode of an [`OperatingPoint`], derives duty
//! splits and inductor currents, and sizes the inductor for a target mode.
//! Every routine takes the operating point by reference and returns a fresh
//! value; nothing is cached between calls.

pub mod conduction;
pub mod error;
pub mod inductor;
pub mod operating_point;

pub use conduction::{
    BOUNDARY_TOLERANCE_A, DcmParameters, OperatingMode, boundary_current, ccm_parameters,
    classify, dcm_parameters,
};
pub use error::{DesignError, DesignResult};
pub use inductor::{InductorRecommendation, SATURATION_MARGIN, minimum_inductance, optimize_inductor};
pub use operating_point::OperatingPoint;
