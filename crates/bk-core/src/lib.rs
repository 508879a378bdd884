//! bk-core: stable foundation for buckflow.
//!
//! Contains:
//! - units (uom SI electrical types + constructors)
//! - numeric (finite/positive checks, series statistics, frequency grids)
//! - circuit (buck converter parameter snapshot)
//! - timing (wall-clock timers for run summaries)
//! - error (shared error types)

pub mod circuit;
pub mod error;
pub mod numeric;
pub mod timing;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use circuit::CircuitParameters;
pub use error::{BkError, BkResult};
pub use numeric::*;
pub use units::*;
