//! Motion planning
//!
//! Trapezoidal speed ramps for the crosshead stepper.

pub mod ramp;

pub use ramp::{MotionMode, MotionState, RampPlanner};
