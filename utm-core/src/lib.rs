//! Board-agnostic control logic for the load-frame firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (clock, motion, sensors, inputs)
//! - The cooperative control loop and its command dispatch
//! - Motion ramp planning
//! - Soft timers and telemetry smoothing
//! - Build-time rig configuration

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod control;
pub mod motion;
pub mod serial;
pub mod telemetry;
pub mod timing;
pub mod traits;

pub use config::RigConfig;
pub use control::{ControlLoop, RigState};
