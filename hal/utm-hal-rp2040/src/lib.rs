//! RP2040-specific HAL for the load-frame firmware
//!
//! This crate provides the RP2040 implementation of the core
//! [`MotionController`](utm_core::traits::MotionController):
//!
//! - PIO-based step pulse generation
//! - Ramp-planned motion on top of the step generator

#![no_std]

pub mod motion;
pub mod pio;
pub mod stepper;

pub use motion::PioMotion;
pub use stepper::PioStepper;
