//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in utm-core, written against the blocking `embedded-hal` 1.0 traits:
//!
//! - Rotary sensors (AS5600 behind a TCA9548A multiplexer)
//! - Load cell amplifier (HX711)
//! - Debounced jog buttons and the speed switch
//! - I²C bus scan used at startup

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

#[macro_use]
mod log;

pub mod input;
pub mod load;
pub mod scan;
pub mod sensor;

#[cfg(test)]
mod mock;

pub use input::{DebouncedButtons, SpeedSwitch};
pub use load::Hx711;
pub use scan::{scan_bus, ScanError, ScanReport};
pub use sensor::{MuxError, SensorBank};
