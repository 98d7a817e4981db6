//! Rotary position sensors
//!
//! Two AS5600 magnetic encoders share one I²C address, so they sit behind a
//! TCA9548A multiplexer. Every read routes the bus to its channel first.

pub mod as5600;
pub mod bank;
pub mod mux;

pub use as5600::{ChannelTracker, RAW_TO_DEGREES};
pub use bank::SensorBank;
pub use mux::{MuxError, Tca9548a};
