//! Hardware abstraction traits
//!
//! These traits define the interface between the control loop and the
//! board-specific implementations in `utm-drivers` and the HAL crates.

pub mod clock;
pub mod input;
pub mod motion;
pub mod sensor;

pub use clock::Clock;
pub use input::{Button, Buttons, SpeedMode, SpeedSelector};
pub use motion::{MotionController, Rotation};
pub use sensor::{LoadCell, LoadCellError, PositionSensors, SensorError};
