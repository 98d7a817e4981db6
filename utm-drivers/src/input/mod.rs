//! Front-panel inputs

pub mod debounce;
pub mod switch;

pub use debounce::{DebouncedButtons, DEBOUNCE_MS};
pub use switch::SpeedSwitch;
