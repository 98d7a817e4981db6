//! Operator inputs: jog buttons and speed switch

/// Jog buttons on the front panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    Up,
    Down,
}

impl Button {
    /// Index into per-button state arrays
    pub fn index(self) -> usize {
        match self {
            Button::Up => 0,
            Button::Down => 1,
        }
    }
}

/// Position of the jog speed switch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpeedMode {
    Slow,
    Fast,
}

/// Debounced button set with edge detection
pub trait Buttons {
    /// Sample the inputs and update debounced state
    fn process(&mut self, now_ms: u32);

    /// True once after a debounced press; reading clears it
    fn pressed(&mut self, button: Button) -> bool;

    /// True once after a debounced release; reading clears it
    fn released(&mut self, button: Button) -> bool;
}

/// Jog speed switch
pub trait SpeedSelector {
    /// Current switch position
    fn speed_mode(&mut self) -> SpeedMode;
}
