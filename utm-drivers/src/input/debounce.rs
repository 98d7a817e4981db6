//! Debounced push buttons with edge flags
//!
//! Buttons are wired active low with pull-ups. A raw level must hold for the
//! debounce time before it is accepted. Each accepted transition latches a
//! pressed or released flag that stays set until it is read.

use embedded_hal::digital::InputPin;
use utm_core::timing::elapsed_ms;
use utm_core::traits::{Button, Buttons};

/// Default debounce time (ms)
pub const DEBOUNCE_MS: u32 = 20;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct ButtonState {
    /// Accepted level (true = pressed)
    stable: bool,
    /// Last raw level seen
    candidate: bool,
    /// When `candidate` was first seen
    since_ms: u32,
    pressed: bool,
    released: bool,
}

/// UP and DOWN jog buttons
pub struct DebouncedButtons<P> {
    pins: [P; 2],
    states: [ButtonState; 2],
    debounce_ms: u32,
}

impl<P: InputPin> DebouncedButtons<P> {
    /// Create from the UP and DOWN pins
    pub fn new(up: P, down: P) -> Self {
        Self::with_debounce(up, down, DEBOUNCE_MS)
    }

    pub fn with_debounce(up: P, down: P, debounce_ms: u32) -> Self {
        Self {
            pins: [up, down],
            states: [ButtonState::default(); 2],
            debounce_ms,
        }
    }

    /// Debounced level of `button`
    pub fn is_pressed(&self, button: Button) -> bool {
        self.states[button.index()].stable
    }
}

impl<P: InputPin> Buttons for DebouncedButtons<P> {
    fn process(&mut self, now_ms: u32) {
        for (pin, state) in self.pins.iter_mut().zip(self.states.iter_mut()) {
            // Unreadable pin keeps its last state
            let Ok(raw) = pin.is_low() else {
                continue;
            };

            if raw != state.candidate {
                state.candidate = raw;
                state.since_ms = now_ms;
            } else if raw != state.stable && elapsed_ms(state.since_ms, now_ms) >= self.debounce_ms {
                state.stable = raw;
                if raw {
                    state.pressed = true;
                } else {
                    state.released = true;
                }
            }
        }
    }

    fn pressed(&mut self, button: Button) -> bool {
        core::mem::take(&mut self.states[button.index()].pressed)
    }

    fn released(&mut self, button: Button) -> bool {
        core::mem::take(&mut self.states[button.index()].released)
    }
}
