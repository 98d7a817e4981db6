//! Jog speed switch

use embedded_hal::digital::InputPin;
use utm_core::traits::{SpeedMode, SpeedSelector};

/// Two-position switch with pull-up: high (open) selects slow
pub struct SpeedSwitch<P> {
    pin: P,
}

impl<P: InputPin> SpeedSwitch<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }
}

impl<P: InputPin> SpeedSelector for SpeedSwitch<P> {
    fn speed_mode(&mut self) -> SpeedMode {
        match self.pin.is_low() {
            Ok(true) => SpeedMode::Fast,
            // Slow on read failure
            _ => SpeedMode::Slow,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::debounce::tests::FakeInput;

    #[test]
    fn test_high_is_slow() {
        let pin = FakeInput::high();
        let mut switch = SpeedSwitch::new(pin.clone());
        assert_eq!(switch.speed_mode(), SpeedMode::Slow);
        pin.set(false);
        assert_eq!(switch.speed_mode(), SpeedMode::Fast);
    }
}
