//! TCA9548A I²C multiplexer

use embedded_hal::i2c::I2c;
use utm_core::config::SENSOR_CHANNELS;

/// Default multiplexer address (A0..A2 low)
pub const TCA9548A_ADDR: u8 = 0x70;

/// Errors that can occur while selecting a channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MuxError {
    /// Channel is not wired on this board
    InvalidChannel,
    /// Bus write failed
    Bus,
}

/// TCA9548A with only the first `SENSOR_CHANNELS` inputs in use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tca9548a {
    address: u8,
}

impl Default for Tca9548a {
    fn default() -> Self {
        Self::new(TCA9548A_ADDR)
    }
}

impl Tca9548a {
    pub fn new(address: u8) -> Self {
        Self { address }
    }

    /// Route the bus to `channel`
    ///
    /// An unwired channel never touches the bus.
    pub fn select<I: I2c>(&self, i2c: &mut I, channel: u8) -> Result<(), MuxError> {
        if channel >= SENSOR_CHANNELS {
            return Err(MuxError::InvalidChannel);
        }
        i2c.write(self.address, &[1 << channel])
            .map_err(|_| MuxError::Bus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockBus;

    #[test]
    fn test_select_writes_channel_mask() {
        let mut bus = MockBus::default();
        let mux = Tca9548a::default();

        mux.select(&mut bus, 1).unwrap();
        assert_eq!(bus.writes, vec![(TCA9548A_ADDR, vec![0b10])]);
        assert_eq!(bus.selected, Some(1));
    }

    #[test]
    fn test_unwired_channel_skips_bus() {
        let mut bus = MockBus::default();
        let mux = Tca9548a::default();

        for channel in [2, 7, 200] {
            assert_eq!(mux.select(&mut bus, channel), Err(MuxError::InvalidChannel));
        }
        assert!(bus.writes.is_empty());
        assert_eq!(bus.selected, None);
    }

    #[test]
    fn test_bus_failure() {
        let mut bus = MockBus::default();
        bus.fail_all = true;
        assert_eq!(Tca9548a::default().select(&mut bus, 0), Err(MuxError::Bus));
    }
}
