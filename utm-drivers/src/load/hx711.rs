//! HX711 24-bit bridge ADC
//!
//! Bit-banged two-wire interface: DOUT goes low when a conversion is ready,
//! then 24 clock pulses shift the result out MSB first. One to three extra
//! pulses pick the input and gain for the next conversion.
//!
//! SCK must not stay high for more than 60 µs during a read or the chip
//! powers down. Keep interrupt latency below that while reading.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use utm_core::traits::{LoadCell, LoadCellError};

/// Clock half-period (µs)
const HALF_PERIOD_US: u32 = 1;

/// Input channel and gain for the next conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Gain {
    /// Channel A, gain 128
    #[default]
    A128,
    /// Channel B, gain 32
    B32,
    /// Channel A, gain 64
    A64,
}

impl Gain {
    /// Extra clock pulses after the 24 data bits
    pub fn pulses(self) -> u8 {
        match self {
            Gain::A128 => 1,
            Gain::B32 => 2,
            Gain::A64 => 3,
        }
    }
}

/// HX711 driver
pub struct Hx711<DOUT, SCK, D> {
    dout: DOUT,
    sck: SCK,
    delay: D,
    gain: Gain,
}

impl<DOUT, SCK, D> Hx711<DOUT, SCK, D>
where
    DOUT: InputPin,
    SCK: OutputPin,
    D: DelayNs,
{
    /// Create a driver at channel A, gain 128
    ///
    /// Drives SCK low, which also wakes the chip from power-down.
    pub fn new(dout: DOUT, mut sck: SCK, delay: D) -> Result<Self, LoadCellError> {
        sck.set_low().map_err(|_| LoadCellError::Pin)?;
        Ok(Self {
            dout,
            sck,
            delay,
            gain: Gain::default(),
        })
    }

    /// Select input and gain, applied from the conversion after next
    pub fn set_gain(&mut self, gain: Gain) {
        self.gain = gain;
    }

    fn pulse(&mut self) -> Result<(), LoadCellError> {
        self.sck.set_high().map_err(|_| LoadCellError::Pin)?;
        self.delay.delay_us(HALF_PERIOD_US);
        self.sck.set_low().map_err(|_| LoadCellError::Pin)?;
        self.delay.delay_us(HALF_PERIOD_US);
        Ok(())
    }

    fn shift_in(&mut self) -> Result<u32, LoadCellError> {
        let mut value: u32 = 0;
        for _ in 0..24 {
            self.sck.set_high().map_err(|_| LoadCellError::Pin)?;
            self.delay.delay_us(HALF_PERIOD_US);
            let bit = self.dout.is_high().map_err(|_| LoadCellError::Pin)?;
            value = (value << 1) | bit as u32;
            self.sck.set_low().map_err(|_| LoadCellError::Pin)?;
            self.delay.delay_us(HALF_PERIOD_US);
        }
        for _ in 0..self.gain.pulses() {
            self.pulse()?;
        }
        Ok(value)
    }
}

/// Sign-extend a 24-bit two's complement value
pub fn sign_extend_24(raw: u32) -> i32 {
    ((raw << 8) as i32) >> 8
}

impl<DOUT, SCK, D> LoadCell for Hx711<DOUT, SCK, D>
where
    DOUT: InputPin,
    SCK: OutputPin,
    D: DelayNs,
{
    fn is_ready(&mut self) -> bool {
        self.dout.is_low().unwrap_or(false)
    }

    fn read(&mut self) -> Result<i32, LoadCellError> {
        let raw = self.shift_in()?;
        Ok(sign_extend_24(raw))
    }
}
