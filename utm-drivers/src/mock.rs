//! Bus and pin doubles shared by the driver tests

use core::cell::Cell;
use std::vec::Vec;

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{self, ErrorKind, ErrorType, I2c, NoAcknowledgeSource, Operation};
use utm_core::traits::Clock;

use crate::sensor::as5600::{reg, AS5600_ADDR};
use crate::sensor::mux::TCA9548A_ADDR;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockI2cError(pub ErrorKind);

impl i2c::Error for MockI2cError {
    fn kind(&self) -> ErrorKind {
        self.0
    }
}

/// Multiplexer plus two AS5600s, and any extra responders for scans
pub struct MockBus {
    pub selected: Option<u8>,
    pub angle: [u16; 2],
    pub raw_angle: [u16; 2],
    pub magnitude: [u16; 2],
    /// Status reads that report no magnet before one is detected
    pub magnet_misses: [usize; 2],
    /// Addresses that acknowledge besides the mux and the sensors
    pub extra_devices: Vec<u8>,
    /// Addresses that fail with a non-NACK error
    pub faulty: Vec<u8>,
    /// Every write as (address, bytes)
    pub writes: Vec<(u8, Vec<u8>)>,
    pub fail_all: bool,
    register: u8,
}

impl Default for MockBus {
    fn default() -> Self {
        Self {
            selected: None,
            angle: [0; 2],
            raw_angle: [0; 2],
            magnitude: [0; 2],
            magnet_misses: [0; 2],
            extra_devices: Vec::new(),
            faulty: Vec::new(),
            writes: Vec::new(),
            fail_all: false,
            register: 0,
        }
    }
}

impl MockBus {
    pub fn mux_writes(&self) -> usize {
        self.writes
            .iter()
            .filter(|(addr, _)| *addr == TCA9548A_ADDR)
            .count()
    }

    fn read_register(&mut self, buf: &mut [u8]) -> Result<(), MockI2cError> {
        let channel = match self.selected {
            Some(ch) if (ch as usize) < 2 => ch as usize,
            _ => return Err(MockI2cError(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address))),
        };
        let value: u16 = match self.register {
            reg::STATUS => {
                if self.magnet_misses[channel] > 0 {
                    self.magnet_misses[channel] -= 1;
                    0x00
                } else {
                    0x20
                }
            }
            reg::ANGLE => self.angle[channel],
            reg::RAW_ANGLE => self.raw_angle[channel],
            reg::MAGNITUDE => self.magnitude[channel],
            _ => 0,
        };
        if buf.len() == 1 {
            buf[0] = value as u8;
        } else {
            buf[..2].copy_from_slice(&value.to_be_bytes());
        }
        Ok(())
    }
}

impl ErrorType for MockBus {
    type Error = MockI2cError;
}

impl I2c for MockBus {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        if self.fail_all || self.faulty.contains(&address) {
            return Err(MockI2cError(ErrorKind::Bus));
        }
        let present = address == TCA9548A_ADDR
            || address == AS5600_ADDR
            || self.extra_devices.contains(&address);
        if !present {
            return Err(MockI2cError(ErrorKind::NoAcknowledge(
                NoAcknowledgeSource::Address,
            )));
        }

        for op in operations {
            match op {
                Operation::Write(bytes) => {
                    self.writes.push((address, bytes.to_vec()));
                    if address == TCA9548A_ADDR {
                        if let Some(&mask) = bytes.first() {
                            self.selected = Some(mask.trailing_zeros() as u8);
                        }
                    } else if address == AS5600_ADDR {
                        if let Some(&register) = bytes.first() {
                            self.register = register;
                        }
                    }
                }
                Operation::Read(buf) => {
                    if address == AS5600_ADDR {
                        self.read_register(buf)?;
                    }
                }
            }
        }
        Ok(())
    }
}

/// Clock set by hand
#[derive(Default)]
pub struct ManualClock {
    pub us: Cell<u64>,
}

impl ManualClock {
    pub fn set_us(&self, us: u64) {
        self.us.set(us);
    }
}

impl Clock for ManualClock {
    fn now_us(&self) -> u64 {
        self.us.get()
    }
}

/// Delay that only accumulates the requested time
#[derive(Default)]
pub struct MockDelay {
    pub total_ns: u64,
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += ns as u64;
    }
}
