//! I²C bus scan
//!
//! Probes every 7-bit address with an empty write. An acknowledge means a
//! device is present; a NACK means nothing is there; anything else is
//! reported as a fault on that address.

use embedded_hal::i2c::{Error as _, ErrorKind, I2c};
use heapless::Vec;

/// First and last probed addresses (the reserved 0x00 and 0x7F are skipped)
pub const SCAN_FIRST: u8 = 0x01;
pub const SCAN_LAST: u8 = 0x7E;

const MAX_ENTRIES: usize = 128;

/// Non-NACK failures seen while probing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScanError {
    /// Bus error (misplaced start/stop)
    Bus,
    /// Lost arbitration to another master
    ArbitrationLoss,
    /// Receive overrun
    Overrun,
    /// Anything the HAL could not classify
    Other,
}

impl ScanError {
    fn from_kind(kind: ErrorKind) -> Option<Self> {
        match kind {
            ErrorKind::NoAcknowledge(_) => None,
            ErrorKind::Bus => Some(ScanError::Bus),
            ErrorKind::ArbitrationLoss => Some(ScanError::ArbitrationLoss),
            ErrorKind::Overrun => Some(ScanError::Overrun),
            _ => Some(ScanError::Other),
        }
    }
}

/// Result of a full scan
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// Addresses that acknowledged, ascending
    pub found: Vec<u8, MAX_ENTRIES>,
    /// Addresses that failed with something other than a NACK
    pub faulted: Vec<(u8, ScanError), MAX_ENTRIES>,
}

impl ScanReport {
    /// Check if no device answered
    pub fn is_empty(&self) -> bool {
        self.found.is_empty()
    }
}

/// Probe addresses `SCAN_FIRST..=SCAN_LAST`
pub fn scan_bus<I: I2c>(i2c: &mut I) -> ScanReport {
    let mut report = ScanReport::default();
    for address in SCAN_FIRST..=SCAN_LAST {
        match i2c.write(address, &[]) {
            Ok(()) => {
                let _ = report.found.push(address);
            }
            Err(e) => {
                if let Some(fault) = ScanError::from_kind(e.kind()) {
                    let _ = report.faulted.push((address, fault));
                }
            }
        }
    }
    report
}
