//! Embassy-backed time sources

use embassy_time::Instant;
use utm_core::traits::Clock;

/// [`Clock`] reading the embassy time driver
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now_us(&self) -> u64 {
        Instant::now().as_micros()
    }
}
