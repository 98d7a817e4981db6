//! PIO step pulse timing
//!
//! The step program toggles the STEP pin with a software delay loop, so one
//! state machine covers everything from fractions of a step per second up to
//! the driver's limit. The delay count for each half period is pulled from
//! the TX FIFO at the start of every period; when the FIFO is empty the last
//! count is reused.
//!
//! # Cycle budget
//!
//! ```text
//! pull noblock   1
//! mov x, osr     1
//! set pins, 1    1
//! mov y, x       1
//! jmp y-- (hi)   x + 1
//! set pins, 0    1
//! mov y, x       1
//! jmp y-- (lo)   x + 1
//! ```
//!
//! One step period is `2x + 8` state machine cycles.

/// System clock frequency (RP2040 default)
pub const SYS_CLK_HZ: u32 = 125_000_000;

/// Fixed cycles per step period outside the two delay loops
pub const OVERHEAD_CYCLES: u64 = 8;

/// Minimum pulse width in nanoseconds (2.5µs is safe for all drivers)
pub const MIN_PULSE_WIDTH_NS: u32 = 2500;

/// Maximum step frequency in Hz (limited by pulse width)
pub const MAX_STEP_FREQ_HZ: u32 = 200_000;

/// Step generator configuration
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepGeneratorConfig {
    /// Enable pin is active low
    pub enable_inverted: bool,
    /// DIR level for increasing step count
    pub positive_dir_high: bool,
    /// Steps per revolution (including microstepping)
    pub steps_per_rev: u32,
}

impl Default for StepGeneratorConfig {
    fn default() -> Self {
        Self {
            enable_inverted: false,
            positive_dir_high: true,
            steps_per_rev: utm_core::config::STEPS_PER_REV,
        }
    }
}

/// Delay count loaded into X for a step rate in milli-steps per second
///
/// Returns `None` for a zero rate. Rates above [`MAX_STEP_FREQ_HZ`] are
/// clamped to it.
pub fn half_period_count(rate_msps: u64) -> Option<u32> {
    if rate_msps == 0 {
        return None;
    }
    let rate_msps = rate_msps.min(MAX_STEP_FREQ_HZ as u64 * 1000);

    // period_cycles = SYS_CLK * 1000 / rate_msps
    let period_cycles = SYS_CLK_HZ as u64 * 1000 / rate_msps;
    let count = period_cycles.saturating_sub(OVERHEAD_CYCLES) / 2;
    Some(count.min(u32::MAX as u64) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_rate_stops() {
        assert_eq!(half_period_count(0), None);
    }

    #[test]
    fn test_count_for_one_khz() {
        // 125_000 cycles per period
        assert_eq!(half_period_count(1_000_000), Some(62_496));
    }

    #[test]
    fn test_slow_rates_fit() {
        // One step per second
        let count = half_period_count(1_000).unwrap();
        assert_eq!(count, 62_499_996);
    }

    #[test]
    fn test_fast_rate_is_clamped() {
        let max = half_period_count(MAX_STEP_FREQ_HZ as u64 * 1000).unwrap();
        assert_eq!(half_period_count(u64::MAX), Some(max));
        // High phase stays above the minimum pulse width
        let high_ns = (max as u64 + 3) * 1_000_000_000 / SYS_CLK_HZ as u64;
        assert!(high_ns >= MIN_PULSE_WIDTH_NS as u64 - 100);
    }
}
