//! Soft timers
//!
//! A soft timer is a last-service timestamp plus a period, compared with
//! wrapping millisecond arithmetic so it survives the 49.7 day rollover.

/// Fixed-period soft timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Interval {
    period_ms: u32,
    last_ms: u32,
}

impl Interval {
    /// Create a timer whose reference point is time zero
    pub const fn new(period_ms: u32) -> Self {
        Self {
            period_ms,
            last_ms: 0,
        }
    }

    /// Check if the period has elapsed without restarting the timer
    pub fn is_due(&self, now_ms: u32) -> bool {
        now_ms.wrapping_sub(self.last_ms) >= self.period_ms
    }

    /// If the period has elapsed, restart from `now_ms` and return true
    pub fn poll(&mut self, now_ms: u32) -> bool {
        if self.is_due(now_ms) {
            self.last_ms = now_ms;
            true
        } else {
            false
        }
    }
}

/// Milliseconds from `start_ms` to `now_ms` on a wrapping counter
pub fn elapsed_ms(start_ms: u32, now_ms: u32) -> u32 {
    now_ms.wrapping_sub(start_ms)
}
