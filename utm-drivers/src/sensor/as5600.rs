//! AS5600 12-bit magnetic rotary encoder
//!
//! Register reads are plain write-read transactions. Position and speed
//! tracking is pure arithmetic on successive angle readings so it can be kept
//! per channel and tested without a bus.

use embedded_hal::i2c::I2c;

/// Fixed device address
pub const AS5600_ADDR: u8 = 0x36;

/// Register addresses
pub mod reg {
    /// Status (MD/ML/MH flags)
    pub const STATUS: u8 = 0x0B;
    /// Unscaled angle, high byte first
    pub const RAW_ANGLE: u8 = 0x0C;
    /// Scaled angle, high byte first
    pub const ANGLE: u8 = 0x0E;
    /// CORDIC magnitude, high byte first
    pub const MAGNITUDE: u8 = 0x1B;
}

/// STATUS bit: magnet detected
pub const STATUS_MD: u8 = 0x20;

/// Counts per revolution
pub const COUNTS_PER_REV: i32 = 4096;

/// One raw count in degrees
pub const RAW_TO_DEGREES: f32 = 360.0 / 4096.0;

const HALF_REV: i32 = COUNTS_PER_REV / 2;

/// Read a 12-bit register pair
pub fn read_u12<I: I2c>(i2c: &mut I, register: u8) -> Result<u16, I::Error> {
    let mut buf = [0u8; 2];
    i2c.write_read(AS5600_ADDR, &[register], &mut buf)?;
    Ok(u16::from_be_bytes(buf) & 0x0FFF)
}

/// Check the magnet-detected flag
pub fn magnet_detected<I: I2c>(i2c: &mut I) -> Result<bool, I::Error> {
    let mut status = [0u8; 1];
    i2c.write_read(AS5600_ADDR, &[reg::STATUS], &mut status)?;
    Ok(status[0] & STATUS_MD != 0)
}

/// Position and speed tracking for one sensor
///
/// Consecutive readings are assumed to be less than half a turn apart; a
/// larger jump is read as a wrap through zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChannelTracker {
    /// Accumulated position in counts
    position: i32,
    /// Angle at the last position update
    last_position_angle: i32,
    /// Angle at the last speed update
    last_speed_angle: i32,
    /// Timestamp of the last speed update (µs)
    last_speed_us: u64,
}

impl ChannelTracker {
    pub const fn new() -> Self {
        Self {
            position: 0,
            last_position_angle: 0,
            last_speed_angle: 0,
            last_speed_us: 0,
        }
    }

    /// Fold a new angle into the cumulative position
    pub fn update_position(&mut self, angle: u16) -> i32 {
        let value = angle as i32;
        let last = self.last_position_angle;

        let delta = if last > HALF_REV && value < last - HALF_REV {
            // Forward through zero
            COUNTS_PER_REV - last + value
        } else if value > HALF_REV && last < value - HALF_REV {
            // Backward through zero
            -COUNTS_PER_REV - last + value
        } else {
            value - last
        };

        self.position = self.position.wrapping_add(delta);
        self.last_position_angle = value;
        self.position
    }

    /// Angular speed in degrees per second since the previous call
    ///
    /// Returns 0 when no time has elapsed.
    pub fn update_speed(&mut self, angle: u16, now_us: u64) -> f32 {
        let value = angle as i32;
        let mut delta = value - self.last_speed_angle;
        if delta > HALF_REV {
            delta -= COUNTS_PER_REV;
        }
        if delta < -HALF_REV {
            delta += COUNTS_PER_REV;
        }

        let elapsed_us = now_us.wrapping_sub(self.last_speed_us);
        self.last_speed_angle = value;
        self.last_speed_us = now_us;

        if elapsed_us == 0 {
            return 0.0;
        }
        let counts_per_s = delta as f32 * 1_000_000.0 / elapsed_us as f32;
        counts_per_s * RAW_TO_DEGREES
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_first_reading_counts_from_zero() {
        let mut tracker = ChannelTracker::new();
        assert_eq!(tracker.update_position(1000), 1000);
        assert_eq!(tracker.update_position(1100), 1100);
    }

    #[test]
    fn test_forward_wrap() {
        let mut tracker = ChannelTracker::new();
        tracker.update_position(2000);
        tracker.update_position(4000);
        assert_eq!(tracker.update_position(100), 4096 + 100);
    }

    #[test]
    fn test_backward_wrap() {
        let mut tracker = ChannelTracker::new();
        tracker.update_position(100);
        assert_eq!(tracker.update_position(4000), 100 - 196);
    }

    #[test]
    fn test_speed_one_rev_per_second() {
        let mut tracker = ChannelTracker::new();
        tracker.update_speed(0, 1_000_000);
        // Quarter turn in 250 ms
        let speed = tracker.update_speed(1024, 1_250_000);
        assert!((speed - 360.0).abs() < 1e-3);
    }

    #[test]
    fn test_speed_through_zero_is_negative() {
        let mut tracker = ChannelTracker::new();
        tracker.update_speed(10, 0);
        let speed = tracker.update_speed(4086, 100_000);
        // -20 counts in 0.1 s
        assert!((speed - (-20.0 * 10.0 * RAW_TO_DEGREES)).abs() < 1e-3);
    }

    #[test]
    fn test_speed_without_elapsed_time() {
        let mut tracker = ChannelTracker::new();
        assert_eq!(tracker.update_speed(500, 0), 0.0);
    }

    proptest! {
        #[test]
        fn prop_small_steps_accumulate_exactly(
            start in 0u16..4096,
            steps in proptest::collection::vec(-2000i32..2000, 1..50),
        ) {
            let mut tracker = ChannelTracker::new();
            let mut expected = tracker.update_position(start);
            let mut angle = start as i32;
            for step in steps {
                angle = (angle + step).rem_euclid(4096);
                expected += step;
                prop_assert_eq!(tracker.update_position(angle as u16), expected);
            }
        }
    }
}
