//! Rig configuration
//!
//! Build-time constants for the control loop. There is no runtime config
//! file; boards that differ override fields on [`RigConfig::default`].

/// Full steps per motor revolution
pub const FULL_STEPS_PER_REV: u32 = 200;

/// Driver microstep setting
pub const MICROSTEPS: u32 = 8;

/// Output steps per motor revolution
pub const STEPS_PER_REV: u32 = FULL_STEPS_PER_REV * MICROSTEPS;

/// Number of speed samples in the smoothing window
pub const SMOOTHING_WINDOW: usize = 20;

/// Sensor channels wired to the multiplexer
pub const SENSOR_CHANNELS: u8 = 2;

/// Longest ramp the motion controller accepts, in steps
pub const MAX_RAMP_LEN: u32 = 16_000;

/// Control loop configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RigConfig {
    /// Minimum time between streamed load lines (ms)
    pub load_period_ms: u32,
    /// Sensor poll period (ms)
    pub sensor_period_ms: u32,
    /// A partial command line is cut off this long after its first byte (ms)
    pub line_timeout_ms: u32,
    /// Sensor channel polled by the loop
    pub active_channel: u8,
    /// Degrees/s to rpm
    pub speed_divisor: u16,
    /// Jog speed with the switch in the slow position (rpm × 10)
    pub slow_speed_x10: i32,
    /// Jog speed with the switch in the fast position (rpm × 10)
    pub fast_speed_x10: i32,
    /// Speed used by `Start` (rpm × 10)
    pub start_speed_x10: i32,
    /// Ramp length applied during startup (steps)
    pub initial_ramp_len: i32,
}

impl Default for RigConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl RigConfig {
    /// Default configuration for the reference rig
    pub const fn new() -> Self {
        Self {
            load_period_ms: 50,
            sensor_period_ms: 50,
            line_timeout_ms: 100,
            active_channel: 0,
            speed_divisor: 6,
            slow_speed_x10: 500,
            fast_speed_x10: 5000,
            start_speed_x10: 1000,
            initial_ramp_len: 100,
        }
    }
}
