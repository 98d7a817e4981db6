//! Telemetry snapshot and speed smoothing

use crate::config::SMOOTHING_WINDOW;

/// Latest values gathered by the control loop
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TelemetrySnapshot {
    /// Cumulative raw sensor position
    pub cumulative_position: i32,
    /// Instantaneous speed (rpm)
    pub angular_speed: f32,
    /// Windowed average of `angular_speed` (rpm)
    pub averaged_angular_speed: f32,
    /// Latest raw load reading
    pub last_force: i32,
}

/// Circular buffer of the N most recent speed samples
///
/// Starts zero-filled, so the average ramps up over the first N samples.
#[derive(Debug, Clone, PartialEq)]
pub struct SmoothingWindow<const N: usize> {
    samples: [f32; N],
    cursor: usize,
}

/// Window used by the control loop
pub type SpeedWindow = SmoothingWindow<SMOOTHING_WINDOW>;

impl<const N: usize> Default for SmoothingWindow<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> SmoothingWindow<N> {
    /// Create a zero-filled window
    pub const fn new() -> Self {
        Self {
            samples: [0.0; N],
            cursor: 0,
        }
    }

    /// Overwrite the oldest sample
    pub fn push(&mut self, sample: f32) {
        if N == 0 {
            return;
        }
        self.samples[self.cursor] = sample;
        self.cursor = (self.cursor + 1) % N;
    }

    /// Mean over all N slots
    pub fn average(&self) -> f32 {
        if N == 0 {
            return 0.0;
        }
        self.samples.iter().sum::<f32>() / N as f32
    }

    /// Slot the next sample goes into
    pub fn cursor(&self) -> usize {
        self.cursor
    }
}
