//! Motion controller trait
//!
//! Velocity-oriented stepper control: speed is set separately from the
//! direction of travel, and a stop is either ramped or immediate.

/// Continuous rotation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rotation {
    /// Toward decreasing step count (crosshead up)
    Negative,
    /// Ramp down to standstill
    Stop,
    /// Toward increasing step count (crosshead down)
    Positive,
}

impl Rotation {
    /// Signed unit direction (-1, 0, 1)
    pub fn signum(self) -> i64 {
        match self {
            Rotation::Negative => -1,
            Rotation::Stop => 0,
            Rotation::Positive => 1,
        }
    }
}

/// Trait for the stepper motion controller
///
/// Implementations own the ramp planning and the step output. They are
/// serviced once per control loop iteration through [`MotionController::service`].
pub trait MotionController {
    /// Set the travel speed in RPM × 10
    ///
    /// Takes effect on the current motion, ramping to the new speed.
    fn set_speed(&mut self, rpm_x10: i32);

    /// Rotate continuously, or ramp to a stop with [`Rotation::Stop`]
    fn rotate(&mut self, rotation: Rotation);

    /// Move by a relative number of steps at the current speed
    fn move_steps(&mut self, steps: i64);

    /// Stop immediately, without a ramp
    fn halt(&mut self);

    /// Set the acceleration ramp length in steps
    ///
    /// Returns the ramp length actually applied after clamping.
    fn set_ramp_len(&mut self, steps: i32) -> u32;

    /// Current position in steps since boot
    fn read_steps(&self) -> i64;

    /// Power or unpower the stepper driver stage
    fn enable(&mut self, enabled: bool);

    /// Advance ramping and step output to `now_ms`
    fn service(&mut self, _now_ms: u32) {}
}
