//! Ramp planner for velocity and relative-move stepper control
//!
//! The ramp is expressed as a length in steps: the distance needed to reach
//! the commanded speed from standstill. Acceleration follows from
//! `a = v² / (2 · ramp_len)`, so the ramp length stays constant when the
//! speed changes.
//!
//! Internally speed is kept in milli-steps per second and position in
//! micro-steps, so integer updates at 1 ms granularity stay exact.

use crate::config::{MAX_RAMP_LEN, STEPS_PER_REV};
use crate::timing::elapsed_ms;
use crate::traits::Rotation;

/// Micro-steps per step in the position accumulator
const USTEPS_PER_STEP: i64 = 1_000_000;

/// Slowest approach speed toward a move target (milli-steps/s)
const MIN_CREEP_MSPS: u64 = 1_000;

/// Current motion state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotionState {
    /// Motor is stopped
    Stopped,
    /// Motor is accelerating toward target
    Accelerating,
    /// Motor is at target speed
    AtSpeed,
    /// Motor is decelerating
    Decelerating,
}

/// What the planner is currently trying to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotionMode {
    /// Standing still, nothing commanded
    Idle,
    /// Continuous rotation at the commanded speed
    Rotating { negative: bool },
    /// Ramping down to standstill
    Stopping,
    /// Travelling to an absolute step target
    Moving { target_steps: i64 },
}

/// Ramp planner
///
/// Feed it elapsed time with [`RampPlanner::update`]; it reports the signed
/// speed the step generator should run at and tracks the resulting position.
#[derive(Debug, Clone)]
pub struct RampPlanner {
    /// Output steps per motor revolution
    steps_per_rev: u32,
    /// Commanded speed magnitude (milli-steps/s)
    cruise_msps: u64,
    /// Signed current speed (milli-steps/s)
    speed_msps: i64,
    /// Position accumulator (micro-steps)
    position_usteps: i64,
    /// Ramp length (steps); 0 disables ramping
    ramp_len: u32,
    mode: MotionMode,
    last_ms: Option<u32>,
}

impl Default for RampPlanner {
    fn default() -> Self {
        Self::new(STEPS_PER_REV)
    }
}

impl RampPlanner {
    /// Create an idle planner
    pub fn new(steps_per_rev: u32) -> Self {
        Self {
            steps_per_rev,
            cruise_msps: 0,
            speed_msps: 0,
            position_usteps: 0,
            ramp_len: 0,
            mode: MotionMode::Idle,
            last_ms: None,
        }
    }

    /// Set the commanded speed in RPM × 10
    ///
    /// Only the magnitude counts; direction comes from the motion command.
    pub fn set_speed(&mut self, rpm_x10: i32) {
        self.cruise_msps =
            rpm_x10.unsigned_abs() as u64 * self.steps_per_rev as u64 * 1000 / 600;
    }

    /// Commanded speed magnitude (milli-steps/s)
    pub fn cruise_msps(&self) -> u64 {
        self.cruise_msps
    }

    /// Start continuous rotation, or ramp down on [`Rotation::Stop`]
    pub fn rotate(&mut self, rotation: Rotation) {
        self.mode = match rotation {
            Rotation::Negative => MotionMode::Rotating { negative: true },
            Rotation::Positive => MotionMode::Rotating { negative: false },
            Rotation::Stop if self.speed_msps == 0 => MotionMode::Idle,
            Rotation::Stop => MotionMode::Stopping,
        };
    }

    /// Travel `steps` relative to the current position
    pub fn move_steps(&mut self, steps: i64) {
        let target_steps = self.read_steps().saturating_add(steps);
        self.mode = MotionMode::Moving { target_steps };
    }

    /// Stop immediately
    pub fn halt(&mut self) {
        self.speed_msps = 0;
        self.mode = MotionMode::Idle;
    }

    /// Set the ramp length, clamped to `0..=MAX_RAMP_LEN`
    pub fn set_ramp_len(&mut self, steps: i32) -> u32 {
        self.ramp_len = (steps.max(0) as u32).min(MAX_RAMP_LEN);
        self.ramp_len
    }

    /// Applied ramp length (steps)
    pub fn ramp_len(&self) -> u32 {
        self.ramp_len
    }

    /// Current position in whole steps
    pub fn read_steps(&self) -> i64 {
        self.position_usteps / USTEPS_PER_STEP
    }

    /// Signed current speed (milli-steps/s)
    pub fn speed_msps(&self) -> i64 {
        self.speed_msps
    }

    /// Current motion mode
    pub fn mode(&self) -> MotionMode {
        self.mode
    }

    /// Current motion state
    pub fn state(&self) -> MotionState {
        let desired = self.desired_speed();
        let current = self.speed_msps;

        if current == 0 && desired == 0 {
            MotionState::Stopped
        } else if current == desired {
            MotionState::AtSpeed
        } else if current.signum() * desired.signum() >= 0 && current.abs() < desired.abs() {
            MotionState::Accelerating
        } else {
            MotionState::Decelerating
        }
    }

    /// Advance to `now_ms`
    ///
    /// The first call only establishes the time base.
    pub fn update(&mut self, now_ms: u32) {
        let dt_ms = match self.last_ms {
            Some(last) => elapsed_ms(last, now_ms),
            None => 0,
        };
        self.last_ms = Some(now_ms);
        self.advance(dt_ms);
    }

    /// Advance by `dt_ms` milliseconds
    pub fn advance(&mut self, dt_ms: u32) {
        if dt_ms == 0 {
            return;
        }

        if let MotionMode::Moving { target_steps } = self.mode {
            if self.position_usteps == target_steps.saturating_mul(USTEPS_PER_STEP)
                && self.speed_msps == 0
            {
                self.mode = MotionMode::Idle;
                return;
            }
        }

        let desired = self.desired_speed();
        self.speed_msps = match self.max_speed_change(dt_ms) {
            Some(limit) => approach(self.speed_msps, desired, limit),
            None => desired,
        };

        let before = self.position_usteps;
        self.position_usteps = before.saturating_add(self.speed_msps.saturating_mul(dt_ms as i64));

        match self.mode {
            MotionMode::Moving { target_steps } => {
                let target = target_steps.saturating_mul(USTEPS_PER_STEP);
                let crossed = (before < target && self.position_usteps >= target)
                    || (before > target && self.position_usteps <= target);
                if crossed {
                    // A move shorter than the braking distance ends at the target
                    self.position_usteps = target;
                    self.speed_msps = 0;
                    self.mode = MotionMode::Idle;
                }
            }
            MotionMode::Stopping if self.speed_msps == 0 => self.mode = MotionMode::Idle,
            _ => {}
        }
    }

    /// Acceleration in milli-steps/s², or `None` for an instant speed change
    fn acceleration(&self) -> Option<u64> {
        if self.ramp_len == 0 || self.cruise_msps == 0 {
            return None;
        }
        let v = self.cruise_msps as u128;
        let accel = v * v / (2 * self.ramp_len as u128 * 1000);
        Some(accel.max(1).min(u64::MAX as u128) as u64)
    }

    fn max_speed_change(&self, dt_ms: u32) -> Option<i64> {
        self.acceleration()
            .map(|a| (a.saturating_mul(dt_ms as u64) / 1000).clamp(1, i64::MAX as u64) as i64)
    }

    /// Signed speed the planner is steering toward
    fn desired_speed(&self) -> i64 {
        let cruise = self.cruise_msps.min(i64::MAX as u64) as i64;
        match self.mode {
            MotionMode::Idle | MotionMode::Stopping => 0,
            MotionMode::Rotating { negative: true } => -cruise,
            MotionMode::Rotating { negative: false } => cruise,
            MotionMode::Moving { target_steps } => {
                let remaining = target_steps
                    .saturating_mul(USTEPS_PER_STEP)
                    .saturating_sub(self.position_usteps);
                if remaining == 0 {
                    return 0;
                }
                let magnitude = match self.acceleration() {
                    Some(accel) => {
                        let remaining_msteps = (remaining.unsigned_abs() / 1000) as u128;
                        let braking = isqrt(2 * accel as u128 * remaining_msteps);
                        let braking = braking.min(u64::MAX as u128) as u64;
                        braking
                            .min(self.cruise_msps)
                            .max(MIN_CREEP_MSPS.min(self.cruise_msps))
                    }
                    None => self.cruise_msps,
                };
                let magnitude = magnitude.min(i64::MAX as u64) as i64;
                if remaining < 0 {
                    -magnitude
                } else {
                    magnitude
                }
            }
        }
    }
}

/// Move `current` toward `target` by at most `limit`
fn approach(current: i64, target: i64, limit: i64) -> i64 {
    if current < target {
        current.saturating_add(limit).min(target)
    } else {
        current.saturating_sub(limit).max(target)
    }
}

/// Integer square root (floor)
fn isqrt(n: u128) -> u128 {
    if n < 2 {
        return n;
    }
    let mut x = n;
    let mut y = (x + n / x) / 2;
    while y < x {
        x = y;
        y = (x + n / x) / 2;
    }
    x
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn run_until_idle(planner: &mut RampPlanner, dt_ms: u32, max_iterations: usize) -> usize {
        for i in 0..max_iterations {
            if planner.mode() == MotionMode::Idle && planner.speed_msps() == 0 {
                return i;
            }
            planner.advance(dt_ms);
        }
        max_iterations
    }

    #[test]
    fn test_speed_conversion() {
        let mut planner = RampPlanner::new(1600);
        planner.set_speed(1000);
        // 100 rpm × 1600 steps / 60 s
        assert_eq!(planner.cruise_msps(), 2_666_666);
        planner.set_speed(-1000);
        assert_eq!(planner.cruise_msps(), 2_666_666);
    }

    #[test]
    fn test_initial_state() {
        let planner = RampPlanner::default();
        assert_eq!(planner.state(), MotionState::Stopped);
        assert_eq!(planner.read_steps(), 0);
        assert_eq!(planner.mode(), MotionMode::Idle);
    }

    #[test]
    fn test_reaches_cruise_speed() {
        let mut planner = RampPlanner::new(1600);
        planner.set_speed(1000);
        planner.set_ramp_len(100);
        planner.rotate(Rotation::Positive);

        planner.advance(1);
        assert_eq!(planner.state(), MotionState::Accelerating);

        for _ in 0..200 {
            planner.advance(1);
        }
        assert_eq!(planner.speed_msps(), 2_666_666);
        assert_eq!(planner.state(), MotionState::AtSpeed);
        assert!(planner.read_steps() > 0);
    }

    #[test]
    fn test_ramped_stop_covers_ramp_length() {
        let mut planner = RampPlanner::new(1600);
        planner.set_speed(1000);
        planner.set_ramp_len(100);
        planner.rotate(Rotation::Positive);
        for _ in 0..200 {
            planner.advance(1);
        }

        let start = planner.read_steps();
        planner.rotate(Rotation::Stop);
        assert_eq!(planner.state(), MotionState::Decelerating);
        run_until_idle(&mut planner, 1, 10_000);

        assert_eq!(planner.state(), MotionState::Stopped);
        let braking = planner.read_steps() - start;
        assert!((90..=110).contains(&braking), "braked over {} steps", braking);
    }

    #[test]
    fn test_negative_rotation() {
        let mut planner = RampPlanner::new(1600);
        planner.set_speed(500);
        planner.rotate(Rotation::Negative);
        planner.advance(10);
        assert!(planner.speed_msps() < 0);
        assert!(planner.read_steps() < 0);
    }

    #[test]
    fn test_move_ends_exactly_on_target() {
        let mut planner = RampPlanner::new(1600);
        planner.set_speed(1000);
        planner.set_ramp_len(100);
        planner.move_steps(1000);

        let iterations = run_until_idle(&mut planner, 1, 100_000);
        assert!(iterations < 100_000);
        assert_eq!(planner.read_steps(), 1000);
        assert_eq!(planner.speed_msps(), 0);
    }

    #[test]
    fn test_moves_are_relative() {
        let mut planner = RampPlanner::new(1600);
        planner.set_speed(2000);
        planner.move_steps(200);
        run_until_idle(&mut planner, 1, 100_000);
        planner.move_steps(-500);
        run_until_idle(&mut planner, 1, 100_000);
        assert_eq!(planner.read_steps(), -300);
    }

    #[test]
    fn test_halt_is_immediate() {
        let mut planner = RampPlanner::new(1600);
        planner.set_speed(1000);
        planner.set_ramp_len(100);
        planner.rotate(Rotation::Positive);
        for _ in 0..50 {
            planner.advance(1);
        }
        assert!(planner.speed_msps() > 0);

        let position = planner.read_steps();
        planner.halt();
        assert_eq!(planner.speed_msps(), 0);
        assert_eq!(planner.state(), MotionState::Stopped);
        planner.advance(10);
        assert_eq!(planner.read_steps(), position);
    }

    #[test]
    fn test_ramp_len_clamped() {
        let mut planner = RampPlanner::default();
        assert_eq!(planner.set_ramp_len(20_000), 16_000);
        assert_eq!(planner.set_ramp_len(-5), 0);
        assert_eq!(planner.set_ramp_len(250), 250);
        assert_eq!(planner.ramp_len(), 250);
    }

    #[test]
    fn test_zero_ramp_is_instant() {
        let mut planner = RampPlanner::new(1600);
        planner.set_speed(600);
        planner.set_ramp_len(0);
        planner.rotate(Rotation::Positive);
        planner.advance(1);
        assert_eq!(planner.speed_msps(), 1_600_000);
    }

    #[test]
    fn test_stop_when_idle_stays_idle() {
        let mut planner = RampPlanner::default();
        planner.rotate(Rotation::Stop);
        assert_eq!(planner.mode(), MotionMode::Idle);
    }

    #[test]
    fn test_reversal_brakes_first() {
        let mut planner = RampPlanner::new(1600);
        planner.set_speed(1000);
        planner.set_ramp_len(100);
        planner.rotate(Rotation::Positive);
        for _ in 0..200 {
            planner.advance(1);
        }
        planner.rotate(Rotation::Negative);
        planner.advance(1);
        assert!(planner.speed_msps() > 0);
        assert_eq!(planner.state(), MotionState::Decelerating);

        for _ in 0..400 {
            planner.advance(1);
        }
        assert_eq!(planner.speed_msps(), -2_666_666);
    }

    #[test]
    fn test_update_uses_wrapping_time() {
        let mut planner = RampPlanner::new(1600);
        planner.set_speed(600);
        planner.rotate(Rotation::Positive);

        planner.update(u32::MAX - 4);
        assert_eq!(planner.read_steps(), 0);
        planner.update(5);
        // 10 ms at 1600 steps/s
        assert_eq!(planner.read_steps(), 16);
    }

    #[test]
    fn test_isqrt() {
        assert_eq!(isqrt(0), 0);
        assert_eq!(isqrt(1), 1);
        assert_eq!(isqrt(15), 3);
        assert_eq!(isqrt(16), 4);
        assert_eq!(isqrt(1 << 100), 1 << 50);
    }

    proptest! {
        #[test]
        fn prop_move_lands_on_target(
            steps in -4_000i64..4_000,
            ramp in 0i32..800,
            rpm_x10 in 200i32..5_000,
        ) {
            let mut planner = RampPlanner::new(1600);
            planner.set_speed(rpm_x10);
            planner.set_ramp_len(ramp);
            planner.move_steps(steps);

            let iterations = run_until_idle(&mut planner, 2, 200_000);
            prop_assert!(iterations < 200_000);
            prop_assert_eq!(planner.read_steps(), steps);
        }
    }
}
