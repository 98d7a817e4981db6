//! Ramp-planned motion on the PIO stepper
//!
//! The planner integrates speed into an open-loop step position; the PIO
//! generator follows the planner's speed. `read_steps` reports the planned
//! position.

use embassy_rp::pio::Instance;
use utm_core::motion::{MotionState, RampPlanner};
use utm_core::traits::{MotionController, Rotation};

use crate::stepper::PioStepper;

/// [`MotionController`] backed by a PIO step generator
pub struct PioMotion<'d, PIO: Instance, const SM: usize> {
    stepper: PioStepper<'d, PIO, SM>,
    planner: RampPlanner,
    /// Planner state at the last service, for transition logging
    last_state: MotionState,
}

impl<'d, PIO: Instance, const SM: usize> PioMotion<'d, PIO, SM> {
    pub fn new(stepper: PioStepper<'d, PIO, SM>) -> Self {
        let planner = RampPlanner::new(stepper.steps_per_rev());
        Self {
            stepper,
            planner,
            last_state: MotionState::Stopped,
        }
    }

    fn note_state(&mut self) {
        let state = self.planner.state();
        if state == self.last_state {
            return;
        }
        #[cfg(feature = "defmt")]
        defmt::debug!(
            "motion {} -> {} ({}) at step {}",
            self.last_state,
            state,
            self.planner.mode(),
            self.planner.read_steps()
        );
        self.last_state = state;
    }

    fn apply_speed(&mut self) {
        let speed = self.planner.speed_msps();
        if speed != 0 {
            self.stepper.set_direction(speed > 0);
        }
        self.stepper.set_rate(speed.unsigned_abs());
    }
}

impl<'d, PIO: Instance, const SM: usize> MotionController for PioMotion<'d, PIO, SM> {
    fn set_speed(&mut self, rpm_x10: i32) {
        self.planner.set_speed(rpm_x10);
    }

    fn rotate(&mut self, rotation: Rotation) {
        self.planner.rotate(rotation);
    }

    fn move_steps(&mut self, steps: i64) {
        self.planner.move_steps(steps);
    }

    fn halt(&mut self) {
        self.planner.halt();
        self.stepper.stop();
    }

    fn set_ramp_len(&mut self, steps: i32) -> u32 {
        self.planner.set_ramp_len(steps)
    }

    fn read_steps(&self) -> i64 {
        self.planner.read_steps()
    }

    fn enable(&mut self, enabled: bool) {
        if enabled {
            self.stepper.enable();
        } else {
            self.stepper.disable();
        }
    }

    fn service(&mut self, now_ms: u32) {
        self.planner.update(now_ms);
        self.apply_speed();
        self.note_state();
    }
}
