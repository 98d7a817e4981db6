//! Test doubles for the hardware traits

use std::collections::VecDeque;
use std::vec::Vec;

use crate::traits::{
    Button, Buttons, LoadCell, LoadCellError, MotionController, PositionSensors, Rotation,
    SensorError, SpeedMode, SpeedSelector,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionCall {
    SetSpeed(i32),
    Rotate(Rotation),
    Move(i64),
    Halt,
    RampLen(i32),
    Enable(bool),
}

/// Records every motion call
#[derive(Default)]
pub struct MockMotion {
    pub calls: Vec<MotionCall>,
    pub steps: i64,
    pub serviced: Vec<u32>,
}

impl MotionController for MockMotion {
    fn set_speed(&mut self, rpm_x10: i32) {
        self.calls.push(MotionCall::SetSpeed(rpm_x10));
    }

    fn rotate(&mut self, rotation: Rotation) {
        self.calls.push(MotionCall::Rotate(rotation));
    }

    fn move_steps(&mut self, steps: i64) {
        self.calls.push(MotionCall::Move(steps));
    }

    fn halt(&mut self) {
        self.calls.push(MotionCall::Halt);
    }

    fn set_ramp_len(&mut self, steps: i32) -> u32 {
        self.calls.push(MotionCall::RampLen(steps));
        steps.clamp(0, 16_000) as u32
    }

    fn read_steps(&self) -> i64 {
        self.steps
    }

    fn enable(&mut self, enabled: bool) {
        self.calls.push(MotionCall::Enable(enabled));
    }

    fn service(&mut self, now_ms: u32) {
        self.serviced.push(now_ms);
    }
}

/// Sensor bank returning scripted values
#[derive(Default)]
pub struct MockSensors {
    pub position: i32,
    pub speed_deg_s: f32,
    pub fail: bool,
    pub reads: Vec<u8>,
}

impl PositionSensors for MockSensors {
    fn select_channel(&mut self, _channel: u8) {}

    fn read_angle(&mut self, channel: u8) -> Result<f32, SensorError> {
        self.reads.push(channel);
        Ok(0.0)
    }

    fn read_cumulative_position(&mut self, channel: u8) -> Result<i32, SensorError> {
        self.reads.push(channel);
        if self.fail {
            Err(SensorError::Bus)
        } else {
            Ok(self.position)
        }
    }

    fn read_angular_speed(&mut self, channel: u8) -> Result<f32, SensorError> {
        self.reads.push(channel);
        if self.fail {
            Err(SensorError::Bus)
        } else {
            Ok(self.speed_deg_s)
        }
    }
}

/// Load cell with a queue of pending conversions
#[derive(Default)]
pub struct MockLoad {
    pub pending: VecDeque<Result<i32, LoadCellError>>,
}

impl LoadCell for MockLoad {
    fn is_ready(&mut self) -> bool {
        !self.pending.is_empty()
    }

    fn read(&mut self) -> Result<i32, LoadCellError> {
        self.pending.pop_front().unwrap_or(Err(LoadCellError::Pin))
    }
}

/// Buttons with injectable edge flags
#[derive(Default)]
pub struct MockButtons {
    pub pressed: [bool; 2],
    pub released: [bool; 2],
    pub processed: usize,
}

impl Buttons for MockButtons {
    fn process(&mut self, _now_ms: u32) {
        self.processed += 1;
    }

    fn pressed(&mut self, button: Button) -> bool {
        core::mem::take(&mut self.pressed[button.index()])
    }

    fn released(&mut self, button: Button) -> bool {
        core::mem::take(&mut self.released[button.index()])
    }
}

pub struct MockSwitch(pub SpeedMode);

impl SpeedSelector for MockSwitch {
    fn speed_mode(&mut self) -> SpeedMode {
        self.0
    }
}
