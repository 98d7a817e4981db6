//! Cooperative control loop
//!
//! One [`ControlLoop::tick`] runs every periodic activity once, in a fixed
//! order, without blocking on anything but the bounded line read:
//!
//! 1. read and dispatch at most one command, servicing motion while a
//!    partial line is pending
//! 2. debounce the jog buttons and act on their edges
//! 3. take a load reading if one is waiting
//! 4. poll the active rotary sensor when its period elapses
//! 5. service the motion controller

pub mod dispatch;
pub mod jog;
pub mod state;

#[cfg(test)]
pub(crate) mod mock;

use embedded_io::{Read, ReadReady, Write};
use utm_protocol::{Command, StreamLine};

use crate::config::RigConfig;
use crate::serial::read_line;
use crate::timing::Interval;
use crate::traits::{Buttons, Clock, LoadCell, MotionController, PositionSensors, SpeedSelector};

pub use dispatch::{dispatch, send};
pub use state::RigState;

/// Orchestrator owning the rig peripherals and state
pub struct ControlLoop<P, C, M, S, L, B, K> {
    config: RigConfig,
    state: RigState,
    port: P,
    clock: C,
    motion: M,
    sensors: S,
    load: L,
    buttons: B,
    switch: K,
    load_timer: Interval,
    sensor_timer: Interval,
}

impl<P, C, M, S, L, B, K> ControlLoop<P, C, M, S, L, B, K>
where
    P: Read + ReadReady + Write,
    C: Clock,
    M: MotionController,
    S: PositionSensors,
    L: LoadCell,
    B: Buttons,
    K: SpeedSelector,
{
    /// Assemble the loop from initialized peripherals
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        config: RigConfig,
        port: P,
        clock: C,
        motion: M,
        sensors: S,
        load: L,
        buttons: B,
        switch: K,
    ) -> Self {
        Self {
            load_timer: Interval::new(config.load_period_ms),
            sensor_timer: Interval::new(config.sensor_period_ms),
            config,
            state: RigState::new(),
            port,
            clock,
            motion,
            sensors,
            load,
            buttons,
            switch,
        }
    }

    /// Run one loop iteration
    pub fn tick(&mut self) {
        self.poll_command();
        self.poll_buttons();
        self.poll_load_cell();
        self.poll_sensors();
        self.motion.service(self.clock.now_ms());
    }

    fn poll_command(&mut self) {
        let motion = &mut self.motion;
        if !read_line(
            &mut self.port,
            &self.clock,
            &mut self.state.line,
            self.config.line_timeout_ms,
            |now_ms| motion.service(now_ms),
        ) {
            return;
        }

        // Unknown verbs are dropped without a reply
        if let Some(command) = Command::parse(&self.state.line) {
            dispatch(
                command,
                &mut self.state,
                &mut self.motion,
                &mut self.port,
                &self.config,
            );
        }
    }

    fn poll_buttons(&mut self) {
        self.buttons.process(self.clock.now_ms());
        let mode = self.switch.speed_mode();
        jog::handle_edges(
            &mut self.buttons,
            mode,
            &mut self.motion,
            &mut self.port,
            &self.config,
        );
    }

    fn poll_load_cell(&mut self) {
        if !self.load.is_ready() {
            return;
        }
        let Ok(force) = self.load.read() else {
            return;
        };
        self.state.telemetry.last_force = force;

        if self.state.stream_load && self.load_timer.poll(self.clock.now_ms()) {
            send(&mut self.port, StreamLine::Load(force));
        }
    }

    fn poll_sensors(&mut self) {
        if !self.sensor_timer.poll(self.clock.now_ms()) {
            return;
        }

        let channel = self.config.active_channel;
        if let Ok(position) = self.sensors.read_cumulative_position(channel) {
            self.state.telemetry.cumulative_position = position;
        }
        if let Ok(deg_per_s) = self.sensors.read_angular_speed(channel) {
            let rpm = deg_per_s / self.config.speed_divisor as f32;
            self.state.record_speed(rpm);
        }

        if self.state.stream_sensors {
            let telemetry = &self.state.telemetry;
            send(
                &mut self.port,
                StreamLine::Sensors {
                    position: telemetry.cumulative_position,
                    rpm: telemetry.angular_speed,
                    average_rpm: telemetry.averaged_angular_speed,
                },
            );
        }
    }

    /// Loop state
    pub fn state(&self) -> &RigState {
        &self.state
    }
}
