//! State owned by the control loop

use utm_protocol::CommandLine;

use crate::telemetry::{SpeedWindow, TelemetrySnapshot};

/// Everything the loop remembers between iterations
///
/// Command handlers and the streaming reporter receive it by reference;
/// there is no other writer.
#[derive(Debug, Clone, Default)]
pub struct RigState {
    /// Latest sensor and load values
    pub telemetry: TelemetrySnapshot,
    /// Stream each new load reading
    pub stream_load: bool,
    /// Stream position and speed every sensor period
    pub stream_sensors: bool,
    /// Recent speed samples
    pub speed_window: SpeedWindow,
    /// Most recently received command line
    pub line: CommandLine,
}

impl RigState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a speed sample and refresh the average
    pub fn record_speed(&mut self, rpm: f32) {
        self.telemetry.angular_speed = rpm;
        self.speed_window.push(rpm);
        self.telemetry.averaged_angular_speed = self.speed_window.average();
    }
}
