//! Rotary position sensor and load cell traits

/// Errors from the rotary sensor bank
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Bus transaction failed
    Bus,
    /// Channel is not wired on this board
    InvalidChannel,
    /// No magnet in range of the sensor
    NoMagnet,
}

/// Errors from the load cell amplifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LoadCellError {
    /// Data or clock pin access failed
    Pin,
}

/// Bank of multiplexed rotary position sensors
///
/// Every read selects its channel first; the bus is shared and the
/// multiplexer remembers the last selection.
pub trait PositionSensors {
    /// Route the bus to sensor `channel`
    ///
    /// Channels outside the wired range are logged and ignored.
    fn select_channel(&mut self, channel: u8);

    /// Angle in degrees, after the channel's offset
    fn read_angle(&mut self, channel: u8) -> Result<f32, SensorError>;

    /// Cumulative raw position, accumulating 4096 per revolution
    fn read_cumulative_position(&mut self, channel: u8) -> Result<i32, SensorError>;

    /// Angular speed in degrees per second
    fn read_angular_speed(&mut self, channel: u8) -> Result<f32, SensorError>;
}

/// Bridge amplifier for the load cell
pub trait LoadCell {
    /// Check if a conversion is waiting, without side effects
    fn is_ready(&mut self) -> bool;

    /// Consume the newest raw conversion
    fn read(&mut self) -> Result<i32, LoadCellError>;
}
