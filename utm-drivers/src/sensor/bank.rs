//! Multiplexed AS5600 sensor bank

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use utm_core::config::SENSOR_CHANNELS;
use utm_core::traits::{Clock, PositionSensors, SensorError};

use super::as5600::{self, reg, ChannelTracker, RAW_TO_DEGREES};
use super::mux::{MuxError, Tca9548a};

const CHANNELS: usize = SENSOR_CHANNELS as usize;

/// Default wait between magnet checks during startup (ms)
pub const MAGNET_RETRY_MS: u32 = 1000;

/// AS5600 sensors behind a TCA9548A, each with its own tracking state
pub struct SensorBank<I, C> {
    i2c: I,
    clock: C,
    mux: Tca9548a,
    trackers: [ChannelTracker; CHANNELS],
    /// Subtracted from `read_angle` (degrees)
    offsets: [f32; CHANNELS],
}

impl<I: I2c, C: Clock> SensorBank<I, C> {
    /// Create a bank using the default multiplexer address
    pub fn new(i2c: I, clock: C) -> Self {
        Self::with_mux(i2c, clock, Tca9548a::default())
    }

    pub fn with_mux(i2c: I, clock: C, mux: Tca9548a) -> Self {
        Self {
            i2c,
            clock,
            mux,
            trackers: [ChannelTracker::new(); CHANNELS],
            offsets: [0.0; CHANNELS],
        }
    }

    /// Set the angle offset for one channel
    pub fn set_offset(&mut self, channel: u8, degrees: f32) -> Result<(), SensorError> {
        let slot = self
            .offsets
            .get_mut(channel as usize)
            .ok_or(SensorError::InvalidChannel)?;
        *slot = degrees;
        Ok(())
    }

    /// Check for a magnet in range of `channel`
    pub fn magnet_detected(&mut self, channel: u8) -> Result<bool, SensorError> {
        self.route(channel)?;
        as5600::magnet_detected(&mut self.i2c).map_err(|_| SensorError::Bus)
    }

    /// Magnetic field magnitude seen by `channel`
    pub fn magnitude(&mut self, channel: u8) -> Result<u16, SensorError> {
        self.route(channel)?;
        as5600::read_u12(&mut self.i2c, reg::MAGNITUDE).map_err(|_| SensorError::Bus)
    }

    /// Block until `channel` sees a magnet, retrying every `retry_ms`
    ///
    /// Startup only. `on_miss` runs before each retry. Returns the magnitude
    /// once detected. Bus errors count as a missing magnet; only an unwired
    /// channel returns early.
    pub fn initialize<D, F>(
        &mut self,
        channel: u8,
        delay: &mut D,
        retry_ms: u32,
        mut on_miss: F,
    ) -> Result<u16, SensorError>
    where
        D: DelayNs,
        F: FnMut(SensorError),
    {
        loop {
            match self.magnet_detected(channel) {
                Ok(true) => break,
                Ok(false) => {
                    drv_warn!("Can not detect magnet on sensor {}", channel);
                    on_miss(SensorError::NoMagnet);
                }
                Err(SensorError::Bus) => {
                    drv_warn!("sensor {} not responding", channel);
                    on_miss(SensorError::Bus);
                }
                Err(e) => return Err(e),
            }
            delay.delay_ms(retry_ms);
        }

        let magnitude = self.magnitude(channel)?;
        drv_info!("sensor {} magnet magnitude {}", channel, magnitude);
        Ok(magnitude)
    }

    /// Give back the bus and clock
    pub fn release(self) -> (I, C) {
        (self.i2c, self.clock)
    }

    fn route(&mut self, channel: u8) -> Result<(), SensorError> {
        match self.mux.select(&mut self.i2c, channel) {
            Ok(()) => Ok(()),
            Err(MuxError::InvalidChannel) => {
                drv_warn!(
                    "only {} sensors wired, channel {} ignored",
                    SENSOR_CHANNELS,
                    channel
                );
                Err(SensorError::InvalidChannel)
            }
            Err(MuxError::Bus) => Err(SensorError::Bus),
        }
    }

    fn read_tracked_angle(&mut self, channel: u8) -> Result<u16, SensorError> {
        self.route(channel)?;
        as5600::read_u12(&mut self.i2c, reg::ANGLE).map_err(|_| SensorError::Bus)
    }

    fn tracker(&mut self, channel: u8) -> Result<&mut ChannelTracker, SensorError> {
        self.trackers
            .get_mut(channel as usize)
            .ok_or(SensorError::InvalidChannel)
    }
}

impl<I: I2c, C: Clock> PositionSensors for SensorBank<I, C> {
    fn select_channel(&mut self, channel: u8) {
        let _ = self.route(channel);
    }

    fn read_angle(&mut self, channel: u8) -> Result<f32, SensorError> {
        self.route(channel)?;
        let raw = as5600::read_u12(&mut self.i2c, reg::RAW_ANGLE).map_err(|_| SensorError::Bus)?;
        let offset = self
            .offsets
            .get(channel as usize)
            .copied()
            .ok_or(SensorError::InvalidChannel)?;
        Ok(raw as f32 * RAW_TO_DEGREES - offset)
    }

    fn read_cumulative_position(&mut self, channel: u8) -> Result<i32, SensorError> {
        let angle = self.read_tracked_angle(channel)?;
        Ok(self.tracker(channel)?.update_position(angle))
    }

    fn read_angular_speed(&mut self, channel: u8) -> Result<f32, SensorError> {
        let angle = self.read_tracked_angle(channel)?;
        let now_us = self.clock.now_us();
        Ok(self.tracker(channel)?.update_speed(angle, now_us))
    }
}
