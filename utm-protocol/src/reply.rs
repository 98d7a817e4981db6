//! Outgoing text lines
//!
//! Replies and operator notices end with `\r\n`. Stream lines end with a bare
//! `\n` so a host can tell them apart from replies at a glance.

use core::fmt;

use crate::FIRMWARE_VERSION;

/// Reply line terminator
pub const REPLY_END: &str = "\r\n";

/// Stream line terminator
pub const STREAM_END: &str = "\n";

/// A float rendered with two decimals
///
/// Negative zero prints as `0.00` and non-finite values print in lowercase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decimal2(pub f32);

impl fmt::Display for Decimal2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.0;
        if value.is_nan() {
            f.write_str("nan")
        } else if value.is_infinite() {
            f.write_str("inf")
        } else {
            // -0.0 + 0.0 == +0.0
            write!(f, "{:.2}", value + 0.0)
        }
    }
}

/// Reply to a command or operator action
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reply {
    /// `GetLoad`
    Load(i32),
    /// `GetTotalAngle`
    TotalAngle(i32),
    /// `GetVelocity`: instantaneous and averaged rpm
    Velocity { rpm: f32, average_rpm: f32 },
    /// `GetVersion`
    Version,
    /// `GetSteps`
    Steps(i64),
    /// Button release
    StopAndHalt,
    /// `Start`
    StartingDown,
    /// `SetSpeed` echo, value in rpm × 10
    SpeedSet(i32),
    /// `MoveSteps` echo
    Moving(i64),
    /// `SetRampLength` echo with the value the controller applied
    RampLength { requested: i32, applied: u32 },
    /// UP button press
    GoingUp { fast: bool },
    /// DOWN button press
    GoingDown { fast: bool },
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Reply::Load(force) => write!(f, "Load: {}{}", force, REPLY_END),
            Reply::TotalAngle(pos) => write!(f, "Total Angle: {}{}", pos, REPLY_END),
            Reply::Velocity { rpm, average_rpm } => write!(
                f,
                "Velocity: {}\t{}{}",
                Decimal2(rpm),
                Decimal2(average_rpm),
                REPLY_END
            ),
            Reply::Version => write!(f, "Firmware Version: {}{}", FIRMWARE_VERSION, REPLY_END),
            Reply::Steps(steps) => write!(f, "Total Steps: {}{}", steps, REPLY_END),
            Reply::StopAndHalt => write!(f, "Stop and halt!{}", REPLY_END),
            Reply::StartingDown => write!(f, "Going Down with 100rpm{}", REPLY_END),
            Reply::SpeedSet(rpm_x10) => write!(
                f,
                "Setting speed: {} RPM{}",
                Decimal2(rpm_x10 as f32 / 10.0),
                REPLY_END
            ),
            Reply::Moving(steps) => write!(f, "Moving: {} steps.{}", steps, REPLY_END),
            Reply::RampLength { requested, applied } => write!(
                f,
                "Setting ramp length: {} ramp length{}Current rampLen: {}{}",
                requested, REPLY_END, applied, REPLY_END
            ),
            Reply::GoingUp { fast: true } => write!(f, "Going up fast!{}", REPLY_END),
            Reply::GoingUp { fast: false } => write!(f, "Going up!{}", REPLY_END),
            Reply::GoingDown { fast: true } => write!(f, "Going down fast!{}", REPLY_END),
            Reply::GoingDown { fast: false } => write!(f, "Going down!{}", REPLY_END),
        }
    }
}

/// Periodic telemetry line
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StreamLine {
    /// Raw load reading
    Load(i32),
    /// Cumulative position, rpm and averaged rpm
    Sensors {
        position: i32,
        rpm: f32,
        average_rpm: f32,
    },
}

impl fmt::Display for StreamLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            StreamLine::Load(force) => write!(f, "{}{}", force, STREAM_END),
            StreamLine::Sensors {
                position,
                rpm,
                average_rpm,
            } => write!(
                f,
                "{}\t{}\t{}{}",
                position,
                Decimal2(rpm),
                Decimal2(average_rpm),
                STREAM_END
            ),
        }
    }
}

/// Bus scan progress lines printed during startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanLine {
    /// Scan is starting
    Scanning,
    /// An address acknowledged
    Found(u8),
    /// An address failed with something other than a NACK
    UnknownError(u8),
    /// Scan finished without any device
    NoDevices,
    /// Scan finished with at least one device
    Done,
}

impl fmt::Display for ScanLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ScanLine::Scanning => write!(f, "Scanning I2C...{}", REPLY_END),
            ScanLine::Found(addr) => {
                write!(f, "I2C device found at address 0x{:02X}  !{}", addr, REPLY_END)
            }
            ScanLine::UnknownError(addr) => {
                write!(f, "Unknown error at address 0x{:02X}{}", addr, REPLY_END)
            }
            ScanLine::NoDevices => write!(f, "No I2C devices found\n{}", REPLY_END),
            ScanLine::Done => write!(f, "Done!\n{}", REPLY_END),
        }
    }
}
