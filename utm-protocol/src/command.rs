//! Command verbs understood by the rig
//!
//! Verbs are matched in a fixed priority order: every exact verb first, then
//! the parameterized prefix verbs. The first match wins.

use crate::line::CommandLine;

/// Exact-match verbs, in priority order
const EXACT_VERBS: &[(&str, Command)] = &[
    // Streaming toggles
    ("LoadCellOn", Command::LoadCellOn),
    ("LoadCellOff", Command::LoadCellOff),
    ("SensorsOn", Command::SensorsOn),
    ("SensorsOff", Command::SensorsOff),
    // Queries
    ("GetLoad", Command::GetLoad),
    ("GetTotalAngle", Command::GetTotalAngle),
    ("GetVelocity", Command::GetVelocity),
    ("GetVersion", Command::GetVersion),
    ("version", Command::GetVersion),
    ("v", Command::GetVersion),
    ("GetSteps", Command::GetSteps),
    // Motor control
    ("Enable", Command::Enable),
    ("Disable", Command::Disable),
    ("Stop", Command::Stop),
    ("EStop", Command::EStop),
    ("Up", Command::Up),
    ("Down", Command::Down),
    ("Start", Command::Start),
];

pub const VERB_SET_SPEED: &str = "SetSpeed";
pub const VERB_MOVE_STEPS: &str = "MoveSteps";
pub const VERB_SET_RAMP_LENGTH: &str = "SetRampLength";

/// A decoded command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Start streaming load cell readings
    LoadCellOn,
    /// Stop streaming load cell readings
    LoadCellOff,
    /// Start streaming position and speed
    SensorsOn,
    /// Stop streaming position and speed
    SensorsOff,
    /// Report the latest raw load reading
    GetLoad,
    /// Report the cumulative sensor position
    GetTotalAngle,
    /// Report instantaneous and averaged speed
    GetVelocity,
    /// Report the firmware version
    GetVersion,
    /// Report the motion controller's step count
    GetSteps,
    /// Power the stepper driver
    Enable,
    /// Unpower the stepper driver
    Disable,
    /// Ramped stop
    Stop,
    /// Immediate halt
    EStop,
    /// Jog toward negative steps at the current speed
    Up,
    /// Jog toward positive steps at the current speed
    Down,
    /// Default motion: 100 RPM toward positive steps
    Start,
    /// Set speed in RPM × 10
    SetSpeed(i32),
    /// Relative move by a number of steps
    MoveSteps(i64),
    /// Set the acceleration ramp length in steps
    SetRampLength(i32),
}

impl Command {
    /// Decode a command line
    ///
    /// Returns `None` for unrecognized input; callers drop it silently.
    pub fn parse(line: &CommandLine) -> Option<Self> {
        if let Some((_, cmd)) = EXACT_VERBS.iter().find(|(verb, _)| line.matches(verb)) {
            return Some(*cmd);
        }

        if line.matches_prefix(VERB_SET_SPEED) {
            Some(Command::SetSpeed(line.int_parameter()))
        } else if line.matches_prefix(VERB_MOVE_STEPS) {
            Some(Command::MoveSteps(line.long_parameter()))
        } else if line.matches_prefix(VERB_SET_RAMP_LENGTH) {
            Some(Command::SetRampLength(line.int_parameter()))
        } else {
            None
        }
    }
}
