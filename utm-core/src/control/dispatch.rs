//! Command dispatch
//!
//! Toggle verbs flip streaming flags, queries print one reply, motion verbs
//! drive the motion controller. Parameterized verbs echo what they forward.

use embedded_io::Write;
use utm_protocol::{Command, Reply};

use crate::config::RigConfig;
use crate::control::state::RigState;
use crate::traits::{MotionController, Rotation};

/// Execute one decoded command
pub fn dispatch<M, W>(
    command: Command,
    state: &mut RigState,
    motion: &mut M,
    out: &mut W,
    config: &RigConfig,
) where
    M: MotionController + ?Sized,
    W: Write,
{
    match command {
        Command::LoadCellOn => state.stream_load = true,
        Command::LoadCellOff => state.stream_load = false,
        Command::SensorsOn => state.stream_sensors = true,
        Command::SensorsOff => state.stream_sensors = false,

        Command::GetLoad => send(out, Reply::Load(state.telemetry.last_force)),
        Command::GetTotalAngle => {
            send(out, Reply::TotalAngle(state.telemetry.cumulative_position))
        }
        Command::GetVelocity => send(
            out,
            Reply::Velocity {
                rpm: state.telemetry.angular_speed,
                average_rpm: state.telemetry.averaged_angular_speed,
            },
        ),
        Command::GetVersion => send(out, Reply::Version),
        Command::GetSteps => send(out, Reply::Steps(motion.read_steps())),

        Command::Enable => motion.enable(true),
        Command::Disable => motion.enable(false),
        Command::Stop => {
            send(out, Reply::StopAndHalt);
            motion.rotate(Rotation::Stop);
        }
        Command::EStop => motion.halt(),
        Command::Up => motion.rotate(Rotation::Negative),
        Command::Down => motion.rotate(Rotation::Positive),
        Command::Start => {
            motion.enable(true);
            send(out, Reply::StartingDown);
            motion.set_speed(config.start_speed_x10);
            motion.rotate(Rotation::Positive);
        }

        Command::SetSpeed(rpm_x10) => {
            send(out, Reply::SpeedSet(rpm_x10));
            motion.set_speed(rpm_x10);
        }
        Command::MoveSteps(steps) => {
            send(out, Reply::Moving(steps));
            motion.move_steps(steps);
        }
        Command::SetRampLength(requested) => {
            let applied = motion.set_ramp_len(requested);
            send(out, Reply::RampLength { requested, applied });
        }
    }
}

/// Write a line to the host, ignoring transport errors
pub fn send<W, T>(out: &mut W, line: T)
where
    W: Write,
    T: core::fmt::Display,
{
    let _ = out.write_fmt(format_args!("{}", line));
}
