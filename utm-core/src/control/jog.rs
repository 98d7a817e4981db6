//! Front-panel jog buttons
//!
//! Press starts a continuous move at the switch-selected speed, release
//! ramps to a stop. UP travels toward negative steps.

use embedded_io::Write;
use utm_protocol::Reply;

use crate::config::RigConfig;
use crate::control::dispatch::send;
use crate::traits::{Button, Buttons, MotionController, Rotation, SpeedMode};

/// Handle edge events in a fixed order: UP press, UP release, DOWN press,
/// DOWN release
pub fn handle_edges<B, M, W>(
    buttons: &mut B,
    mode: SpeedMode,
    motion: &mut M,
    out: &mut W,
    config: &RigConfig,
) where
    B: Buttons + ?Sized,
    M: MotionController + ?Sized,
    W: Write,
{
    if buttons.pressed(Button::Up) {
        start_jog(Button::Up, mode, motion, out, config);
    }
    if buttons.released(Button::Up) {
        stop_jog(motion, out);
    }
    if buttons.pressed(Button::Down) {
        start_jog(Button::Down, mode, motion, out, config);
    }
    if buttons.released(Button::Down) {
        stop_jog(motion, out);
    }
}

fn start_jog<M, W>(button: Button, mode: SpeedMode, motion: &mut M, out: &mut W, config: &RigConfig)
where
    M: MotionController + ?Sized,
    W: Write,
{
    let fast = mode == SpeedMode::Fast;
    motion.enable(true);

    let (reply, rotation) = match button {
        Button::Up => (Reply::GoingUp { fast }, Rotation::Negative),
        Button::Down => (Reply::GoingDown { fast }, Rotation::Positive),
    };
    send(out, reply);

    motion.set_speed(if fast {
        config.fast_speed_x10
    } else {
        config.slow_speed_x10
    });
    motion.rotate(rotation);
}

fn stop_jog<M, W>(motion: &mut M, out: &mut W)
where
    M: MotionController + ?Sized,
    W: Write,
{
    send(out, Reply::StopAndHalt);
    motion.rotate(Rotation::Stop);
}
