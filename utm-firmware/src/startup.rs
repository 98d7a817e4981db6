//! Startup phase
//!
//! Runs once, before the control loop is assembled. Unlike the loop, every
//! step here is allowed to block.

use core::fmt::Display;

use defmt::*;
use embassy_rp::gpio::Output;
use embassy_time::{Delay, Timer};
use embedded_hal::i2c::I2c;
use embedded_io::Write;
use utm_core::config::RigConfig;
use utm_core::control::send;
use utm_core::traits::{Clock, MotionController};
use utm_drivers::scan::{SCAN_FIRST, SCAN_LAST};
use utm_drivers::sensor::bank::MAGNET_RETRY_MS;
use utm_drivers::{scan_bus, SensorBank};
use utm_protocol::help::{BANNER, HELP};
use utm_protocol::reply::{ScanLine, REPLY_END};

use crate::board::{BLINK_HALF_PERIOD_MS, STARTUP_BLINKS};

fn println<W: Write>(out: &mut W, text: impl Display) {
    let _ = write!(out, "{}{}", text, REPLY_END);
}

/// Blink the status LED so a watcher knows the board came up
pub async fn blink(led: &mut Output<'_>) {
    for _ in 0..STARTUP_BLINKS {
        Timer::after_millis(BLINK_HALF_PERIOD_MS).await;
        led.set_high();
        Timer::after_millis(BLINK_HALF_PERIOD_MS).await;
        led.set_low();
    }
}

pub fn print_banner<W: Write>(out: &mut W) {
    for line in BANNER {
        println(out, line);
    }
}

/// Probe the bus and list what answered, in address order
pub fn scan<I: I2c, W: Write>(i2c: &mut I, out: &mut W) {
    send(out, ScanLine::Scanning);
    let report = scan_bus(i2c);

    for address in SCAN_FIRST..=SCAN_LAST {
        if report.found.contains(&address) {
            info!("I2C device at {=u8:#04x}", address);
            send(out, ScanLine::Found(address));
        } else if let Some((_, fault)) = report.faulted.iter().find(|(a, _)| *a == address) {
            warn!("I2C error at {=u8:#04x}: {}", address, fault);
            send(out, ScanLine::UnknownError(address));
        }
    }

    if report.is_empty() {
        send(out, ScanLine::NoDevices);
    } else {
        send(out, ScanLine::Done);
    }
}

/// Wait for a magnet in front of the sensor on `channel`
///
/// Blocks forever if none shows up; the rig is useless without it.
pub fn wait_for_magnet<I, C, W>(sensors: &mut SensorBank<I, C>, channel: u8, out: &mut W)
where
    I: I2c,
    C: Clock,
    W: Write,
{
    println(out, format_args!("Selecting id{}", channel));
    println(out, format_args!("Initializing AS5600 id:{}", channel));

    let mut delay = Delay;
    let result = sensors.initialize(channel, &mut delay, MAGNET_RETRY_MS, |_| {
        println(out, "Can not detect magnet");
    });

    match result {
        Ok(magnitude) => println(out, format_args!("Current Magnitude: {}", magnitude)),
        Err(e) => warn!("sensor {} unavailable: {}", channel, e),
    }
}

/// Put the motion controller in its power-on state and show the help
pub fn finish<M: MotionController, W: Write>(motion: &mut M, out: &mut W, config: &RigConfig) {
    let applied = motion.set_ramp_len(config.initial_ramp_len);
    debug!("ramp length {} steps", applied);
    motion.enable(false);

    for line in HELP {
        println(out, line);
    }
}
