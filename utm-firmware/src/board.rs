//! Board wiring for the reference rig
//!
//! | Function              | GPIO      |
//! |-----------------------|-----------|
//! | HX711 DOUT / SCK      | 16 / 4    |
//! | Stepper STEP/DIR/EN   | 14/27/26  |
//! | Speed switch          | 2         |
//! | UP / DOWN buttons     | 17 / 15   |
//! | I²C0 SDA / SCL        | 20 / 21   |
//! | UART0 TX / RX         | 0 / 1     |
//! | Status LED            | 25        |
//!
//! Inputs use the internal pull-ups; buttons and the switch pull to ground.

use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::i2c::{self, Blocking, I2c};
use embassy_rp::peripherals::{I2C0, PIN_0, PIN_1, PIN_14, PIN_26, PIN_27, PIO0, UART0};
use embassy_rp::{Peri, Peripherals};

/// Host link baud rate
pub const UART_BAUD: u32 = 9600;

/// UART ring buffer sizes
pub const UART_TX_BUF: usize = 256;
pub const UART_RX_BUF: usize = 64;

/// I²C bus frequency for the multiplexer and sensors
pub const I2C_FREQUENCY_HZ: u32 = 100_000;

/// Status LED blinks during startup
pub const STARTUP_BLINKS: u32 = 5;

/// Half period of a startup blink (ms)
pub const BLINK_HALF_PERIOD_MS: u64 = 500;

/// Peripherals split into their board roles
pub struct Board {
    pub uart: Peri<'static, UART0>,
    pub uart_tx: Peri<'static, PIN_0>,
    pub uart_rx: Peri<'static, PIN_1>,
    pub i2c: I2c<'static, I2C0, Blocking>,
    pub pio: Peri<'static, PIO0>,
    pub step: Peri<'static, PIN_14>,
    pub dir: Peri<'static, PIN_27>,
    pub enable: Peri<'static, PIN_26>,
    pub load_dout: Input<'static>,
    pub load_sck: Output<'static>,
    pub up: Input<'static>,
    pub down: Input<'static>,
    pub speed_switch: Input<'static>,
    pub led: Output<'static>,
}

impl Board {
    /// Claim every pin the rig uses
    pub fn new(p: Peripherals) -> Self {
        let mut i2c_config = i2c::Config::default();
        i2c_config.frequency = I2C_FREQUENCY_HZ;

        Self {
            uart: p.UART0,
            uart_tx: p.PIN_0,
            uart_rx: p.PIN_1,
            i2c: I2c::new_blocking(p.I2C0, p.PIN_21, p.PIN_20, i2c_config),
            pio: p.PIO0,
            step: p.PIN_14,
            dir: p.PIN_27,
            enable: p.PIN_26,
            load_dout: Input::new(p.PIN_16, Pull::None),
            load_sck: Output::new(p.PIN_4, Level::Low),
            up: Input::new(p.PIN_17, Pull::Up),
            down: Input::new(p.PIN_15, Pull::Up),
            speed_switch: Input::new(p.PIN_2, Pull::Up),
            led: Output::new(p.PIN_25, Level::Low),
        }
    }
}
