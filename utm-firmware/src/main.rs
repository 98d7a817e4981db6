//! UTM - Universal Testing Machine Firmware
//!
//! Firmware binary for the RP2040-based load frame. Brings up the board, runs
//! the blocking startup phase, then hands every peripheral to the control
//! loop and spins it forever.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::{PIO0, UART0};
use embassy_rp::pio::Pio;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use embassy_time::Delay;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use utm_core::config::RigConfig;
use utm_core::ControlLoop;
use utm_drivers::{DebouncedButtons, Hx711, SensorBank, SpeedSwitch};
use utm_hal_rp2040::pio::StepGeneratorConfig;
use utm_hal_rp2040::{PioMotion, PioStepper};

use crate::board::{Board, UART_BAUD, UART_RX_BUF, UART_TX_BUF};
use crate::clock::EmbassyClock;

mod board;
mod clock;
mod startup;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
    PIO0_IRQ_0 => embassy_rp::pio::InterruptHandler<PIO0>;
});

// UART ring buffers must outlive the driver
static TX_BUF: StaticCell<[u8; UART_TX_BUF]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; UART_RX_BUF]> = StaticCell::new();

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("UTM firmware starting...");

    let p = embassy_rp::init(Default::default());
    let mut board = Board::new(p);
    let config = RigConfig::default();
    let clock = EmbassyClock;

    let mut uart_config = UartConfig::default();
    uart_config.baudrate = UART_BAUD;
    let tx_buf = TX_BUF.init([0u8; UART_TX_BUF]);
    let rx_buf = RX_BUF.init([0u8; UART_RX_BUF]);
    let uart = Uart::new_blocking(board.uart, board.uart_tx, board.uart_rx, uart_config);
    let mut port = uart.into_buffered(Irqs, tx_buf, rx_buf);

    let Pio {
        mut common, sm0, ..
    } = Pio::new(board.pio, Irqs);
    let stepper = PioStepper::new(
        &mut common,
        sm0,
        board.step,
        board.dir,
        board.enable,
        StepGeneratorConfig::default(),
    );
    let mut motion = PioMotion::new(stepper);
    info!("PIO stepper initialized");

    let load = unwrap!(Hx711::new(board.load_dout, board.load_sck, Delay));

    startup::blink(&mut board.led).await;
    startup::print_banner(&mut port);
    startup::scan(&mut board.i2c, &mut port);

    let mut sensors = SensorBank::new(board.i2c, clock);
    startup::wait_for_magnet(&mut sensors, config.active_channel, &mut port);
    startup::finish(&mut motion, &mut port, &config);

    let buttons = DebouncedButtons::new(board.up, board.down);
    let switch = SpeedSwitch::new(board.speed_switch);

    let mut rig = ControlLoop::new(
        config, port, clock, motion, sensors, load, buttons, switch,
    );
    info!("Entering control loop");

    loop {
        rig.tick();
    }
}
