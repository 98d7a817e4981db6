//! PIO-based stepper output
//!
//! STEP pulses come from a PIO state machine running the counted delay loop
//! described in [`crate::pio`]. DIR and ENABLE are plain GPIO outputs.

use embassy_rp::gpio::{Level, Output, Pin};
use embassy_rp::pio::{
    Common, Config, Direction as PioDirection, Instance, Pin as PioStatePin, PioPin, StateMachine,
};
use embassy_rp::Peri;
use fixed::types::U24F8;

use crate::pio::{half_period_count, StepGeneratorConfig};

/// PIO stepper driver
pub struct PioStepper<'d, PIO: Instance, const SM: usize> {
    /// PIO state machine for step generation
    sm: StateMachine<'d, PIO, SM>,
    /// STEP output, owned by the state machine
    step_pin: PioStatePin<'d, PIO>,
    /// Direction GPIO output
    dir_pin: Output<'d>,
    /// Enable GPIO output
    enable_pin: Output<'d>,
    config: StepGeneratorConfig,
    /// Delay count last handed to the state machine
    loaded_count: Option<u32>,
    /// Current direction (true = increasing step count)
    positive: bool,
}

impl<'d, PIO: Instance, const SM: usize> PioStepper<'d, PIO, SM> {
    /// Load the step program and claim the pins
    ///
    /// The driver starts disabled with pulse generation stopped.
    pub fn new<STEP: PioPin, DIR: Pin, EN: Pin>(
        common: &mut Common<'d, PIO>,
        mut sm: StateMachine<'d, PIO, SM>,
        step_pin: Peri<'d, STEP>,
        dir_pin: Peri<'d, DIR>,
        enable_pin: Peri<'d, EN>,
        config: StepGeneratorConfig,
    ) -> Self {
        let prg = pio::pio_asm!(
            ".wrap_target",
            "pull noblock",
            "mov x, osr",
            "set pins, 1",
            "mov y, x",
            "hi:",
            "jmp y-- hi",
            "set pins, 0",
            "mov y, x",
            "lo:",
            "jmp y-- lo",
            ".wrap"
        );

        let installed = common.load_program(&prg.program);
        let step_pio_pin = common.make_pio_pin(step_pin);

        let mut cfg = Config::default();
        cfg.use_program(&installed, &[&step_pio_pin]);
        cfg.set_set_pins(&[&step_pio_pin]);
        // Delay loop runs at the full system clock
        cfg.clock_divider = U24F8::from_num(1);

        sm.set_config(&cfg);
        sm.set_pin_dirs(PioDirection::Out, &[&step_pio_pin]);

        let dir_level = if config.positive_dir_high {
            Level::High
        } else {
            Level::Low
        };
        let dir_pin = Output::new(dir_pin, dir_level);

        let enable_level = if config.enable_inverted {
            Level::High
        } else {
            Level::Low
        };
        let enable_pin = Output::new(enable_pin, enable_level);

        Self {
            sm,
            step_pin: step_pio_pin,
            dir_pin,
            enable_pin,
            config,
            loaded_count: None,
            positive: true,
        }
    }

    /// Power the driver stage
    pub fn enable(&mut self) {
        if self.config.enable_inverted {
            self.enable_pin.set_low();
        } else {
            self.enable_pin.set_high();
        }
    }

    /// Unpower the driver stage
    pub fn disable(&mut self) {
        if self.config.enable_inverted {
            self.enable_pin.set_high();
        } else {
            self.enable_pin.set_low();
        }
    }

    /// Set travel direction
    pub fn set_direction(&mut self, positive: bool) {
        if positive == self.positive {
            return;
        }
        self.positive = positive;
        if positive == self.config.positive_dir_high {
            self.dir_pin.set_high();
        } else {
            self.dir_pin.set_low();
        }
    }

    /// Set the step rate in milli-steps per second; zero stops pulses
    pub fn set_rate(&mut self, rate_msps: u64) {
        let Some(count) = half_period_count(rate_msps) else {
            self.stop();
            return;
        };
        if self.loaded_count == Some(count) {
            return;
        }
        let was_running = self.loaded_count.is_some();

        if !self.sm.tx().try_push(count) {
            // Stale periods queued behind a slow step; drop them
            self.sm.clear_fifos();
            let _ = self.sm.tx().try_push(count);
        }
        self.loaded_count = Some(count);

        if !was_running {
            self.sm.set_enable(true);
        }
    }

    /// Stop pulse generation
    ///
    /// STEP is forced low so the next start begins with a rising edge.
    pub fn stop(&mut self) {
        if self.loaded_count.is_none() {
            return;
        }
        self.sm.set_enable(false);
        self.sm.set_pins(Level::Low, &[&self.step_pin]);
        self.sm.clear_fifos();
        self.sm.restart();
        self.loaded_count = None;
    }

    /// Get steps per revolution
    pub fn steps_per_rev(&self) -> u32 {
        self.config.steps_per_rev
    }
}
