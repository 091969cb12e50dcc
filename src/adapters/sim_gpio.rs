//! Simulated encoder board.
//!
//! Lines are atomics shared between a [`SimBoard`] handle (the "hand" turning
//! the knob) and the [`SimPin`]s handed to the poller. Used by tests and by
//! the host binary when it is built without the `rpi` feature.
//!
//! Levels follow the real wiring: every line idles high (pull-up) and the
//! button reads low while pressed.

use core::convert::Infallible;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use embedded_hal::digital::{ErrorType, InputPin};

use super::gpio::GpioInputs;

/// One simulated input line.
#[derive(Debug, Clone)]
pub struct SimPin {
    level: Arc<AtomicBool>,
}

impl SimPin {
    pub fn new(high: bool) -> Self {
        Self {
            level: Arc::new(AtomicBool::new(high)),
        }
    }

    pub fn set(&self, high: bool) {
        self.level.store(high, Ordering::Release);
    }

    pub fn level(&self) -> bool {
        self.level.load(Ordering::Acquire)
    }
}

impl ErrorType for SimPin {
    type Error = Infallible;
}

impl InputPin for SimPin {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        Ok(self.level())
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        Ok(!self.level())
    }
}

/// Handle that drives the three simulated lines.
#[derive(Debug, Clone)]
pub struct SimBoard {
    clock: SimPin,
    data: SimPin,
    button: SimPin,
}

impl Default for SimBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl SimBoard {
    /// All lines idle high.
    pub fn new() -> Self {
        Self {
            clock: SimPin::new(true),
            data: SimPin::new(true),
            button: SimPin::new(true),
        }
    }

    /// Input adapter reading this board's lines.
    pub fn inputs(&self) -> GpioInputs<SimPin, SimPin, SimPin> {
        GpioInputs::new(self.clock.clone(), self.data.clone(), self.button.clone())
    }

    /// One CLK transition with DT opposite to the new CLK level.
    pub fn step_clockwise(&self) {
        let clock = !self.clock.level();
        self.data.set(!clock);
        self.clock.set(clock);
    }

    /// One CLK transition with DT equal to the new CLK level.
    pub fn step_counter_clockwise(&self) {
        let clock = !self.clock.level();
        self.data.set(clock);
        self.clock.set(clock);
    }

    pub fn press(&self) {
        self.button.set(false);
    }

    pub fn release(&self) {
        self.button.set(true);
    }
}
