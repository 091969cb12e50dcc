//! GPIO input adapter.
//!
//! Implements [`InputPort`] over any three `embedded_hal::digital::InputPin`s.
//! This is the only module that touches pin levels.
//!
//! ## feature gating
//!
//! - **`rpi`**: [`open_rpi`] acquires BCM 17/18/23 through `rppal` as
//!   pull-up inputs. rppal restores each pin's previous mode when the pin is
//!   dropped, so tearing down the adapter releases the hardware.
//! - **without `rpi`**: the host binary wires the same adapter to
//!   [`SimBoard`](super::sim_gpio::SimBoard) pins instead.

use embedded_hal::digital::{Error as _, InputPin};
use log::warn;

use crate::app::ports::InputPort;
use crate::error::InputError;
use crate::pins::InputLine;

/// Encoder CLK, encoder DT and button pins behind one [`InputPort`].
pub struct GpioInputs<C, D, B> {
    clock: C,
    data: D,
    button: B,
}

impl<C, D, B> GpioInputs<C, D, B> {
    pub fn new(clock: C, data: D, button: B) -> Self {
        Self { clock, data, button }
    }
}

impl<C: InputPin, D: InputPin, B: InputPin> InputPort for GpioInputs<C, D, B> {
    fn read_line(&mut self, line: InputLine) -> Result<bool, InputError> {
        match line {
            InputLine::Clock => self.clock.is_high().map_err(|e| read_failed(line, e.kind())),
            InputLine::Data => self.data.is_high().map_err(|e| read_failed(line, e.kind())),
            InputLine::Button => self.button.is_high().map_err(|e| read_failed(line, e.kind())),
        }
    }
}

fn read_failed(line: InputLine, kind: embedded_hal::digital::ErrorKind) -> InputError {
    warn!("gpio: {} (GPIO{}) read failed: {:?}", line, line.gpio(), kind);
    InputError::ReadFailed(line)
}

/// Pins as handed out by rppal.
#[cfg(feature = "rpi")]
pub type RpiInputs = GpioInputs<rppal::gpio::InputPin, rppal::gpio::InputPin, rppal::gpio::InputPin>;

/// Acquire the encoder and button pins on a Raspberry Pi.
#[cfg(feature = "rpi")]
pub fn open_rpi() -> Result<RpiInputs, InputError> {
    use crate::pins::{BUTTON_GPIO, CLOCK_GPIO, DATA_GPIO};

    let gpio = rppal::gpio::Gpio::new().map_err(|e| {
        warn!("gpio: cannot open GPIO peripheral: {}", e);
        InputError::ChipUnavailable
    })?;
    let input = |bcm: u8| {
        gpio.get(bcm).map(|pin| pin.into_input_pullup()).map_err(|e| {
            warn!("gpio: cannot acquire GPIO{}: {}", bcm, e);
            InputError::PinUnavailable(bcm)
        })
    };
    let inputs = GpioInputs::new(input(CLOCK_GPIO)?, input(DATA_GPIO)?, input(BUTTON_GPIO)?);
    log::info!(
        "gpio: CLK=GPIO{} DT=GPIO{} BTN=GPIO{} configured (pull-up)",
        CLOCK_GPIO,
        DATA_GPIO,
        BUTTON_GPIO
    );
    Ok(inputs)
}
