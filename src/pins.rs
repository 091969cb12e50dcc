//! GPIO pin assignments for the rotary encoder board.
//!
//! Single source of truth: every adapter references this module rather than
//! hard-coding pin numbers. BCM numbering; all three inputs use the internal
//! pull-up.

use core::fmt;

// ---------------------------------------------------------------------------
// Rotary encoder (KY-040 style, two out-of-phase outputs)
// ---------------------------------------------------------------------------

/// Encoder CLK (output A).
pub const CLOCK_GPIO: u8 = 17;
/// Encoder DT (output B).
pub const DATA_GPIO: u8 = 18;

// ---------------------------------------------------------------------------
// Push-button (encoder shaft switch)
// ---------------------------------------------------------------------------

/// Momentary switch to ground. LOW = pressed.
pub const BUTTON_GPIO: u8 = 23;

/// The three logical input lines the poller samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputLine {
    Clock,
    Data,
    Button,
}

impl InputLine {
    /// BCM pin number wired to this line.
    pub const fn gpio(self) -> u8 {
        match self {
            Self::Clock => CLOCK_GPIO,
            Self::Data => DATA_GPIO,
            Self::Button => BUTTON_GPIO,
        }
    }
}

impl fmt::Display for InputLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Clock => write!(f, "clock"),
            Self::Data => write!(f, "data"),
            Self::Button => write!(f, "button"),
        }
    }
}
