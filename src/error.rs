//! Unified error types for the rotary relay.
//!
//! A single `Error` enum that every subsystem converts into, keeping the
//! runtime's error handling uniform. Variants stay `Copy` (I/O failures are
//! reduced to their [`std::io::ErrorKind`]) so they can be handed between
//! threads and logged without allocation.

use core::fmt;

use crate::pins::InputLine;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible operation in the crate funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A GPIO input could not be acquired or read.
    Input(InputError),
    /// A socket or file operation failed.
    Io(std::io::ErrorKind),
    /// Configuration is invalid or could not be loaded.
    Config(&'static str),
    /// Received bytes could not be decoded.
    Protocol(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input(e) => write!(f, "input: {e}"),
            Self::Io(kind) => write!(f, "io: {kind}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::Protocol(msg) => write!(f, "protocol: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.kind())
    }
}

// ---------------------------------------------------------------------------
// Input errors
// ---------------------------------------------------------------------------

/// Hardware read failures. There is no recovery path for these: the poller
/// stops and the host shuts down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputError {
    /// The GPIO peripheral could not be opened.
    ChipUnavailable,
    /// A pin could not be acquired at startup.
    PinUnavailable(u8),
    /// Reading a line returned an error.
    ReadFailed(InputLine),
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ChipUnavailable => write!(f, "GPIO peripheral unavailable"),
            Self::PinUnavailable(pin) => write!(f, "GPIO{pin} unavailable"),
            Self::ReadFailed(line) => write!(f, "{line} line read failed"),
        }
    }
}

impl std::error::Error for InputError {}

impl From<InputError> for Error {
    fn from(e: InputError) -> Self {
        Self::Input(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
