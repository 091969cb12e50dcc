//! Application core: the host's domain loops.
//!
//! The poller, display and runtime live here. All interaction with hardware
//! happens through **port traits** defined in [`ports`], keeping this layer
//! testable against simulated pins.

pub mod display;
pub mod events;
pub mod poller;
pub mod ports;
pub mod runtime;
pub mod shared;
pub mod shutdown;
