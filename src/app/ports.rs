//! Port traits: the boundary between the domain loops and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ Poller / Publisher / Display (domain)
//! ```
//!
//! GPIO, clocks, displays and event sinks implement these traits. The loops
//! consume them via generics, so the decoding and publishing logic never
//! touches hardware directly and runs unchanged against simulated pins.

use crate::error::InputError;
use crate::pins::InputLine;

use super::events::AppEvent;
use super::shared::Snapshot;

// ───────────────────────────────────────────────────────────────
// Input port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Raw digital line reads. No logic beyond returning the current level.
pub trait InputPort {
    /// Current electrical level of `line` (`true` = high).
    fn read_line(&mut self, line: InputLine) -> Result<bool, InputError>;
}

// ───────────────────────────────────────────────────────────────
// Time port
// ───────────────────────────────────────────────────────────────

/// Monotonic time source. Tests substitute a manually advanced clock.
pub trait TimePort {
    /// Milliseconds since an arbitrary fixed origin.
    fn uptime_ms(&self) -> u64;
}

// ───────────────────────────────────────────────────────────────
// Display port (driven adapter: domain → screen)
// ───────────────────────────────────────────────────────────────

/// Renders the current state. Receives copies only; it can never mutate
/// the shared state.
pub trait DisplayPort {
    fn render(&mut self, snapshot: Snapshot);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The loops emit structured [`AppEvent`]s through this port. Adapters
/// decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &AppEvent);
}
