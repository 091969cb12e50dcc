//! Edge-triggered push-button toggle.
//!
//! ## Hardware
//!
//! Active-low momentary switch with pull-up. The poller inverts the raw
//! level before calling in here, so `raw_pressed == true` means the button
//! is physically held down.
//!
//! ## Behaviour
//!
//! Each released→pressed transition flips the toggle between 0 and 1.
//! Holding the button down toggles once. There is no timed settle window by
//! default: edge-triggering on raw samples is the only noise mitigation. A
//! lockout window can be enabled with `button_lockout_ms`; a press edge that
//! arrives inside it is swallowed.

use core::fmt;

/// The published binary state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Toggle {
    #[default]
    Off,
    On,
}

impl Toggle {
    pub const fn flipped(self) -> Self {
        match self {
            Self::Off => Self::On,
            Self::On => Self::Off,
        }
    }

    /// Wire representation (`0` / `1`).
    pub const fn as_u8(self) -> u8 {
        match self {
            Self::Off => 0,
            Self::On => 1,
        }
    }

    pub const fn from_bit(bit: bool) -> Self {
        if bit { Self::On } else { Self::Off }
    }
}

impl fmt::Display for Toggle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Off => write!(f, "OFF"),
            Self::On => write!(f, "ON"),
        }
    }
}

/// Toggle plus the previous pressed sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonState {
    pub toggle: Toggle,
    pub last_pressed: bool,
}

impl ButtonState {
    /// Apply one sample in place. Returns the new toggle on a press edge.
    pub fn apply(&mut self, raw_pressed: bool) -> Option<Toggle> {
        let press_edge = raw_pressed && !self.last_pressed;
        self.last_pressed = raw_pressed;

        if press_edge {
            self.toggle = self.toggle.flipped();
            Some(self.toggle)
        } else {
            None
        }
    }
}

/// Pure form of [`ButtonState::apply`].
pub fn debounce(raw_pressed: bool, state: ButtonState) -> ButtonState {
    let mut next = state;
    next.apply(raw_pressed);
    next
}

/// Press-edge detector with an optional lockout window.
///
/// Holds only the timing bookkeeping; the [`ButtonState`] itself lives in
/// the shared state and is passed in on each tick.
pub struct ButtonDebouncer {
    lockout_ms: u32,
    last_toggle_ms: Option<u64>,
}

impl ButtonDebouncer {
    pub fn new(lockout_ms: u32) -> Self {
        Self {
            lockout_ms,
            last_toggle_ms: None,
        }
    }

    /// Call once per poll tick. `now_ms` is monotonic milliseconds.
    /// Returns the new toggle value when a press was accepted.
    pub fn tick(&mut self, state: &mut ButtonState, raw_pressed: bool, now_ms: u64) -> Option<Toggle> {
        let press_edge = raw_pressed && !state.last_pressed;

        if press_edge && self.locked_out(now_ms) {
            state.last_pressed = raw_pressed;
            return None;
        }

        let toggled = state.apply(raw_pressed);
        if toggled.is_some() {
            self.last_toggle_ms = Some(now_ms);
        }
        toggled
    }

    fn locked_out(&self, now_ms: u64) -> bool {
        match self.last_toggle_ms {
            Some(at) if self.lockout_ms > 0 => now_ms.saturating_sub(at) < self.lockout_ms as u64,
            _ => false,
        }
    }
}
