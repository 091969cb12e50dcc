//! Shared rotary state.
//!
//! One mutex guards the encoder and button state together, so a reader
//! always sees a `(position, toggle)` pair produced by a completed update.
//! The poller is the only writer during normal operation; the publisher and
//! the display only ever take [`Snapshot`] copies. Latest value wins, there
//! is no queue.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::drivers::button::{ButtonState, Toggle};
use crate::drivers::encoder::EncoderState;

/// Externally visible state, copied out under the lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Snapshot {
    pub position: u8,
    pub toggle: Toggle,
}

/// Everything the poller mutates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotaryState {
    pub encoder: EncoderState,
    pub button: ButtonState,
}

impl RotaryState {
    /// Position 0, toggle off, seeded with the startup clock level.
    pub fn new(initial_clock: bool) -> Self {
        Self {
            encoder: EncoderState::new(initial_clock),
            button: ButtonState::default(),
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            position: self.encoder.position(),
            toggle: self.button.toggle,
        }
    }
}

/// Mutually exclusive container for [`RotaryState`].
pub struct SharedState {
    inner: Mutex<RotaryState>,
}

impl SharedState {
    pub fn new(initial: RotaryState) -> Self {
        Self {
            inner: Mutex::new(initial),
        }
    }

    /// Consistent copy of `(position, toggle)`.
    pub fn read(&self) -> Snapshot {
        self.lock().snapshot()
    }

    /// Overwrite both published values at once. The position is clamped.
    pub fn write(&self, position: u8, toggle: Toggle) {
        let mut state = self.lock();
        state.encoder.set_position(position);
        state.button.toggle = toggle;
    }

    /// Run `f` with exclusive access. Used by the poller to decode and
    /// debounce in one critical section.
    pub fn update<R>(&self, f: impl FnOnce(&mut RotaryState) -> R) -> R {
        f(&mut self.lock())
    }

    // The state is plain `Copy` data that is never left half-written, so a
    // panic in another holder does not invalidate it.
    fn lock(&self) -> MutexGuard<'_, RotaryState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
