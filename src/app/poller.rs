//! High-rate input poller.
//!
//! Samples the three lines at a fixed interval (1 ms by default), runs the
//! quadrature decoder and the button edge detector, and commits the result
//! into [`SharedState`]. Pins are read before the lock is taken; only the
//! decode/debounce step runs inside the critical section.
//!
//! A read failure is fatal: [`Poller::run`] returns the error and the
//! runtime shuts the host down.

use log::{debug, info};

use crate::drivers::button::{ButtonDebouncer, Toggle};
use crate::drivers::encoder::EncoderSample;
use crate::error::InputError;
use crate::pins::InputLine;
use crate::scheduler::Ticker;

use super::events::AppEvent;
use super::ports::{EventSink, InputPort, TimePort};
use super::shared::{RotaryState, SharedState};
use super::shutdown::ShutdownSignal;

/// Changes produced by one poll tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PollOutcome {
    /// `(from, to)` when the position moved.
    pub moved: Option<(u8, u8)>,
    /// New toggle when the button flipped it.
    pub toggled: Option<Toggle>,
}

pub struct Poller<I, T> {
    inputs: I,
    clock: T,
    debouncer: ButtonDebouncer,
}

impl<I: InputPort, T: TimePort> Poller<I, T> {
    pub fn new(inputs: I, clock: T, button_lockout_ms: u32) -> Self {
        Self {
            inputs,
            clock,
            debouncer: ButtonDebouncer::new(button_lockout_ms),
        }
    }

    /// Read the clock line once to seed the decoder.
    pub fn initial_state(&mut self) -> Result<RotaryState, InputError> {
        let clock = self.inputs.read_line(InputLine::Clock)?;
        Ok(RotaryState::new(clock))
    }

    /// Read all three lines. The button level is inverted (active low), so
    /// the returned flag is `true` while the button is held.
    pub fn sample(&mut self) -> Result<(EncoderSample, bool), InputError> {
        let clock = self.inputs.read_line(InputLine::Clock)?;
        let data = self.inputs.read_line(InputLine::Data)?;
        let pressed = !self.inputs.read_line(InputLine::Button)?;
        Ok((EncoderSample { clock, data }, pressed))
    }

    /// One sample → decode → commit cycle.
    pub fn poll_once(
        &mut self,
        shared: &SharedState,
        sink: &mut impl EventSink,
    ) -> Result<PollOutcome, InputError> {
        let (sample, pressed) = self.sample()?;
        let now_ms = self.clock.uptime_ms();
        let debouncer = &mut self.debouncer;

        let outcome = shared.update(|state| {
            let from = state.encoder.position();
            let moved = state
                .encoder
                .apply(sample)
                .map(|_| (from, state.encoder.position()));
            let toggled = debouncer.tick(&mut state.button, pressed, now_ms);
            PollOutcome { moved, toggled }
        });

        if let Some((from, to)) = outcome.moved {
            debug!("poller: position {} -> {}", from, to);
            sink.emit(&AppEvent::PositionChanged { from, to });
        }
        if let Some(toggle) = outcome.toggled {
            debug!("poller: toggle -> {}", toggle);
            sink.emit(&AppEvent::ToggleChanged(toggle));
        }
        Ok(outcome)
    }

    /// Poll until `shutdown` is raised or a read fails.
    pub fn run(
        &mut self,
        shared: &SharedState,
        sink: &mut impl EventSink,
        ticker: &mut Ticker,
        shutdown: &ShutdownSignal,
    ) -> Result<(), InputError> {
        info!("poller: sampling every {:?}", ticker.interval());
        loop {
            self.poll_once(shared, sink)?;
            if !ticker.wait(shutdown) {
                break;
            }
        }
        info!("poller: stopped ({} schedule re-anchors)", ticker.resyncs());
        Ok(())
    }
}
