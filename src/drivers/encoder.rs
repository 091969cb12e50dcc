//! Single-edge quadrature decoder for a mechanical rotary encoder.
//!
//! ## Hardware
//!
//! Two out-of-phase outputs, CLK and DT, both pulled up. Turning the shaft
//! produces a CLK transition per detent half-step; the level of DT at that
//! moment gives the direction.
//!
//! ## Decoding
//!
//! | CLK edge? | DT vs CLK | Effect                      |
//! |-----------|-----------|-----------------------------|
//! | no        | -         | none                        |
//! | yes       | differ    | +1 (clockwise), max 100     |
//! | yes       | equal     | −1 (counter-clockwise), min 0 |
//!
//! Only CLK transitions count; DT's own edges are ignored, so this yields one
//! step per CLK transition rather than per full four-state cycle.

/// Lowest reachable position.
pub const POSITION_MIN: u8 = 0;
/// Highest reachable position.
pub const POSITION_MAX: u8 = 100;

/// Instantaneous pin levels taken in one poll tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EncoderSample {
    pub clock: bool,
    pub data: bool,
}

/// Direction of an applied step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// DT differed from CLK at the edge; position incremented.
    Clockwise,
    /// DT matched CLK at the edge; position decremented.
    CounterClockwise,
}

/// Decoder state. `position` is always within
/// [`POSITION_MIN`]`..=`[`POSITION_MAX`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncoderState {
    position: u8,
    last_clock: bool,
}

impl EncoderState {
    /// Fresh state at position 0, seeded with the clock level read at startup
    /// so the first poll does not register a phantom edge.
    pub const fn new(initial_clock: bool) -> Self {
        Self {
            position: POSITION_MIN,
            last_clock: initial_clock,
        }
    }

    /// State at an arbitrary position (clamped into range).
    pub fn with_position(position: u8, last_clock: bool) -> Self {
        Self {
            position: position.min(POSITION_MAX),
            last_clock,
        }
    }

    pub fn position(&self) -> u8 {
        self.position
    }

    pub fn last_clock(&self) -> bool {
        self.last_clock
    }

    /// Overwrite the position (clamped into range); the clock history is kept.
    pub fn set_position(&mut self, position: u8) {
        self.position = position.min(POSITION_MAX);
    }

    /// Apply one sample in place.
    ///
    /// Returns the direction of the step that actually changed the position,
    /// or `None` when there was no CLK edge or the position was already at
    /// the relevant limit.
    pub fn apply(&mut self, sample: EncoderSample) -> Option<Direction> {
        let edge = sample.clock != self.last_clock;
        self.last_clock = sample.clock;

        if !edge {
            return None;
        }

        if sample.data != sample.clock {
            if self.position < POSITION_MAX {
                self.position += 1;
                return Some(Direction::Clockwise);
            }
        } else if self.position > POSITION_MIN {
            self.position -= 1;
            return Some(Direction::CounterClockwise);
        }
        None
    }
}

/// Pure form of [`EncoderState::apply`].
pub fn decode(sample: EncoderSample, state: EncoderState) -> EncoderState {
    let mut next = state;
    next.apply(sample);
    next
}
