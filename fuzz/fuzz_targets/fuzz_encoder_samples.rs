//! Fuzz target: quadrature decoder and button toggle
//!
//! Each input byte is one poll sample: bit 0 = CLK, bit 1 = DT,
//! bit 2 = button pressed. Checks:
//! - Position never leaves 0..=100
//! - Position changes by at most one per sample
//! - The toggle flips only on a press edge
//!
//! cargo fuzz run fuzz_encoder_samples

#![no_main]

use libfuzzer_sys::fuzz_target;
use rotary_relay::drivers::button::ButtonState;
use rotary_relay::drivers::encoder::{EncoderSample, EncoderState, POSITION_MAX};

fuzz_target!(|data: &[u8]| {
    let Some((&first, rest)) = data.split_first() else {
        return;
    };
    let mut encoder = EncoderState::with_position(first % (POSITION_MAX + 1), first & 0x80 != 0);
    let mut button = ButtonState::default();

    for &byte in rest {
        let sample = EncoderSample {
            clock: byte & 0b001 != 0,
            data: byte & 0b010 != 0,
        };
        let pressed = byte & 0b100 != 0;

        let before = encoder.position();
        encoder.apply(sample);
        assert!(encoder.position() <= POSITION_MAX);
        assert!(encoder.position().abs_diff(before) <= 1);

        let edge = pressed && !button.last_pressed;
        let toggle = button.toggle;
        let flipped = button.apply(pressed).is_some();
        assert_eq!(flipped, edge);
        assert_eq!(button.toggle != toggle, edge);
    }
});
