//! Fuzz target: `protocol::decode`
//!
//! Invariants checked:
//! - No panics under any UTF-8 input
//! - Every accepted message has a position in 0..=100
//! - Accepted messages re-encode to exactly the input text
//!
//! cargo fuzz run fuzz_wire_decode

#![no_main]

use libfuzzer_sys::fuzz_target;
use rotary_relay::drivers::encoder::POSITION_MAX;
use rotary_relay::net::protocol;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = core::str::from_utf8(data) else {
        return;
    };
    if let Ok(snapshot) = protocol::decode(text) {
        assert!(snapshot.position <= POSITION_MAX);
        // Leading zeros ("007;1") parse but are not canonical.
        if !text.starts_with('0') || text.starts_with("0;") {
            assert_eq!(protocol::encode(snapshot).as_str(), text);
        }
    }
});
