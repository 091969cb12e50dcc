//! Wire format.
//!
//! Each publish is the ASCII text `"<position>;<toggle>"`, e.g. `"42;1"`,
//! with no terminator and no length prefix. The host re-sends it at a fixed
//! rate whether or not it changed. Because there is no framing, a single
//! receive on the client may hold several concatenated messages or a partial
//! one; consumers compare whole receive payloads and accept that.

use core::fmt::Write as _;

use crate::app::shared::Snapshot;
use crate::drivers::button::Toggle;
use crate::drivers::encoder::POSITION_MAX;
use crate::error::{Error, Result};

/// Longest message is `"100;1"`.
pub const MAX_MESSAGE_LEN: usize = 16;

/// One encoded message.
pub type WireMessage = heapless::String<MAX_MESSAGE_LEN>;

/// Field separator.
pub const SEPARATOR: char = ';';

/// Encode a snapshot.
pub fn encode(snapshot: Snapshot) -> WireMessage {
    let mut msg = WireMessage::new();
    let _ = write!(msg, "{}{}{}", snapshot.position, SEPARATOR, snapshot.toggle.as_u8());
    msg
}

/// Decode exactly one message.
///
/// Merged or truncated payloads are rejected; callers that only need to
/// persist the raw text do not have to call this.
pub fn decode(text: &str) -> Result<Snapshot> {
    let (position, toggle) = text
        .split_once(SEPARATOR)
        .ok_or(Error::Protocol("missing separator"))?;
    if position.is_empty() || !position.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::Protocol("position is not a number"));
    }
    let position: u8 = position
        .parse()
        .map_err(|_| Error::Protocol("position is not a number"))?;
    if position > POSITION_MAX {
        return Err(Error::Protocol("position out of range"));
    }
    let toggle = match toggle {
        "0" => Toggle::Off,
        "1" => Toggle::On,
        _ => return Err(Error::Protocol("toggle must be 0 or 1")),
    };
    Ok(Snapshot { position, toggle })
}
