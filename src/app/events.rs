//! Outbound application events.
//!
//! The host loops emit these through the
//! [`EventSink`](super::ports::EventSink) port. Adapters on the other side
//! decide what to do with them; in production they go to the log.

use std::net::SocketAddr;

use crate::drivers::button::Toggle;

use super::shared::Snapshot;

/// Structured events emitted by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// The poller took its initial reading.
    Started(Snapshot),

    /// The encoder moved one step.
    PositionChanged { from: u8, to: u8 },

    /// A button press flipped the toggle.
    ToggleChanged(Toggle),

    /// The TCP listener is bound.
    Listening(SocketAddr),

    /// A client became the publish target.
    ClientConnected(Option<SocketAddr>),

    /// A newer connection replaced this client.
    ClientSuperseded(Option<SocketAddr>),

    /// Writing to the client failed; it was dropped.
    ClientDropped {
        peer: Option<SocketAddr>,
        reason: std::io::ErrorKind,
    },

    /// Shutdown was requested.
    ShuttingDown,
}
