//! Single-client connection state machine.
//!
//! ```text
//!            adopt(c)                      adopt(c')  (c closed)
//!  NoClient ─────────▶ Connected(c) ─────────────────▶ Connected(c')
//!     ▲                     │
//!     └──── send failed / disconnect (c closed) ◀──────┘
//! ```
//!
//! At most one subscriber exists at any time. The acceptor adopts new
//! connections; the publisher sends to whatever is current.

use std::io;
use std::net::SocketAddr;

use log::{info, warn};

use super::transport::Subscriber;

/// Result of one publish attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// Nobody is connected; the message was dropped.
    NoClient,
    /// The message was written.
    Sent,
    /// The write failed and the client was closed and cleared.
    Dropped {
        peer: Option<SocketAddr>,
        reason: io::ErrorKind,
    },
}

/// The current client, if any.
#[derive(Debug)]
pub enum ClientSlot<S> {
    NoClient,
    Connected(S),
}

impl<S> Default for ClientSlot<S> {
    fn default() -> Self {
        Self::NoClient
    }
}

impl<S: Subscriber> ClientSlot<S> {
    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected(_))
    }

    pub fn peer(&self) -> Option<SocketAddr> {
        match self {
            Self::NoClient => None,
            Self::Connected(client) => client.peer(),
        }
    }

    /// Make `client` current. A previous client is closed and returned so
    /// the caller can report it.
    pub fn adopt(&mut self, client: S) -> Option<S> {
        match std::mem::replace(self, Self::Connected(client)) {
            Self::NoClient => None,
            Self::Connected(mut old) => {
                old.close();
                Some(old)
            }
        }
    }

    /// Close and clear the current client.
    pub fn disconnect(&mut self) {
        if let Self::Connected(mut old) = std::mem::take(self) {
            info!("slot: client {:?} disconnected", old.peer());
            old.close();
        }
    }

    /// Send to the current client. On failure the client is closed and the
    /// slot returns to `NoClient`; there is no retry.
    pub fn send(&mut self, data: &[u8]) -> SendOutcome {
        let Self::Connected(client) = self else {
            return SendOutcome::NoClient;
        };
        match client.send(data) {
            Ok(()) => SendOutcome::Sent,
            Err(e) => {
                let peer = client.peer();
                warn!("slot: lost connection to {:?}: {}", peer, e);
                client.close();
                *self = Self::NoClient;
                SendOutcome::Dropped {
                    peer,
                    reason: e.kind(),
                }
            }
        }
    }
}
