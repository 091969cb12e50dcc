//! Network layer: single-client TCP publish path.
//!
//! ```text
//!  Acceptor ──adopt──▶ ClientSlot ◀──send── Publisher ◀── SharedState
//!                         │
//!                         ▼
//!                    TcpStream ──▶ "42;1" ──▶ rotary-client
//! ```

pub mod acceptor;
pub mod protocol;
pub mod publisher;
pub mod server;
pub mod slot;
pub mod transport;
