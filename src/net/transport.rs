//! Subscriber abstraction: the write side of one connected client.
//!
//! The publisher and the client slot are generic over `Subscriber`, so the
//! single-client state machine is testable without sockets. The production
//! implementation is `std::net::TcpStream`.

use std::io::{self, Write};
use std::net::{Shutdown, SocketAddr, TcpStream};

/// A connected consumer of published messages.
pub trait Subscriber {
    /// Remote address, if known.
    fn peer(&self) -> Option<SocketAddr>;

    /// Write the whole message.
    fn send(&mut self, data: &[u8]) -> io::Result<()>;

    /// Close the connection. Errors are ignored: the peer may already be gone.
    fn close(&mut self);
}

impl Subscriber for TcpStream {
    fn peer(&self) -> Option<SocketAddr> {
        self.peer_addr().ok()
    }

    fn send(&mut self, data: &[u8]) -> io::Result<()> {
        self.write_all(data)?;
        self.flush()
    }

    fn close(&mut self) {
        let _ = self.shutdown(Shutdown::Both);
    }
}
