//! Connection acceptor.
//!
//! Owns the TCP listener and feeds accepted connections into the shared
//! [`ClientSlot`]. The listener is non-blocking and polled, so the loop can
//! observe the shutdown signal between accepts.
//!
//! ## Connection model
//!
//! 1. `bind()` creates the listener. `std::net` does not expose the listen
//!    backlog, so the OS default applies rather than a backlog of one.
//!    Connections queued behind it are still adopted in order, each
//!    replacing the last, so only the newest stays connected.
//! 2. `poll_accept()` takes at most one pending connection, configures it
//!    for blocking writes with a timeout, and adopts it. A client that was
//!    already connected is closed: the newest connection always wins.
//! 3. `run()` repeats step 2 every `accept_poll` until shutdown.

use std::io;
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;
use crate::app::shutdown::ShutdownSignal;
use crate::error::Result;

use super::slot::ClientSlot;

pub struct Acceptor {
    listener: TcpListener,
    poll: Duration,
    write_timeout: Duration,
}

impl Acceptor {
    /// Bind to `addr` (e.g. `"0.0.0.0:56969"`). Port `0` lets the OS pick;
    /// see [`local_addr`](Self::local_addr).
    pub fn bind(addr: &str, poll: Duration, write_timeout: Duration) -> Result<Self> {
        let listener = TcpListener::bind(addr)?;
        listener.set_nonblocking(true)?;
        Ok(Self {
            listener,
            poll,
            write_timeout,
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Accept one pending connection, if any. Returns `true` if a client
    /// was adopted.
    pub fn poll_accept(&self, slot: &Mutex<ClientSlot<TcpStream>>, sink: &mut impl EventSink) -> bool {
        match self.listener.accept() {
            Ok((stream, addr)) => {
                if let Err(e) = self.configure(&stream) {
                    warn!("acceptor: failed to configure client socket {}: {}", addr, e);
                    return false;
                }
                info!("acceptor: client connected from {}", addr);
                let (old_peer, superseded) = {
                    let mut slot = slot.lock().unwrap_or_else(PoisonError::into_inner);
                    let old_peer = slot.peer();
                    (old_peer, slot.adopt(stream).is_some())
                };
                if superseded {
                    info!("acceptor: closed previous client {:?}", old_peer);
                    sink.emit(&AppEvent::ClientSuperseded(old_peer));
                }
                sink.emit(&AppEvent::ClientConnected(Some(addr)));
                true
            }
            Err(ref e) if e.kind() == io::ErrorKind::WouldBlock => false,
            Err(e) => {
                warn!("acceptor: accept error: {}", e);
                false
            }
        }
    }

    /// Accept until `shutdown` is raised.
    pub fn run(&self, slot: &Mutex<ClientSlot<TcpStream>>, sink: &mut impl EventSink, shutdown: &ShutdownSignal) {
        info!("acceptor: waiting for a client to connect...");
        while !shutdown.is_triggered() {
            if !self.poll_accept(slot, sink) {
                std::thread::sleep(self.poll);
            }
        }
        info!("acceptor: stopped");
    }

    fn configure(&self, stream: &TcpStream) -> io::Result<()> {
        stream.set_nonblocking(false)?;
        stream.set_nodelay(true)?;
        stream.set_write_timeout(Some(self.write_timeout))
    }
}
