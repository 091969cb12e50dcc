//! Host-side TCP server: the acceptor plus the client slot it shares with
//! the publisher.

use std::net::{SocketAddr, TcpStream};
use std::sync::{Mutex, PoisonError};

use log::info;

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;
use crate::app::shared::SharedState;
use crate::app::shutdown::ShutdownSignal;
use crate::config::HostConfig;
use crate::error::Result;
use crate::scheduler::Ticker;

use super::acceptor::Acceptor;
use super::publisher;
use super::slot::{ClientSlot, SendOutcome};

pub struct HostServer {
    acceptor: Acceptor,
    slot: Mutex<ClientSlot<TcpStream>>,
}

impl HostServer {
    /// Bind the listener described by `config`.
    pub fn bind(config: &HostConfig, sink: &mut impl EventSink) -> Result<Self> {
        let acceptor = Acceptor::bind(&config.bind_addr(), config.accept_poll(), config.write_timeout())?;
        let addr = acceptor.local_addr()?;
        info!("server: TCP server listening on {}", addr);
        sink.emit(&AppEvent::Listening(addr));
        Ok(Self {
            acceptor,
            slot: Mutex::new(ClientSlot::default()),
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        self.acceptor.local_addr()
    }

    pub fn is_client_connected(&self) -> bool {
        self.slot().is_connected()
    }

    /// Accept at most one pending connection.
    pub fn poll_accept(&self, sink: &mut impl EventSink) -> bool {
        self.acceptor.poll_accept(&self.slot, sink)
    }

    /// Publish the current state once.
    pub fn publish_once(&self, shared: &SharedState, sink: &mut impl EventSink) -> SendOutcome {
        publisher::publish_once(shared, &self.slot, sink)
    }

    /// Accept loop; run on its own thread.
    pub fn run_acceptor(&self, sink: &mut impl EventSink, shutdown: &ShutdownSignal) {
        self.acceptor.run(&self.slot, sink, shutdown);
    }

    /// Publish loop; run on its own thread.
    pub fn run_publisher(
        &self,
        shared: &SharedState,
        sink: &mut impl EventSink,
        ticker: &mut Ticker,
        shutdown: &ShutdownSignal,
    ) {
        publisher::run(shared, &self.slot, sink, ticker, shutdown);
    }

    /// Close the current client, if any.
    pub fn disconnect(&self) {
        self.slot().disconnect();
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, ClientSlot<TcpStream>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for HostServer {
    fn drop(&mut self) {
        self.disconnect();
    }
}
