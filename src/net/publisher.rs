//! Fixed-rate state publisher.
//!
//! Every tick: snapshot the shared state, encode it, and push it to the
//! current client. Nothing is queued: a client that connects later only
//! sees the state as of its first tick, and a failed write simply clears
//! the slot until the acceptor adopts a new connection.

use std::sync::{Mutex, PoisonError};

use log::info;

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;
use crate::app::shared::SharedState;
use crate::app::shutdown::ShutdownSignal;
use crate::scheduler::Ticker;

use super::protocol;
use super::slot::{ClientSlot, SendOutcome};
use super::transport::Subscriber;

/// Publish the current state once.
pub fn publish_once<S: Subscriber>(
    shared: &SharedState,
    slot: &Mutex<ClientSlot<S>>,
    sink: &mut impl EventSink,
) -> SendOutcome {
    let message = protocol::encode(shared.read());
    let outcome = slot
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .send(message.as_bytes());

    if let SendOutcome::Dropped { peer, reason } = outcome {
        sink.emit(&AppEvent::ClientDropped { peer, reason });
    }
    outcome
}

/// Publish every tick until `shutdown` is raised.
pub fn run<S: Subscriber>(
    shared: &SharedState,
    slot: &Mutex<ClientSlot<S>>,
    sink: &mut impl EventSink,
    ticker: &mut Ticker,
    shutdown: &ShutdownSignal,
) {
    info!("publisher: sending every {:?}", ticker.interval());
    while ticker.wait(shutdown) {
        publish_once(shared, slot, sink);
    }
    info!("publisher: stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::shared::RotaryState;
    use crate::drivers::button::Toggle;
    use std::io;
    use std::net::SocketAddr;

    #[derive(Default)]
    struct Capture {
        sent: Vec<String>,
        broken: bool,
    }

    impl Subscriber for Capture {
        fn peer(&self) -> Option<SocketAddr> {
            None
        }
        fn send(&mut self, data: &[u8]) -> io::Result<()> {
            if self.broken {
                return Err(io::Error::from(io::ErrorKind::BrokenPipe));
            }
            self.sent.push(String::from_utf8_lossy(data).into_owned());
            Ok(())
        }
        fn close(&mut self) {}
    }

    #[derive(Default)]
    struct Recorder(Vec<AppEvent>);
    impl EventSink for Recorder {
        fn emit(&mut self, event: &AppEvent) {
            self.0.push(event.clone());
        }
    }

    #[test]
    fn publishes_latest_snapshot_every_time() {
        let shared = SharedState::new(RotaryState::new(false));
        let slot = Mutex::new(ClientSlot::default());
        slot.lock().unwrap().adopt(Capture::default());
        let mut sink = Recorder::default();

        shared.write(3, Toggle::Off);
        assert_eq!(publish_once(&shared, &slot, &mut sink), SendOutcome::Sent);
        assert_eq!(publish_once(&shared, &slot, &mut sink), SendOutcome::Sent);
        shared.write(4, Toggle::On);
        publish_once(&shared, &slot, &mut sink);

        let guard = slot.lock().unwrap();
        let ClientSlot::Connected(client) = &*guard else {
            panic!("expected a client");
        };
        assert_eq!(client.sent, vec!["3;0", "3;0", "4;1"]);
    }

    #[test]
    fn broken_client_is_dropped_and_reported() {
        let shared = SharedState::new(RotaryState::new(false));
        let slot = Mutex::new(ClientSlot::default());
        slot.lock().unwrap().adopt(Capture {
            broken: true,
            ..Capture::default()
        });
        let mut sink = Recorder::default();

        assert!(matches!(
            publish_once(&shared, &slot, &mut sink),
            SendOutcome::Dropped { .. }
        ));
        assert_eq!(publish_once(&shared, &slot, &mut sink), SendOutcome::NoClient);
        assert_eq!(
            sink.0,
            vec![AppEvent::ClientDropped {
                peer: None,
                reason: io::ErrorKind::BrokenPipe
            }]
        );
    }
}
