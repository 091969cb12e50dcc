//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the `log` facade (stderr through `env_logger` in the binaries). Position
//! and toggle changes go out at `debug` so a spinning knob does not flood
//! the default `info` level.

use log::{debug, info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`].
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started(snapshot) => {
                info!(
                    "START | position={} toggle={}",
                    snapshot.position, snapshot.toggle
                );
            }
            AppEvent::PositionChanged { from, to } => {
                debug!("ENC   | {} -> {}", from, to);
            }
            AppEvent::ToggleChanged(toggle) => {
                debug!("BTN   | toggle={}", toggle);
            }
            AppEvent::Listening(addr) => {
                info!("NET   | listening on {}", addr);
            }
            AppEvent::ClientConnected(peer) => {
                info!("NET   | client connected: {:?}", peer);
            }
            AppEvent::ClientSuperseded(peer) => {
                info!("NET   | client {:?} replaced by newer connection", peer);
            }
            AppEvent::ClientDropped { peer, reason } => {
                warn!("NET   | client {:?} dropped: {}", peer, reason);
            }
            AppEvent::ShuttingDown => {
                info!("STOP  | shutting down");
            }
        }
    }
}

/// Sink that records events in memory. Used by tests.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
