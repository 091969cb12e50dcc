//! Stream consumer.
//!
//! Reads the host's unframed stream, keeps only values that differ from the
//! previous one, and truncates the output log on a fixed period.
//!
//! Each `read()` is treated as one payload. A read that happens to contain
//! two messages back to back (`"3;04;0"`) is stored as-is; it is logged at
//! debug level but not split.
//!
//! The purge timer is checked after every read, including reads that timed
//! out, so truncation happens on schedule even when the value never
//! changes. The last value is kept across purges: after a purge the log
//! stays empty until a *different* value arrives.

use std::io::{ErrorKind, Read};
use std::time::Duration;

use log::{debug, error, info};

use crate::app::ports::TimePort;
use crate::app::shutdown::ShutdownSignal;
use crate::config::RECV_BUFFER_LEN;
use crate::error::{Error, Result};
use crate::net::protocol;

use super::output_log::OutputLog;

/// Why a session ended without error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The host closed the connection.
    ServerClosed,
    /// Shutdown was requested locally.
    Interrupted,
}

pub struct Consumer<L, T> {
    log: L,
    clock: T,
    purge_interval: Duration,
    last_purge_ms: u64,
    last_value: Option<String>,
}

impl<L: OutputLog, T: TimePort> Consumer<L, T> {
    /// The purge baseline starts at the clock's current reading.
    pub fn new(log: L, clock: T, purge_interval: Duration) -> Self {
        let last_purge_ms = clock.uptime_ms();
        Self {
            log,
            clock,
            purge_interval,
            last_purge_ms,
            last_value: None,
        }
    }

    pub fn last_value(&self) -> Option<&str> {
        self.last_value.as_deref()
    }

    pub fn log(&self) -> &L {
        &self.log
    }

    /// Record one received payload. Returns `true` if it was written.
    pub fn handle_payload(&mut self, payload: &[u8]) -> Result<bool> {
        let text = core::str::from_utf8(payload)
            .map_err(|_| Error::Protocol("payload is not valid UTF-8"))?;
        if self.last_value.as_deref() == Some(text) {
            return Ok(false);
        }
        if protocol::decode(text).is_err() {
            debug!("client: payload {:?} is not a single message", text);
        }
        self.log.append_line(text)?;
        debug!("client: received {}", text);
        self.last_value = Some(text.to_owned());
        Ok(true)
    }

    /// Truncate the log if the purge interval has elapsed. Returns `true`
    /// when a purge was due. A failed purge is logged and the baseline is
    /// still reset.
    pub fn check_purge(&mut self) -> bool {
        let now = self.clock.uptime_ms();
        let interval_ms = u64::try_from(self.purge_interval.as_millis()).unwrap_or(u64::MAX);
        if now.saturating_sub(self.last_purge_ms) < interval_ms {
            return false;
        }
        info!("client: purging output after {:?}", self.purge_interval);
        if let Err(e) = self.log.purge() {
            error!("client: failed to purge output: {}", e);
        }
        self.last_purge_ms = now;
        true
    }

    /// Consume `reader` until the host closes it, `shutdown` is raised, or
    /// a read fails.
    ///
    /// `reader` should have a read timeout so the purge timer and the
    /// shutdown flag are serviced without traffic.
    pub fn run<R: Read>(&mut self, reader: &mut R, shutdown: &ShutdownSignal) -> Result<SessionEnd> {
        let mut buf = [0u8; RECV_BUFFER_LEN];
        loop {
            if shutdown.is_triggered() {
                info!("client: interrupted, exiting");
                return Ok(SessionEnd::Interrupted);
            }
            match reader.read(&mut buf) {
                Ok(0) => {
                    info!("client: server closed the connection");
                    return Ok(SessionEnd::ServerClosed);
                }
                Ok(n) => {
                    self.handle_payload(&buf[..n])?;
                }
                Err(e) if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut | ErrorKind::Interrupted) => {}
                Err(e) => {
                    error!("client: read failed: {}", e);
                    return Err(e.into());
                }
            }
            self.check_purge();
        }
    }
}
