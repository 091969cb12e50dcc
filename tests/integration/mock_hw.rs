//! Mock hardware and helpers for integration tests.
//!
//! Pin-level simulation comes from the library's `SimBoard`; this file adds
//! the pieces tests need to control: a manually advanced clock, an input
//! adapter that fails on demand, and scratch files.

use std::net::TcpStream;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use rotary_relay::app::ports::{InputPort, TimePort};
use rotary_relay::error::InputError;
use rotary_relay::pins::InputLine;

// ── Manual clock ──────────────────────────────────────────────

/// Clock that only moves when told to. Clones share the reading.
#[derive(Debug, Clone, Default)]
pub struct ManualClock(Arc<AtomicU64>);

#[allow(dead_code)]
impl ManualClock {
    pub fn advance(&self, by: Duration) {
        self.0.fetch_add(by.as_millis() as u64, Ordering::Relaxed);
    }
}

impl TimePort for ManualClock {
    fn uptime_ms(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}

// ── Failing inputs ────────────────────────────────────────────

/// Wraps another input adapter and fails every read once `budget` reads
/// have been served.
pub struct FlakyInputs<I> {
    inner: I,
    budget: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl<I> FlakyInputs<I> {
    pub fn new(inner: I, budget: usize) -> Self {
        Self {
            inner,
            budget: Arc::new(AtomicUsize::new(budget)),
        }
    }
}

impl<I: InputPort> InputPort for FlakyInputs<I> {
    fn read_line(&mut self, line: InputLine) -> Result<bool, InputError> {
        let left = self.budget.load(Ordering::Relaxed);
        if left == 0 {
            return Err(InputError::ReadFailed(line));
        }
        self.budget.store(left - 1, Ordering::Relaxed);
        self.inner.read_line(line)
    }
}

// ── Helpers ───────────────────────────────────────────────────

/// Unique path in the temp dir; removed on drop.
pub struct ScratchFile(pub PathBuf);

#[allow(dead_code)]
impl ScratchFile {
    pub fn new(name: &str) -> Self {
        Self(std::env::temp_dir().join(format!(
            "rotary-relay-it-{}-{}",
            std::process::id(),
            name
        )))
    }

    pub fn contents(&self) -> String {
        std::fs::read_to_string(&self.0).unwrap_or_default()
    }
}

impl Drop for ScratchFile {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.0);
    }
}

/// Retry `f` until it returns true or `timeout` elapses.
#[allow(dead_code)]
pub fn wait_until(timeout: Duration, mut f: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if f() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    f()
}

/// Loopback client with a read timeout so a broken test fails instead of
/// hanging.
#[allow(dead_code)]
pub fn connect(addr: std::net::SocketAddr) -> TcpStream {
    let stream = TcpStream::connect(addr).unwrap();
    stream.set_read_timeout(Some(Duration::from_secs(2))).unwrap();
    stream
}
