//! Fixed-interval tick scheduling for the host loops.
//!
//! Every periodic loop (poller, publisher, display) paces itself with a
//! [`Ticker`]. Deadlines advance by exactly one interval so the long-run
//! rate does not drift with per-tick work. When a tick overruns its
//! deadline by more than the jitter tolerance, or by a whole interval or
//! more, the schedule is re-anchored to "now": missed ticks are coalesced
//! into the one being served, never fired back to back.
//!
//! ```text
//!   deadline ──┬── interval ──┬── interval ──┬─ ...
//!              │              │   ▲ late < min(tolerance, interval) → keep cadence
//!              │              │
//!              └─ otherwise → next = now + interval
//! ```

use std::time::{Duration, Instant};

use log::debug;

use crate::app::shutdown::ShutdownSignal;

/// Longest single sleep, so a raised [`ShutdownSignal`] is noticed promptly
/// even with slow publish rates.
const MAX_SLEEP_SLICE: Duration = Duration::from_millis(50);

/// Outcome of advancing a schedule by one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Advance {
    /// The deadline after the one just served.
    pub next: Instant,
    /// The tick was late by more than the tolerance and the schedule was
    /// re-anchored.
    pub resynced: bool,
}

/// Compute the deadline following `deadline` given the current time.
/// The returned deadline is always after `now`.
pub fn advance(deadline: Instant, now: Instant, interval: Duration, tolerance: Duration) -> Advance {
    let lateness = now.saturating_duration_since(deadline);
    if lateness > tolerance || lateness >= interval {
        Advance {
            next: now + interval,
            resynced: true,
        }
    } else {
        Advance {
            next: deadline + interval,
            resynced: false,
        }
    }
}

/// Periodic pacing with explicit interval and jitter tolerance.
pub struct Ticker {
    label: &'static str,
    interval: Duration,
    tolerance: Duration,
    next: Instant,
    resyncs: u64,
}

impl Ticker {
    /// First tick is due one `interval` from now.
    pub fn new(label: &'static str, interval: Duration, tolerance: Duration) -> Self {
        Self {
            label,
            interval,
            tolerance,
            next: Instant::now() + interval,
            resyncs: 0,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// How many times the schedule has been re-anchored.
    pub fn resyncs(&self) -> u64 {
        self.resyncs
    }

    /// Sleep until the next deadline.
    ///
    /// Returns `false` without waiting out the full interval if `shutdown`
    /// is raised in the meantime.
    pub fn wait(&mut self, shutdown: &ShutdownSignal) -> bool {
        loop {
            if shutdown.is_triggered() {
                return false;
            }
            let now = Instant::now();
            if now >= self.next {
                break;
            }
            std::thread::sleep((self.next - now).min(MAX_SLEEP_SLICE));
        }

        let step = advance(self.next, Instant::now(), self.interval, self.tolerance);
        if step.resynced {
            self.resyncs += 1;
            debug!("{}: tick overran by more than {:?}, re-anchoring", self.label, self.tolerance);
        }
        self.next = step.next;
        !shutdown.is_triggered()
    }
}
