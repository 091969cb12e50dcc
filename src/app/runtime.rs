//! Host runtime: wires the poller, server and display onto threads.
//!
//! ```text
//!   poller ──(1 ms)──▶ SharedState ◀──(1/N s)── publisher ──▶ ClientSlot ◀── acceptor
//!                          │
//!                          └──(10 ms)── display
//! ```
//!
//! All workers run inside one `std::thread::scope` and borrow the shared
//! state directly. Each worker raises the shutdown signal when it exits, so
//! a failing or panicking worker stops the others. The publisher and
//! acceptor only exist when a publish rate is configured; the display only
//! when one is supplied.

use std::thread;

use log::{error, info};

use crate::adapters::log_sink::LogEventSink;
use crate::adapters::time::MonotonicClock;
use crate::config::HostConfig;
use crate::error::Result;
use crate::net::server::HostServer;
use crate::scheduler::Ticker;

use super::display;
use super::events::AppEvent;
use super::poller::Poller;
use super::ports::{DisplayPort, EventSink, InputPort};
use super::shared::SharedState;
use super::shutdown::ShutdownSignal;

/// Raises the shutdown signal when dropped, including during unwinding.
struct StopOnExit<'a>(&'a ShutdownSignal);

impl Drop for StopOnExit<'_> {
    fn drop(&mut self) {
        self.0.trigger();
    }
}

/// Run the host until `shutdown` is raised or the poller fails.
///
/// Blocks the calling thread. Returns the poller's input error, if any;
/// a worker panic is propagated after every other worker has stopped.
pub fn run_host<I, D>(
    config: &HostConfig,
    inputs: I,
    display: Option<D>,
    shutdown: &ShutdownSignal,
) -> Result<()>
where
    I: InputPort + Send,
    D: DisplayPort + Send,
{
    config.validate()?;

    let mut sink = LogEventSink::new();
    let mut poller = Poller::new(inputs, MonotonicClock::new(), config.button_lockout_ms);
    let shared = SharedState::new(poller.initial_state()?);
    sink.emit(&AppEvent::Started(shared.read()));

    let server = match config.publish_interval() {
        Some(_) => Some(HostServer::bind(config, &mut sink)?),
        None => {
            info!("runtime: local mode, TCP server disabled");
            None
        }
    };

    let polled = thread::scope(|s| {
        let shared = &shared;

        let poller_thread = s.spawn(move || {
            let _stop = StopOnExit(shutdown);
            let mut ticker = Ticker::new("poller", config.poll_interval(), config.jitter_tolerance());
            poller.run(shared, &mut LogEventSink::new(), &mut ticker, shutdown)
        });

        if let (Some(server), Some(interval)) = (server.as_ref(), config.publish_interval()) {
            s.spawn(move || {
                let _stop = StopOnExit(shutdown);
                server.run_acceptor(&mut LogEventSink::new(), shutdown);
            });
            s.spawn(move || {
                let _stop = StopOnExit(shutdown);
                let mut ticker = Ticker::new("publisher", interval, config.jitter_tolerance());
                server.run_publisher(shared, &mut LogEventSink::new(), &mut ticker, shutdown);
            });
        }

        if let Some(mut display) = display {
            s.spawn(move || {
                let _stop = StopOnExit(shutdown);
                let mut ticker =
                    Ticker::new("display", config.display_refresh(), config.jitter_tolerance());
                display::run(shared, &mut display, &mut ticker, shutdown);
            });
        }

        match poller_thread.join() {
            Ok(result) => result,
            Err(panic) => std::panic::resume_unwind(panic),
        }
    });

    sink.emit(&AppEvent::ShuttingDown);
    drop(server);

    polled.map_err(|e| {
        error!("runtime: poller failed: {}", e);
        e.into()
    })
}
