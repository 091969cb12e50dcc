//! `rotary-client` core: connect, consume, log.
//!
//! ```text
//!   TcpStream ──read()──▶ Consumer ──dedup──▶ FileOutputLog
//!                            ▲
//!                            └── MonotonicClock (purge timer)
//! ```

pub mod consumer;
pub mod output_log;

use std::net::TcpStream;

use log::{error, info};

use crate::adapters::time::MonotonicClock;
use crate::app::shutdown::ShutdownSignal;
use crate::config::ClientConfig;
use crate::error::Result;

use consumer::{Consumer, SessionEnd};
use output_log::FileOutputLog;

/// Connect to the host and consume its stream until it closes, `shutdown`
/// is raised, or an I/O error occurs. The output file is opened only after
/// the connection succeeds.
pub fn run_client(config: &ClientConfig, shutdown: &ShutdownSignal) -> Result<SessionEnd> {
    config.validate()?;

    let addr = config.server_addr();
    info!("client: connecting to {}...", addr);
    let mut stream = TcpStream::connect(&addr).inspect_err(|e| {
        error!("client: could not connect to {}: {}", addr, e);
    })?;
    stream.set_read_timeout(Some(config.read_timeout()))?;
    info!("client: connected to {}", addr);

    let log = FileOutputLog::create(&config.output)?;
    info!("client: writing values to {}", log.path().display());

    let mut consumer = Consumer::new(log, MonotonicClock::new(), config.purge_interval());
    consumer.run(&mut stream, shutdown)
}
