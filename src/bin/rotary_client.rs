//! rotary-client: persist the host's value stream to a file.
//!
//! Connects once. Each distinct value becomes one line in `--output`; the
//! file is truncated every `--purge-interval` seconds. Exits 0 when the host
//! closes the connection or on Ctrl-C, non-zero on connect or I/O failure.
#![deny(unused_must_use)]

use std::path::PathBuf;

use anyhow::{Context, Result};
use argh::FromArgs;
use log::info;

use rotary_relay::app::shutdown::ShutdownSignal;
use rotary_relay::client::consumer::SessionEnd;
use rotary_relay::client::run_client;
use rotary_relay::config::{ClientConfig, DEFAULT_OUTPUT, DEFAULT_PORT, DEFAULT_PURGE_INTERVAL_SECS};

fn default_output() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT)
}

#[derive(Debug, FromArgs)]
/// Rotary encoder TCP client.
struct Args {
    /// address of the host running the TCP server
    #[argh(positional)]
    host: String,
    /// server port (default: 56969)
    #[argh(option, default = "DEFAULT_PORT")]
    port: u16,
    /// file receiving the values (default: rotary_values.txt)
    #[argh(option, default = "default_output()")]
    output: PathBuf,
    /// truncate the output file every N seconds (default: 3600)
    #[argh(option, default = "DEFAULT_PURGE_INTERVAL_SECS")]
    purge_interval: u64,
}

impl From<Args> for ClientConfig {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            output: args.output,
            purge_interval_secs: args.purge_interval,
            ..Self::default()
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let config = ClientConfig::from(argh::from_env::<Args>());

    let shutdown = ShutdownSignal::new();
    let on_interrupt = shutdown.clone();
    ctrlc::set_handler(move || on_interrupt.trigger()).context("installing Ctrl-C handler")?;

    let end = run_client(&config, &shutdown)
        .with_context(|| format!("client session with {} failed", config.server_addr()))?;
    match end {
        SessionEnd::ServerClosed => info!("rotary-client: server closed the connection"),
        SessionEnd::Interrupted => info!("rotary-client: exiting"),
    }
    Ok(())
}
