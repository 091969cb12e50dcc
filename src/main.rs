//! rotary-host: encoder/button poller with optional TCP publishing.
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                     Adapters (outer ring)                     │
//! │                                                               │
//! │  GpioInputs (rppal | SimBoard)   MonotonicClock   LogEventSink│
//! │  TerminalDisplay                 HostServer (TCP)             │
//! │                                                               │
//! │  ─────────────── Port Trait Boundary ─────────────────        │
//! │                                                               │
//! │   Poller ──▶ SharedState ◀── Publisher / Display              │
//! │   (quadrature decode + button toggle)                         │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! Without `--server` the host runs locally: polling and display only, no
//! socket is opened.
#![deny(unused_must_use)]

use std::path::PathBuf;

use anyhow::{Context, Result};
use argh::FromArgs;
use log::info;

use rotary_relay::adapters::terminal_display::TerminalDisplay;
use rotary_relay::app::runtime::run_host;
use rotary_relay::app::shutdown::ShutdownSignal;
use rotary_relay::config::HostConfig;

#[derive(Debug, FromArgs)]
/// Rotary encoder poller with an optional TCP server.
struct Args {
    /// run the TCP server and send N updates per second
    #[argh(option, short = 's')]
    server: Option<u32>,
    /// address to bind the server to (default: 0.0.0.0)
    #[argh(option)]
    host: Option<String>,
    /// port to bind the server to (default: 56969)
    #[argh(option)]
    port: Option<u16>,
    /// run without the local display
    #[argh(switch, short = 'L')]
    headless: bool,
    /// JSON file with host settings; flags override it
    #[argh(option)]
    config: Option<PathBuf>,
}

impl Args {
    fn into_config(self) -> Result<HostConfig> {
        let mut config = match &self.config {
            Some(path) => HostConfig::load(path)
                .with_context(|| format!("loading config from {}", path.display()))?,
            None => HostConfig::default(),
        };
        if self.server.is_some() {
            config.updates_per_second = self.server;
        }
        if let Some(host) = self.host {
            config.bind_host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        config.headless |= self.headless;
        config.validate().context("invalid host configuration")?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let config = argh::from_env::<Args>().into_config()?;

    info!("rotary-host v{}", env!("CARGO_PKG_VERSION"));

    let shutdown = ShutdownSignal::new();
    let on_interrupt = shutdown.clone();
    ctrlc::set_handler(move || on_interrupt.trigger()).context("installing Ctrl-C handler")?;

    #[cfg(feature = "rpi")]
    let inputs = rotary_relay::adapters::gpio::open_rpi().context("acquiring GPIO pins")?;
    #[cfg(not(feature = "rpi"))]
    let inputs = {
        log::warn!("built without the `rpi` feature: polling a simulated board");
        rotary_relay::adapters::sim_gpio::SimBoard::new().inputs()
    };

    let display = (!config.headless).then(TerminalDisplay::stdout);
    run_host(&config, inputs, display, &shutdown).context("host stopped with an error")?;

    info!("rotary-host: exiting");
    Ok(())
}
