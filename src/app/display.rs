//! Display refresh loop.
//!
//! A pure reader of [`SharedState`]: it takes a snapshot at its own cadence
//! and hands it to a [`DisplayPort`]. It holds only a shared reference, so it
//! cannot affect the decoder's invariants.

use log::info;

use crate::scheduler::Ticker;

use super::ports::DisplayPort;
use super::shared::SharedState;
use super::shutdown::ShutdownSignal;

/// Render one frame.
pub fn refresh(shared: &SharedState, display: &mut impl DisplayPort) {
    display.render(shared.read());
}

/// Refresh until `shutdown` is raised.
pub fn run(
    shared: &SharedState,
    display: &mut impl DisplayPort,
    ticker: &mut Ticker,
    shutdown: &ShutdownSignal,
) {
    info!("display: refreshing every {:?}", ticker.interval());
    loop {
        refresh(shared, display);
        if !ticker.wait(shutdown) {
            break;
        }
    }
}
