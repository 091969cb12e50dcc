//! Rotary relay library.
//!
//! Rotary encoder and push-button poller that republishes its state over
//! TCP, plus the client that persists that stream. Both binaries are thin
//! wrappers around [`app::runtime::run_host`] and [`client::run_client`];
//! everything else is exposed for integration testing.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod client;
pub mod config;
pub mod drivers;
pub mod error;
pub mod net;
pub mod pins;
pub mod scheduler;
