//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises a specific subsystem
//! against mock adapters and loopback sockets. No real GPIO is required.

mod consumer_tests;
mod mock_hw;
mod pipeline_tests;
mod reconnect_tests;
