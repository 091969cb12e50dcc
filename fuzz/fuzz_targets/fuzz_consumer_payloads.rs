//! Fuzz target: client `Consumer::handle_payload`
//!
//! Splits the input into payloads at 0xFF bytes and feeds them through a
//! consumer backed by an in-memory log. Checks:
//! - No panics on arbitrary bytes (invalid UTF-8 is an error, not a crash)
//! - No two consecutive log lines are equal
//!
//! cargo fuzz run fuzz_consumer_payloads

#![no_main]

use std::io;
use std::time::Duration;

use libfuzzer_sys::fuzz_target;
use rotary_relay::app::ports::TimePort;
use rotary_relay::client::consumer::Consumer;
use rotary_relay::client::output_log::OutputLog;

#[derive(Default)]
struct Lines(Vec<String>);

impl OutputLog for Lines {
    fn append_line(&mut self, line: &str) -> io::Result<()> {
        self.0.push(line.to_owned());
        Ok(())
    }

    fn purge(&mut self) -> io::Result<()> {
        self.0.clear();
        Ok(())
    }
}

struct Frozen;

impl TimePort for Frozen {
    fn uptime_ms(&self) -> u64 {
        0
    }
}

fuzz_target!(|data: &[u8]| {
    let mut consumer = Consumer::new(Lines::default(), Frozen, Duration::from_secs(3600));
    for payload in data.split(|&b| b == 0xff) {
        let _ = consumer.handle_payload(payload);
    }
    let lines = &consumer.log().0;
    assert!(lines.windows(2).all(|w| w[0] != w[1]));
});
