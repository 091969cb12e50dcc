//! Client consumer against a real output file.

use std::io::Cursor;
use std::time::Duration;

use rotary_relay::app::shutdown::ShutdownSignal;
use rotary_relay::client::consumer::{Consumer, SessionEnd};
use rotary_relay::client::output_log::FileOutputLog;

use crate::mock_hw::{ManualClock, ScratchFile};

#[test]
fn consecutive_duplicates_become_one_line() {
    let file = ScratchFile::new("dedup");
    let clock = ManualClock::default();
    let mut consumer = Consumer::new(
        FileOutputLog::create(&file.0).unwrap(),
        clock,
        Duration::from_secs(3600),
    );

    for payload in ["0;0", "0;0", "1;0", "1;0", "1;1", "0;1"] {
        consumer.handle_payload(payload.as_bytes()).unwrap();
    }
    assert_eq!(file.contents(), "0;0\n1;0\n1;1\n0;1\n");
}

#[test]
fn purge_truncates_without_new_values() {
    let file = ScratchFile::new("purge");
    let clock = ManualClock::default();
    let mut consumer = Consumer::new(
        FileOutputLog::create(&file.0).unwrap(),
        clock.clone(),
        Duration::from_secs(60),
    );

    consumer.handle_payload(b"7;1").unwrap();
    assert_eq!(file.contents(), "7;1\n");

    clock.advance(Duration::from_secs(30));
    assert!(!consumer.check_purge());
    assert_eq!(file.contents(), "7;1\n");

    clock.advance(Duration::from_secs(30));
    assert!(consumer.check_purge());
    assert_eq!(file.contents(), "");

    consumer.handle_payload(b"8;1").unwrap();
    assert_eq!(file.contents(), "8;1\n");
}

#[test]
fn session_over_a_closed_stream_ends_cleanly() {
    let file = ScratchFile::new("closed");
    let mut consumer = Consumer::new(
        FileOutputLog::create(&file.0).unwrap(),
        ManualClock::default(),
        Duration::from_secs(3600),
    );
    // A single read delivers the whole buffer, then EOF.
    let mut stream = Cursor::new(b"5;0".to_vec());
    let end = consumer.run(&mut stream, &ShutdownSignal::new()).unwrap();
    assert_eq!(end, SessionEnd::ServerClosed);
    assert_eq!(file.contents(), "5;0\n");
}
