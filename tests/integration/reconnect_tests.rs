//! Client replacement and loss on the host side.

use std::io::Read;
use std::time::Duration;

use rotary_relay::adapters::log_sink::RecordingSink;
use rotary_relay::app::events::AppEvent;
use rotary_relay::app::shared::{RotaryState, SharedState};
use rotary_relay::config::HostConfig;
use rotary_relay::drivers::button::Toggle;
use rotary_relay::net::server::HostServer;
use rotary_relay::net::slot::SendOutcome;

use crate::mock_hw::{connect, wait_until};

fn server(sink: &mut RecordingSink) -> HostServer {
    let config = HostConfig {
        bind_host: "127.0.0.1".to_owned(),
        port: 0,
        updates_per_second: Some(10),
        ..HostConfig::default()
    };
    HostServer::bind(&config, sink).unwrap()
}

#[test]
fn newer_client_replaces_older_one() {
    let mut sink = RecordingSink::default();
    let server = server(&mut sink);
    let addr = server.local_addr().unwrap();

    let mut first = connect(addr);
    assert!(wait_until(Duration::from_secs(2), || server.poll_accept(&mut sink)));
    let first_addr = first.local_addr().unwrap();

    let mut second = connect(addr);
    assert!(wait_until(Duration::from_secs(2), || server.poll_accept(&mut sink)));

    let mut buf = [0u8; 16];
    assert_eq!(first.read(&mut buf).unwrap(), 0, "first client should see EOF");

    let shared = SharedState::new(RotaryState::new(true));
    shared.write(42, Toggle::On);
    assert_eq!(server.publish_once(&shared, &mut sink), SendOutcome::Sent);
    let n = second.read(&mut buf).unwrap();
    assert_eq!(&buf[..n], b"42;1");

    assert!(sink.events.contains(&AppEvent::ClientSuperseded(Some(first_addr))));
    let connects = sink
        .events
        .iter()
        .filter(|e| matches!(e, AppEvent::ClientConnected(_)))
        .count();
    assert_eq!(connects, 2);
}

#[test]
fn vanished_client_is_dropped_and_slot_reopens() {
    let mut sink = RecordingSink::default();
    let server = server(&mut sink);
    let addr = server.local_addr().unwrap();
    let shared = SharedState::new(RotaryState::new(true));

    let gone = connect(addr);
    assert!(wait_until(Duration::from_secs(2), || server.poll_accept(&mut sink)));
    drop(gone);

    // The first write after the peer closes may still be buffered; keep
    // publishing until the failure surfaces.
    let dropped = wait_until(Duration::from_secs(2), || {
        matches!(server.publish_once(&shared, &mut sink), SendOutcome::Dropped { .. })
    });
    assert!(dropped);
    assert!(!server.is_client_connected());
    assert_eq!(server.publish_once(&shared, &mut sink), SendOutcome::NoClient);
    assert!(sink.events.iter().any(|e| matches!(e, AppEvent::ClientDropped { .. })));

    let mut next = connect(addr);
    assert!(wait_until(Duration::from_secs(2), || server.poll_accept(&mut sink)));
    assert_eq!(server.publish_once(&shared, &mut sink), SendOutcome::Sent);
    let mut buf = [0u8; 16];
    let n = next.read(&mut buf).unwrap();
    assert_eq!(&buf[..n], b"0;0");
}
