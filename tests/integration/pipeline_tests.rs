//! Encoder → shared state → publisher → socket → consumer → file, driven
//! one step at a time.

use std::io::Read;
use std::time::Duration;

use rotary_relay::adapters::log_sink::RecordingSink;
use rotary_relay::adapters::sim_gpio::SimBoard;
use rotary_relay::app::events::AppEvent;
use rotary_relay::app::poller::Poller;
use rotary_relay::app::shared::SharedState;
use rotary_relay::client::consumer::Consumer;
use rotary_relay::client::output_log::FileOutputLog;
use rotary_relay::config::HostConfig;
use rotary_relay::drivers::button::Toggle;
use rotary_relay::net::server::HostServer;
use rotary_relay::net::slot::SendOutcome;

use crate::mock_hw::{ManualClock, ScratchFile, connect, wait_until};

fn loopback_config() -> HostConfig {
    HostConfig {
        bind_host: "127.0.0.1".to_owned(),
        port: 0,
        updates_per_second: Some(10),
        ..HostConfig::default()
    }
}

#[test]
fn three_clockwise_steps_reach_the_file_once() {
    let board = SimBoard::new();
    let mut sink = RecordingSink::default();
    let mut poller = Poller::new(board.inputs(), ManualClock::default(), 0);
    let shared = SharedState::new(poller.initial_state().unwrap());

    let server = HostServer::bind(&loopback_config(), &mut sink).unwrap();
    let mut client = connect(server.local_addr().unwrap());
    assert!(wait_until(Duration::from_secs(2), || server.poll_accept(&mut sink)));

    for _ in 0..3 {
        board.step_clockwise();
        poller.poll_once(&shared, &mut sink).unwrap();
    }
    assert_eq!(shared.read().position, 3);
    assert_eq!(shared.read().toggle, Toggle::Off);

    let file = ScratchFile::new("pipeline");
    let mut consumer = Consumer::new(
        FileOutputLog::create(&file.0).unwrap(),
        ManualClock::default(),
        Duration::from_secs(3600),
    );

    // Two publishes of the same state; read each one separately.
    let mut buf = [0u8; 16];
    for expect_written in [true, false] {
        assert_eq!(server.publish_once(&shared, &mut sink), SendOutcome::Sent);
        let n = client.read(&mut buf).unwrap();
        assert_eq!(&buf[..n], b"3;0");
        assert_eq!(consumer.handle_payload(&buf[..n]).unwrap(), expect_written);
    }
    assert_eq!(file.contents(), "3;0\n");

    let moves: Vec<_> = sink
        .events
        .iter()
        .filter(|e| matches!(e, AppEvent::PositionChanged { .. }))
        .collect();
    assert_eq!(moves.len(), 3);
}

#[test]
fn button_press_is_published_as_toggle() {
    let board = SimBoard::new();
    let mut sink = RecordingSink::default();
    let mut poller = Poller::new(board.inputs(), ManualClock::default(), 0);
    let shared = SharedState::new(poller.initial_state().unwrap());

    let server = HostServer::bind(&loopback_config(), &mut sink).unwrap();
    let mut client = connect(server.local_addr().unwrap());
    assert!(wait_until(Duration::from_secs(2), || server.poll_accept(&mut sink)));

    board.press();
    for _ in 0..5 {
        poller.poll_once(&shared, &mut sink).unwrap();
    }
    board.release();
    poller.poll_once(&shared, &mut sink).unwrap();

    assert_eq!(server.publish_once(&shared, &mut sink), SendOutcome::Sent);
    let mut buf = [0u8; 16];
    let n = client.read(&mut buf).unwrap();
    assert_eq!(&buf[..n], b"0;1");
    assert!(sink.events.contains(&AppEvent::ToggleChanged(Toggle::On)));
}
