// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event channel tests against an in-process WebSocket server.

use std::net::SocketAddr;
use std::time::Duration;

use futures_util::SinkExt;
use tokio::net::TcpListener;
use tokio_tungstenite::tungstenite::Message;

use strand_core::{EventType, JobEvent, ResourceType};

use super::*;

/// Spawn a one-connection server that sends `frames` after `initial_delay`,
/// pausing `between` before each frame, then holds the socket open.
async fn ws_server(
    frames: Vec<Message>,
    initial_delay: Duration,
    between: Duration,
) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let Ok((stream, _)) = listener.accept().await else { return };
        let Ok(mut ws) = tokio_tungstenite::accept_async(stream).await else { return };
        tokio::time::sleep(initial_delay).await;
        for frame in frames {
            tokio::time::sleep(between).await;
            if ws.send(frame).await.is_err() {
                return;
            }
        }
        tokio::time::sleep(Duration::from_secs(10)).await;
    });
    addr
}

fn event_frame(resource_type: &str, id: &str, event_type: &str) -> Message {
    Message::text(format!(
        r#"{{"resourceType": "{resource_type}", "resourceId": "{id}", "type": "{event_type}"}}"#
    ))
}

async fn open(addr: SocketAddr) -> EventChannel {
    EventChannel::open(&format!("ws://{addr}"), &"sess-1".into(), "tok")
        .await
        .unwrap()
}

fn expect_event(ev: ChannelEvent) -> JobEvent {
    match ev {
        ChannelEvent::Event(event) => event,
        other => panic!("expected an event, got {other:?}"),
    }
}

#[tokio::test]
async fn fans_out_every_event_in_wire_order() {
    let frames = vec![
        event_frame("JOB", "job-1", "UPDATE"),
        event_frame("DATASET", "ds-1", "CREATE"),
        event_frame("JOB", "job-1", "UPDATE"),
    ];
    let addr = ws_server(frames, Duration::from_millis(200), Duration::ZERO).await;

    let channel = open(addr).await;
    let mut a = channel.subscribe();
    let mut b = channel.subscribe();

    for rx in [&mut a, &mut b] {
        let first = expect_event(rx.recv().await.unwrap());
        assert_eq!(first.resource_id, "job-1");
        assert_eq!(first.resource_type, ResourceType::Job);

        let second = expect_event(rx.recv().await.unwrap());
        assert_eq!(second.resource_id, "ds-1");
        assert_eq!(second.event_type, EventType::Create);

        let third = expect_event(rx.recv().await.unwrap());
        assert_eq!(third.resource_id, "job-1");
    }
}

#[tokio::test]
async fn malformed_frame_errors_every_consumer() {
    let frames = vec![
        event_frame("JOB", "job-1", "UPDATE"),
        Message::text("this is not an event"),
    ];
    let addr = ws_server(frames, Duration::from_millis(200), Duration::ZERO).await;

    let channel = open(addr).await;
    let mut a = channel.subscribe();
    let mut b = channel.subscribe();

    for rx in [&mut a, &mut b] {
        expect_event(rx.recv().await.unwrap());
        match rx.recv().await.unwrap() {
            ChannelEvent::Malformed(reason) => assert!(reason.contains("bad event frame")),
            other => panic!("expected Malformed, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn server_close_is_reported_as_closed() {
    let frames = vec![event_frame("JOB", "job-1", "UPDATE"), Message::Close(None)];
    let addr = ws_server(frames, Duration::from_millis(200), Duration::ZERO).await;

    let channel = open(addr).await;
    let mut rx = channel.subscribe();

    expect_event(rx.recv().await.unwrap());
    assert!(matches!(rx.recv().await.unwrap(), ChannelEvent::Closed));
}

#[tokio::test]
async fn late_subscriber_misses_earlier_events() {
    let frames = vec![
        event_frame("JOB", "job-1", "UPDATE"),
        event_frame("JOB", "job-2", "UPDATE"),
    ];
    let addr = ws_server(frames, Duration::from_millis(100), Duration::from_millis(400)).await;

    let channel = open(addr).await;
    let mut early = channel.subscribe();

    let first = expect_event(early.recv().await.unwrap());
    assert_eq!(first.resource_id, "job-1");

    // Attached between the two events: only sees the second.
    let mut late = channel.subscribe();
    let second = expect_event(late.recv().await.unwrap());
    assert_eq!(second.resource_id, "job-2");

    let second_for_early = expect_event(early.recv().await.unwrap());
    assert_eq!(second_for_early.resource_id, "job-2");
}

#[tokio::test]
async fn refused_connection_is_a_connection_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let result = EventChannel::open(&format!("ws://{addr}"), &"sess-1".into(), "tok").await;
    assert!(matches!(result, Err(WatchError::Connection(_))));
}

#[tokio::test]
async fn local_close_notifies_subscribers() {
    let addr = ws_server(Vec::new(), Duration::from_millis(50), Duration::ZERO).await;

    let channel = open(addr).await;
    let mut rx = channel.subscribe();
    channel.close();

    assert!(matches!(rx.recv().await.unwrap(), ChannelEvent::Closed));
}

#[test]
fn parse_frame_round_trip() {
    let event = parse_frame(r#"{"resourceType": "JOB", "resourceId": "j", "type": "DELETE"}"#)
        .unwrap();
    assert_eq!(event.event_type, EventType::Delete);

    assert!(parse_frame("{}").is_err());
    assert!(parse_frame("[1,2]").is_err());
}
