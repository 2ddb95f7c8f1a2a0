// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Session event channel — one WebSocket connection fanned out to any
//! number of independent consumers.
//!
//! The receive loop is the only writer of connection state. Consumers hold
//! broadcast receivers and never touch the socket; when the last receiver is
//! dropped the loop notices the failed send and hangs up. There is no replay
//! buffer: subscribers attached after events were delivered miss them, which
//! is fine because consumers re-fetch full records rather than reconstruct
//! state from events.

use futures_util::StreamExt;
use tokio::sync::broadcast;
use tokio_tungstenite::tungstenite::Message;
use tokio_util::sync::CancellationToken;

use strand_core::{JobEvent, SessionId};

use crate::WatchError;

/// Fan-out capacity. A consumer that lags this far behind starts losing
/// events, which only delays its next re-fetch.
const CHANNEL_CAPACITY: usize = 256;

/// What the channel delivers to subscribers.
#[derive(Debug, Clone)]
pub enum ChannelEvent {
    /// A parsed event, in wire order.
    Event(JobEvent),
    /// The server closed the connection cleanly.
    Closed,
    /// The transport died. Terminal.
    Errored(String),
    /// An inbound frame that is not a valid event. Terminal.
    Malformed(String),
}

/// An open connection to a session's push-event endpoint.
pub struct EventChannel {
    tx: broadcast::Sender<ChannelEvent>,
    shutdown: CancellationToken,
}

impl EventChannel {
    /// Connect to `<events_base>/events/<session_id>?token=<token>` and
    /// start the receive loop.
    pub async fn open(
        events_base: &str,
        session_id: &SessionId,
        token: &str,
    ) -> Result<Self, WatchError> {
        let url = format!(
            "{}/events/{}?token={}",
            events_base.trim_end_matches('/'),
            session_id,
            token
        );
        let (ws, _) = tokio_tungstenite::connect_async(&url)
            .await
            .map_err(|e| WatchError::Connection(e.to_string()))?;
        tracing::debug!(%session_id, "event channel open");

        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        let shutdown = CancellationToken::new();
        tokio::spawn(receive_loop(ws, tx.clone(), shutdown.clone()));

        Ok(Self { tx, shutdown })
    }

    /// Attach a new consumer. Delivery starts with the next event; earlier
    /// events are not replayed.
    pub fn subscribe(&self) -> broadcast::Receiver<ChannelEvent> {
        self.tx.subscribe()
    }

    /// Tear down the connection. Subscribers see the stream end.
    pub fn close(&self) {
        self.shutdown.cancel();
    }
}

impl Drop for EventChannel {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn receive_loop<S>(
    ws: tokio_tungstenite::WebSocketStream<S>,
    tx: broadcast::Sender<ChannelEvent>,
    shutdown: CancellationToken,
) where
    S: tokio::io::AsyncRead + tokio::io::AsyncWrite + Unpin,
{
    let (_, mut read) = ws.split();

    // Events arriving before the first subscriber are dropped, not fatal;
    // once consumers have attached, losing the last one hangs up.
    let mut had_consumers = false;

    loop {
        tokio::select! {
            msg = read.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        had_consumers = had_consumers || tx.receiver_count() > 0;
                        match parse_frame(&text) {
                            Ok(event) => {
                                tracing::trace!(?event, "event received");
                                if tx.send(ChannelEvent::Event(event)).is_err() && had_consumers {
                                    tracing::debug!("all consumers gone, closing channel");
                                    break;
                                }
                            }
                            Err(reason) => {
                                tracing::warn!(%reason, "malformed frame, closing channel");
                                let _ = tx.send(ChannelEvent::Malformed(reason));
                                break;
                            }
                        }
                    }
                    Some(Ok(Message::Close(frame))) => {
                        tracing::debug!(?frame, "server closed event stream");
                        let _ = tx.send(ChannelEvent::Closed);
                        break;
                    }
                    None => {
                        let _ = tx.send(ChannelEvent::Errored(
                            "connection dropped mid-stream".to_string(),
                        ));
                        break;
                    }
                    Some(Err(e)) => {
                        let _ = tx.send(ChannelEvent::Errored(e.to_string()));
                        break;
                    }
                    _ => {} // Ping/Pong/Binary — ignore
                }
            }
            _ = shutdown.cancelled() => {
                let _ = tx.send(ChannelEvent::Closed);
                break;
            }
        }
    }
}

/// Parse one text frame into an event. Any parse failure is fatal for the
/// connection.
fn parse_frame(text: &str) -> Result<JobEvent, String> {
    serde_json::from_str(text).map_err(|e| format!("bad event frame: {e}"))
}

#[cfg(test)]
#[path = "channel_tests.rs"]
mod tests;
