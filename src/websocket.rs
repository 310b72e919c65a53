//! WebSocket transport driver.
//!
//! The connection runs on its own network thread with a tokio runtime.
//! Outbound frames reach it over an unbounded channel so a send never blocks
//! the caller; lifecycle events come back over a crossbeam channel.

use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::Sender;
use futures_util::{SinkExt, StreamExt};
use tokio::runtime::Runtime;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::time::{self, Instant};
use tokio_tungstenite::connect_async;
use tracing::{debug, error, info, warn};
use tungstenite::protocol::Message;
use url::Url;

use crate::session::{Transport, TransportEvent};
use crate::{ChatError, Result};

/// How long to wait for the server to answer our close frame.
pub const CLOSE_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Debug)]
enum Outgoing {
    Frame(String),
    Close,
}

/// Handle to a connection running on the network thread.
pub struct WsHandle {
    outgoing: UnboundedSender<Outgoing>,
    thread: JoinHandle<()>,
}

impl WsHandle {
    /// Ask the network thread to close the connection gracefully.
    pub fn close(&self) {
        let _ = self.outgoing.send(Outgoing::Close);
    }

    /// Wait for the network thread to finish.
    pub fn join(self) {
        drop(self.outgoing);
        if self.thread.join().is_err() {
            error!("network thread panicked");
        }
    }
}

impl Transport for WsHandle {
    /// Fails with `NotOpen` once the network thread has finished; write
    /// failures themselves arrive as transport events.
    fn transmit(&mut self, frame: String) -> Result<()> {
        self.outgoing
            .send(Outgoing::Frame(frame))
            .map_err(|_| ChatError::NotOpen)
    }
}

/// Connect to `url` on a new network thread.
///
/// Every outcome is reported through `events`, including a failed connect
/// (an `Error` followed by `Closed`). The sender is dropped only after the
/// outgoing channel, so a disconnected `events` means `transmit` fails.
pub fn spawn(url: Url, events: Sender<TransportEvent>) -> Result<WsHandle> {
    let (tx, rx) = mpsc::unbounded_channel::<Outgoing>();

    let thread = thread::Builder::new()
        .name("wschat-net".to_string())
        .spawn(move || {
            let rt = match Runtime::new() {
                Ok(rt) => rt,
                Err(e) => {
                    drop(rx);
                    error!(%e, "failed to create tokio runtime");
                    let _ = events.send(TransportEvent::Error(e.to_string()));
                    let _ = events.send(TransportEvent::Closed);
                    return;
                }
            };
            rt.block_on(run(url, rx, &events));
        })?;

    Ok(WsHandle {
        outgoing: tx,
        thread,
    })
}

async fn run(url: Url, mut outgoing: UnboundedReceiver<Outgoing>, events: &Sender<TransportEvent>) {
    info!(%url, "connecting");
    let (ws_stream, _resp) = match connect_async(url.as_str()).await {
        Ok(connected) => connected,
        Err(e) => {
            warn!(%e, "connect failed");
            let _ = events.send(TransportEvent::Error(e.to_string()));
            let _ = events.send(TransportEvent::Closed);
            return;
        }
    };
    let _ = events.send(TransportEvent::Opened);

    let (mut write, mut read) = ws_stream.split();
    let mut closing = false;
    let close_timer = time::sleep(CLOSE_TIMEOUT);
    tokio::pin!(close_timer);

    loop {
        tokio::select! {
            message = read.next() => match message {
                Some(Ok(Message::Text(text))) => {
                    debug!(len = text.len(), "received text frame");
                    let _ = events.send(TransportEvent::Message(text));
                }
                Some(Ok(Message::Binary(data))) => match String::from_utf8(data) {
                    Ok(text) => {
                        let _ = events.send(TransportEvent::Message(text));
                    }
                    Err(_) => debug!("dropping non-UTF-8 binary frame"),
                },
                Some(Ok(Message::Close(_))) | None => {
                    info!("connection closed");
                    let _ = events.send(TransportEvent::Closed);
                    break;
                }
                // Ping/pong are answered by tungstenite.
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    if closing {
                        let _ = events.send(TransportEvent::Closed);
                    } else {
                        warn!(%e, "receive failed");
                        let _ = events.send(TransportEvent::Error(e.to_string()));
                        let _ = events.send(TransportEvent::Closed);
                    }
                    break;
                }
            },
            command = outgoing.recv(), if !closing => match command {
                Some(Outgoing::Frame(frame)) => {
                    if let Err(e) = write.send(Message::Text(frame)).await {
                        warn!(%e, "send failed");
                        let _ = events.send(TransportEvent::Error(e.to_string()));
                        let _ = events.send(TransportEvent::Closed);
                        break;
                    }
                }
                Some(Outgoing::Close) | None => {
                    debug!("closing connection");
                    closing = true;
                    close_timer.as_mut().reset(Instant::now() + CLOSE_TIMEOUT);
                    if write.send(Message::Close(None)).await.is_err() {
                        let _ = events.send(TransportEvent::Closed);
                        break;
                    }
                }
            },
            () = &mut close_timer, if closing => {
                warn!("server did not answer close, dropping connection");
                let _ = events.send(TransportEvent::Closed);
                break;
            }
        }
    }
}
