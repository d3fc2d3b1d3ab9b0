use std::sync::mpsc::Sender;

use futures::StreamExt;
use tokio::sync::oneshot;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::debug;

use crate::transport::{SessionEvent, SessionHandle, Transport};
use crate::{Error, Result};

/// WebSocket transport. Owns a small tokio runtime; each `open` spawns one
/// session task that forwards frames over the caller's channel, so the
/// consumer side stays synchronous.
pub struct WsTransport {
    runtime: tokio::runtime::Runtime,
}

impl WsTransport {
    pub fn new() -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("wirelog-ws")
            .enable_all()
            .build()
            .map_err(Error::Io)?;
        Ok(Self { runtime })
    }
}

impl Transport for WsTransport {
    fn open(&self, url: &str, events: Sender<SessionEvent>) -> SessionHandle {
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let url = url.to_string();

        self.runtime.spawn(run_session(url, events, shutdown_rx));

        SessionHandle::new(move || {
            let _ = shutdown_tx.send(());
        })
    }
}

async fn run_session(
    url: String,
    events: Sender<SessionEvent>,
    mut shutdown: oneshot::Receiver<()>,
) {
    let stream = tokio::select! {
        _ = &mut shutdown => return,
        connected = connect_async(url.as_str()) => match connected {
            Ok((stream, _response)) => stream,
            Err(err) => {
                debug!(%url, error = %err, "connect failed");
                let _ = events.send(SessionEvent::Closed {
                    reason: err.to_string(),
                });
                return;
            }
        },
    };

    if events.send(SessionEvent::Opened).is_err() {
        return;
    }

    // Receive-only feed; the write half is never used.
    let (_write, mut read) = stream.split();

    loop {
        tokio::select! {
            _ = &mut shutdown => return,
            frame = read.next() => match frame {
                Some(Ok(Message::Text(text))) => {
                    if events.send(SessionEvent::Frame(text.to_string())).is_err() {
                        return;
                    }
                }
                Some(Ok(Message::Close(_))) | None => {
                    let _ = events.send(SessionEvent::Closed {
                        reason: "connection closed".to_string(),
                    });
                    return;
                }
                // Ping/pong are answered by the library; the feed is
                // text-framed, so binary frames carry nothing for us.
                Some(Ok(_)) => {}
                Some(Err(err)) => {
                    let _ = events.send(SessionEvent::Closed {
                        reason: err.to_string(),
                    });
                    return;
                }
            }
        }
    }
}
