use std::sync::mpsc::Sender;

/// Events one transport session delivers to its consumer, in order.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// Handshake completed; frames may follow.
    Opened,
    /// One inbound text frame, undecoded.
    Frame(String),
    /// The session ended: remote close, transport error, or failed
    /// connect. Terminal; nothing follows.
    Closed { reason: String },
}

/// Handle to one live session. Closing (or dropping) it tears the session
/// down; event delivery stops shortly after.
pub struct SessionHandle {
    shutdown: Option<Box<dyn FnOnce() + Send>>,
}

impl SessionHandle {
    pub fn new(shutdown: impl FnOnce() + Send + 'static) -> Self {
        Self {
            shutdown: Some(Box::new(shutdown)),
        }
    }

    pub fn close(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            shutdown();
        }
    }
}

impl Drop for SessionHandle {
    fn drop(&mut self) {
        self.close();
    }
}

/// A message-oriented, text-framed, bidirectional connection, consumed
/// abstractly. The console core only ever sees connect/receive/close;
/// swapping the socket for a scripted fake is how the manager is tested.
pub trait Transport: Send + Sync {
    /// Open a session to `url`. Events arrive on `events` until the
    /// session ends or the returned handle is closed. Connect failures are
    /// reported as a `Closed` event, not as an open error.
    fn open(&self, url: &str, events: Sender<SessionEvent>) -> SessionHandle;
}
