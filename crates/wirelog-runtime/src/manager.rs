use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use tracing::{debug, info};
use wirelog_types::{ConnectionState, LogMessage};

use crate::config::Config;
use crate::machine::{self, ConnEvent, Effect};
use crate::transport::{SessionEvent, SessionHandle, Transport};

/// Invoked with `true` when the feed comes up, `false` when it drops.
pub type StatusSink = Box<dyn FnMut(bool) + Send>;

/// Tells the manager whether the hosting view is currently active. Only
/// consulted when deciding whether a dropped session schedules a retry.
pub type ViewActivity = Box<dyn Fn() -> bool + Send>;

/// Owns the single logical console session: one transport handle at most,
/// one retry deadline at most, auto-reconnect gated on view activity.
///
/// The manager is synchronous and single-consumer: transitions are
/// computed by [`machine::step`] and interpreted here, and all of it runs
/// on whichever loop calls [`poll`](Self::poll). The transport task only
/// forwards raw session events over a channel.
pub struct ConnectionManager {
    endpoint: String,
    retry_delay: Duration,
    transport: Arc<dyn Transport>,
    status_sink: StatusSink,
    view_active: ViewActivity,
    state: ConnectionState,
    retry_at: Option<Instant>,
    session: Option<(SessionHandle, Receiver<SessionEvent>)>,
}

impl ConnectionManager {
    pub fn new(
        config: &Config,
        transport: Arc<dyn Transport>,
        status_sink: StatusSink,
        view_active: ViewActivity,
    ) -> Self {
        Self {
            endpoint: config.endpoint_url(),
            retry_delay: config.reconnect_delay(),
            transport,
            status_sink,
            view_active,
            state: ConnectionState::Disconnected,
            retry_at: None,
            session: None,
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Open the session. No-op while one is already opening or open.
    pub fn connect(&mut self) {
        self.apply(ConnEvent::ConnectRequested);
    }

    /// Tear everything down: session, retry deadline, status. Safe to call
    /// from any state, any number of times.
    pub fn disconnect(&mut self) {
        self.apply(ConnEvent::DisconnectRequested);
    }

    /// Drive the session: fire a due retry, then drain transport events,
    /// blocking up to `wait` for the first one. Returns the messages
    /// decoded from this drain, in arrival order. Frames that fail to
    /// decode are dropped here and never surface.
    pub fn poll(&mut self, wait: Duration) -> Vec<LogMessage> {
        if let Some(at) = self.retry_at
            && Instant::now() >= at
        {
            self.apply(ConnEvent::RetryDue);
        }

        let mut events = Vec::new();
        match &self.session {
            Some((_, rx)) => match rx.recv_timeout(wait) {
                Ok(event) => {
                    events.push(event);
                    while let Ok(event) = rx.try_recv() {
                        events.push(event);
                    }
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => {
                    events.push(SessionEvent::Closed {
                        reason: "session task ended".to_string(),
                    });
                }
            },
            None => std::thread::sleep(wait),
        }

        let mut messages = Vec::new();
        for event in events {
            self.handle_session_event(event, &mut messages);
        }
        messages
    }

    fn handle_session_event(&mut self, event: SessionEvent, messages: &mut Vec<LogMessage>) {
        match event {
            SessionEvent::Opened => self.apply(ConnEvent::SessionOpened),
            SessionEvent::Frame(text) => match serde_json::from_str::<LogMessage>(&text) {
                Ok(msg) => messages.push(msg),
                Err(err) => {
                    // Malformed input is expected from a partially-buffered
                    // feed; the frame is simply lost.
                    debug!(error = %err, "dropping undecodable frame");
                }
            },
            SessionEvent::Closed { reason } => {
                debug!(%reason, "session closed");
                self.apply(ConnEvent::SessionClosed);
            }
        }
    }

    fn apply(&mut self, event: ConnEvent) {
        let view_active = (self.view_active)();
        let (next, effects) = machine::step(self.state, event, view_active);
        if next != self.state {
            info!(from = ?self.state, to = ?next, "connection state");
        }
        self.state = next;

        for effect in effects {
            match effect {
                Effect::OpenSession => self.open_session(),
                Effect::CloseSession => {
                    // Dropping the handle shuts the session task down.
                    self.session = None;
                }
                Effect::CancelRetry => self.retry_at = None,
                Effect::ScheduleRetry => {
                    // Replaces any pending deadline: never more than one.
                    self.retry_at = Some(Instant::now() + self.retry_delay);
                }
                Effect::Notify(up) => (self.status_sink)(up),
            }
        }
    }

    fn open_session(&mut self) {
        let (tx, rx) = mpsc::channel();
        let handle = self.transport.open(&self.endpoint, tx);
        // Assignment drops any prior handle first: at most one live session.
        self.session = Some((handle, rx));
    }
}

impl Drop for ConnectionManager {
    fn drop(&mut self) {
        self.disconnect();
    }
}
