use wirelog_types::ConnectionState;

// NOTE: Transition design
//
// All connection logic lives in `step`, a pure function from
// (state, event, view-activity) to (state, effects). The manager interprets
// the effects; nothing here touches a socket, a timer, or a sink, which is
// what makes every transition unit-testable without a live transport.
//
// Invariants the table maintains:
// - `ConnectRequested` is a no-op while a session exists (Connecting/Open):
//   two rapid connects yield one session.
// - A close schedules a retry only when the hosting view is active, and
//   `ScheduleRetry` always replaces any pending deadline (the manager keeps
//   at most one).
// - `DisconnectRequested` is accepted from every state and always leaves
//   no session and no deadline behind.

/// Input to the connection state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnEvent {
    /// `connect()` was called (by the owner or by the retry timer firing).
    ConnectRequested,
    /// The transport session completed its handshake.
    SessionOpened,
    /// The transport session ended: close, error, or failed connect.
    SessionClosed,
    /// The scheduled retry deadline elapsed.
    RetryDue,
    /// `disconnect()` was called.
    DisconnectRequested,
}

/// Side effects a transition requests, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Open a new transport session (the manager replaces any prior handle).
    OpenSession,
    /// Drop the session handle, tearing the socket down.
    CloseSession,
    /// Clear the pending retry deadline.
    CancelRetry,
    /// Arm the retry deadline, replacing any pending one.
    ScheduleRetry,
    /// Tell the status sink whether the feed is up.
    Notify(bool),
}

pub fn step(
    state: ConnectionState,
    event: ConnEvent,
    view_active: bool,
) -> (ConnectionState, Vec<Effect>) {
    use ConnectionState::*;

    match (state, event) {
        (s, ConnEvent::ConnectRequested) if s.is_active() => (s, vec![]),
        (_, ConnEvent::ConnectRequested) => {
            (Connecting, vec![Effect::CancelRetry, Effect::OpenSession])
        }

        (Connecting, ConnEvent::SessionOpened) => {
            (Open, vec![Effect::CancelRetry, Effect::Notify(true)])
        }
        // A stale open from a session already torn down changes nothing.
        (s, ConnEvent::SessionOpened) => (s, vec![]),

        (Connecting | Open, ConnEvent::SessionClosed) => {
            if view_active {
                (
                    ClosedPendingRetry,
                    vec![
                        Effect::CloseSession,
                        Effect::Notify(false),
                        Effect::ScheduleRetry,
                    ],
                )
            } else {
                // Backgrounded view: report the drop but do not retry.
                (
                    Disconnected,
                    vec![Effect::CloseSession, Effect::Notify(false)],
                )
            }
        }
        (s, ConnEvent::SessionClosed) => (s, vec![]),

        (ClosedPendingRetry, ConnEvent::RetryDue) => {
            (Connecting, vec![Effect::CancelRetry, Effect::OpenSession])
        }
        // A deadline that outlived its state is dropped.
        (s, ConnEvent::RetryDue) => (s, vec![Effect::CancelRetry]),

        (_, ConnEvent::DisconnectRequested) => (
            Disconnected,
            vec![
                Effect::CancelRetry,
                Effect::CloseSession,
                Effect::Notify(false),
            ],
        ),
    }
}
