/// Lifecycle of the single logical console session.
///
/// There is at most one live transport session and at most one pending
/// retry at any instant; the runtime enforces this by replacing handles,
/// never by holding two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// No session, no retry pending.
    Disconnected,
    /// A session is being opened.
    Connecting,
    /// The session is established and receiving frames.
    Open,
    /// The session dropped while the view was active; a retry is scheduled.
    ClosedPendingRetry,
}

impl ConnectionState {
    /// True while a session handle exists (opening or open). `connect()` is
    /// a no-op in these states.
    pub fn is_active(&self) -> bool {
        matches!(self, ConnectionState::Connecting | ConnectionState::Open)
    }
}
