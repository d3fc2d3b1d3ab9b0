use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use wirelog_runtime::{Config, ConnectionManager, SessionEvent, SessionHandle, Transport};
use wirelog_types::ConnectionState;

/// Transport double: records every opened session and hands the test the
/// event sender, so session activity can be scripted without a socket.
#[derive(Default)]
struct ScriptedTransport {
    sessions: Mutex<Vec<Sender<SessionEvent>>>,
}

impl ScriptedTransport {
    fn open_count(&self) -> usize {
        self.sessions.lock().unwrap().len()
    }

    fn sender(&self, index: usize) -> Sender<SessionEvent> {
        self.sessions.lock().unwrap()[index].clone()
    }
}

impl Transport for ScriptedTransport {
    fn open(&self, _url: &str, events: Sender<SessionEvent>) -> SessionHandle {
        self.sessions.lock().unwrap().push(events);
        SessionHandle::new(|| {})
    }
}

struct Harness {
    manager: ConnectionManager,
    transport: Arc<ScriptedTransport>,
    statuses: Arc<Mutex<Vec<bool>>>,
    view_active: Arc<AtomicBool>,
}

fn harness() -> Harness {
    let transport = Arc::new(ScriptedTransport::default());
    let statuses = Arc::new(Mutex::new(Vec::new()));
    let view_active = Arc::new(AtomicBool::new(true));

    let config = Config {
        reconnect_delay_ms: 25,
        ..Config::default()
    };

    let sink_statuses = statuses.clone();
    let query_flag = view_active.clone();
    let manager = ConnectionManager::new(
        &config,
        transport.clone(),
        Box::new(move |up| sink_statuses.lock().unwrap().push(up)),
        Box::new(move || query_flag.load(Ordering::SeqCst)),
    );

    Harness {
        manager,
        transport,
        statuses,
        view_active,
    }
}

const TICK: Duration = Duration::from_millis(10);

#[test]
fn test_connect_twice_yields_one_session() {
    let mut h = harness();

    h.manager.connect();
    h.manager.connect();

    assert_eq!(h.transport.open_count(), 1);
    assert_eq!(h.manager.state(), ConnectionState::Connecting);
}

#[test]
fn test_open_notifies_status_sink() {
    let mut h = harness();
    h.manager.connect();

    h.transport.sender(0).send(SessionEvent::Opened).unwrap();
    h.manager.poll(TICK);

    assert_eq!(h.manager.state(), ConnectionState::Open);
    assert_eq!(*h.statuses.lock().unwrap(), vec![true]);
}

#[test]
fn test_frames_decode_and_malformed_frames_drop() {
    let mut h = harness();
    h.manager.connect();

    let tx = h.transport.sender(0);
    tx.send(SessionEvent::Opened).unwrap();
    tx.send(SessionEvent::Frame(
        r#"{"topic":"sensors/temp","payload":21.5,"timestamp":"2024-01-02T03:04:05Z"}"#.to_string(),
    ))
    .unwrap();
    tx.send(SessionEvent::Frame("{truncated".to_string())).unwrap();
    tx.send(SessionEvent::Frame(r#"{"topic":"status"}"#.to_string()))
        .unwrap();

    let messages = h.manager.poll(TICK);

    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].topic, "sensors/temp");
    assert_eq!(messages[1].topic, "status");
    // The pipeline survived the bad frame.
    assert_eq!(h.manager.state(), ConnectionState::Open);
}

#[test]
fn test_close_while_view_active_reconnects_once() {
    let mut h = harness();
    h.manager.connect();
    h.transport.sender(0).send(SessionEvent::Opened).unwrap();
    h.manager.poll(TICK);

    h.transport
        .sender(0)
        .send(SessionEvent::Closed {
            reason: "remote hangup".to_string(),
        })
        .unwrap();
    h.manager.poll(TICK);

    assert_eq!(h.manager.state(), ConnectionState::ClosedPendingRetry);
    assert_eq!(*h.statuses.lock().unwrap(), vec![true, false]);
    assert_eq!(h.transport.open_count(), 1);

    // Deadline elapses; the next poll fires exactly one reconnect.
    std::thread::sleep(Duration::from_millis(40));
    h.manager.poll(TICK);
    assert_eq!(h.transport.open_count(), 2);
    assert_eq!(h.manager.state(), ConnectionState::Connecting);

    // And it stays at one: no duplicate timer left behind.
    std::thread::sleep(Duration::from_millis(40));
    h.manager.poll(TICK);
    assert_eq!(h.transport.open_count(), 2);
}

#[test]
fn test_repeated_drops_keep_a_single_pending_retry() {
    let mut h = harness();
    h.manager.connect();
    h.transport.sender(0).send(SessionEvent::Opened).unwrap();
    h.manager.poll(TICK);

    // Drop, reconnect by hand before the deadline fires, drop again.
    let close = |h: &mut Harness, index: usize| {
        let _ = h.transport.sender(index).send(SessionEvent::Closed {
            reason: "drop".to_string(),
        });
        h.manager.poll(TICK);
    };

    close(&mut h, 0);
    h.manager.connect();
    assert_eq!(h.transport.open_count(), 2);
    close(&mut h, 1);

    // Both deadlines would be due now, but only one retry ever fires.
    std::thread::sleep(Duration::from_millis(40));
    h.manager.poll(TICK);
    std::thread::sleep(Duration::from_millis(40));
    h.manager.poll(TICK);

    assert_eq!(h.transport.open_count(), 3);
}

#[test]
fn test_close_while_view_inactive_does_not_reconnect() {
    let mut h = harness();
    h.manager.connect();
    h.transport.sender(0).send(SessionEvent::Opened).unwrap();
    h.manager.poll(TICK);

    h.view_active.store(false, Ordering::SeqCst);
    h.transport
        .sender(0)
        .send(SessionEvent::Closed {
            reason: "backgrounded".to_string(),
        })
        .unwrap();
    h.manager.poll(TICK);

    assert_eq!(h.manager.state(), ConnectionState::Disconnected);

    std::thread::sleep(Duration::from_millis(60));
    h.manager.poll(TICK);
    assert_eq!(h.transport.open_count(), 1);
}

#[test]
fn test_disconnect_is_idempotent_and_final() {
    let mut h = harness();
    h.manager.connect();
    h.transport.sender(0).send(SessionEvent::Opened).unwrap();
    h.manager.poll(TICK);

    h.manager.disconnect();
    h.manager.disconnect();

    assert_eq!(h.manager.state(), ConnectionState::Disconnected);
    assert_eq!(*h.statuses.lock().unwrap(), vec![true, false, false]);

    // No timer left behind to resurrect the session.
    std::thread::sleep(Duration::from_millis(60));
    h.manager.poll(TICK);
    assert_eq!(h.transport.open_count(), 1);
}

#[test]
fn test_connect_failure_retries_while_active() {
    let mut h = harness();
    h.manager.connect();

    // The transport reports a failed connect as a close.
    h.transport
        .sender(0)
        .send(SessionEvent::Closed {
            reason: "connection refused".to_string(),
        })
        .unwrap();
    h.manager.poll(TICK);

    assert_eq!(h.manager.state(), ConnectionState::ClosedPendingRetry);
    std::thread::sleep(Duration::from_millis(40));
    h.manager.poll(TICK);
    assert_eq!(h.transport.open_count(), 2);
}
