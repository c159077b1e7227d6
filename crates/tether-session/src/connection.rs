//! Connection lifecycle: the single socket, its handshake, and the
//! fixed-delay reconnect loop.

use std::ops::ControlFlow;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tokio::sync::{Notify, broadcast};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use url::Url;

use tether_protocol::OutgoingAction;

use crate::auth::{TokenProvider, TokenStore, acquire_token};
use crate::config::SessionConfig;
use crate::dispatcher::{AUTH_ERROR_KEY, Dispatcher, SESSION_ERROR_SOURCE, WS_ERROR_KEY};
use crate::error::{Error, Result};
use crate::events::SessionEvent;
use crate::notify::Notifier;
use crate::queue::OutboundQueue;
use crate::state::SessionState;
use crate::transport::{Socket, Transport};

/// Lifecycle status of the logical connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Disconnected,
    Connecting,
    Open,
    Closing,
}

struct Inner {
    config: SessionConfig,
    transport: Arc<dyn Transport>,
    tokens: Arc<dyn TokenProvider>,
    token_store: Arc<TokenStore>,
    state: Arc<RwLock<SessionState>>,
    dispatcher: Dispatcher,
    queue: OutboundQueue,
    queue_notify: Notify,
    status: Mutex<ConnectionStatus>,
    events: broadcast::Sender<SessionEvent>,
}

/// Owns the single socket to the backend.
///
/// Explicitly constructed and injected wherever the pipeline is wired up;
/// tests build independent instances against mock transports. At most one
/// live socket exists per manager: `connect` tears down any predecessor
/// before opening a new one.
pub struct ConnectionManager {
    inner: Arc<Inner>,
    cancel: Mutex<CancellationToken>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl ConnectionManager {
    pub fn new(
        config: SessionConfig,
        transport: Arc<dyn Transport>,
        tokens: Arc<dyn TokenProvider>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let (events, _) = broadcast::channel(256);
        let state = Arc::new(RwLock::new(SessionState::default()));
        let token_store = Arc::new(TokenStore::new());
        let dispatcher = Dispatcher::new(
            state.clone(),
            token_store.clone(),
            events.clone(),
            notifier,
            config.notifications,
        );
        Self {
            inner: Arc::new(Inner {
                config,
                transport,
                tokens,
                token_store,
                state,
                dispatcher,
                queue: OutboundQueue::new(),
                queue_notify: Notify::new(),
                status: Mutex::new(ConnectionStatus::Disconnected),
                events,
            }),
            cancel: Mutex::new(CancellationToken::new()),
            task: Mutex::new(None),
        }
    }

    /// Subscribe to session events.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.inner.events.subscribe()
    }

    /// Shared session state; read access for view code.
    pub fn state(&self) -> Arc<RwLock<SessionState>> {
        self.inner.state.clone()
    }

    pub fn status(&self) -> ConnectionStatus {
        *self.inner.status.lock()
    }

    /// Number of outbound actions waiting for the socket to open.
    pub fn backlog(&self) -> usize {
        self.inner.queue.len()
    }

    /// Start (or restart) the connection task.
    ///
    /// No-op when already open or connecting. Otherwise any previous socket
    /// is torn down first, then a fresh task acquires a token, opens the
    /// socket, performs the init handshake, and keeps the connection alive
    /// through the reconnect loop. Token-acquisition failure past the retry
    /// budget surfaces as a tracked auth error and a final
    /// `Closed { will_reconnect: false }` event.
    pub fn connect(&self) -> Result<()> {
        match self.status() {
            ConnectionStatus::Open | ConnectionStatus::Connecting => return Ok(()),
            ConnectionStatus::Disconnected | ConnectionStatus::Closing => {}
        }

        // Fail fast on an unparseable endpoint instead of looping on it.
        Url::parse(&self.inner.config.server_url).map_err(|e| Error::Config(e.to_string()))?;

        // At most one live socket: cancel and drop any predecessor task.
        let old = {
            let mut cancel = self.cancel.lock();
            std::mem::replace(&mut *cancel, CancellationToken::new())
        };
        old.cancel();
        if let Some(task) = self.task.lock().take() {
            task.abort();
        }

        *self.inner.status.lock() = ConnectionStatus::Connecting;
        let cancel = self.cancel.lock().clone();
        let inner = self.inner.clone();
        let task = tokio::spawn(async move { run_loop(inner, cancel).await });
        *self.task.lock() = Some(task);
        Ok(())
    }

    /// Close the connection intentionally, suppressing the reconnect loop.
    pub fn disconnect(&self) {
        {
            let mut status = self.inner.status.lock();
            if *status != ConnectionStatus::Disconnected {
                *status = ConnectionStatus::Closing;
            }
        }
        self.cancel.lock().cancel();
    }

    /// Submit an action to the backend.
    ///
    /// While the connection is open the action goes out immediately; while
    /// it is connecting (including the window between reconnect attempts)
    /// the action is queued and transmitted FIFO once the socket opens.
    /// When the connection is fully down this is a reportable error, never
    /// a silent drop.
    pub fn send(&self, action: OutgoingAction) -> Result<()> {
        match self.status() {
            ConnectionStatus::Disconnected | ConnectionStatus::Closing => Err(Error::NotConnected),
            ConnectionStatus::Connecting | ConnectionStatus::Open => {
                self.inner.queue.enqueue(action);
                self.inner.queue_notify.notify_one();
                Ok(())
            }
        }
    }
}

impl Inner {
    fn set_status(&self, status: ConnectionStatus) {
        *self.status.lock() = status;
    }

    fn emit(&self, event: SessionEvent) {
        let _ = self.events.send(event);
    }

    /// Final teardown: mark disconnected and tell subscribers no reconnect
    /// will follow.
    fn finish(&self) {
        self.set_status(ConnectionStatus::Disconnected);
        self.emit(SessionEvent::Closed {
            will_reconnect: false,
        });
    }

    /// Build the socket URL with the bearer token and, when resuming, the
    /// last processed event id so the backend continues the stream instead
    /// of replaying it.
    fn build_url(&self, token: &str) -> Result<Url> {
        let mut url =
            Url::parse(&self.config.server_url).map_err(|e| Error::Config(e.to_string()))?;
        url.set_path(&format!(
            "/ws/conversations/{}/events",
            self.config.conversation_id
        ));
        url.set_query(None);
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("token", token);
            if let Some(id) = self.state.read().latest_event_id() {
                pairs.append_pair("latest_event_id", &id.to_string());
            }
        }
        Ok(url)
    }

    /// Drain the outbound queue onto the socket, oldest first.
    async fn flush(&self, socket: &mut Box<dyn Socket>) -> Result<()> {
        for action in self.queue.drain() {
            socket.send(action.to_frame()?).await?;
        }
        Ok(())
    }
}

async fn run_loop(inner: Arc<Inner>, cancel: CancellationToken) {
    loop {
        inner.set_status(ConnectionStatus::Connecting);

        let token = tokio::select! {
            _ = cancel.cancelled() => {
                inner.finish();
                return;
            }
            result = acquire_token(&inner.tokens, &inner.token_store, inner.config.token_retry_limit) => {
                match result {
                    Ok(token) => token,
                    Err(e) => {
                        tracing::warn!("giving up on token acquisition: {}", e);
                        inner.dispatcher.track_error(Some(AUTH_ERROR_KEY), e.to_string(), SESSION_ERROR_SOURCE);
                        inner.finish();
                        return;
                    }
                }
            }
        };

        let url = match inner.build_url(&token) {
            Ok(url) => url,
            Err(e) => {
                inner
                    .dispatcher
                    .track_error(Some(WS_ERROR_KEY), e.to_string(), SESSION_ERROR_SOURCE);
                inner.finish();
                return;
            }
        };

        let connected = tokio::select! {
            _ = cancel.cancelled() => {
                inner.finish();
                return;
            }
            result = inner.transport.connect(&url) => result,
        };

        match connected {
            Ok(socket) => {
                if serve(&inner, socket, &cancel).await.is_break() {
                    return;
                }
            }
            Err(e) => {
                tracing::warn!("connect failed: {}", e);
                if e.is_auth_rejection() {
                    // Force a fresh token on the next attempt.
                    inner.token_store.invalidate();
                }
                inner
                    .dispatcher
                    .track_error(Some(WS_ERROR_KEY), e.to_string(), SESSION_ERROR_SOURCE);
            }
        }

        if cancel.is_cancelled() {
            inner.finish();
            return;
        }

        // Fixed-delay reconnect: constant interval, unbounded attempts.
        inner.set_status(ConnectionStatus::Connecting);
        tokio::select! {
            _ = cancel.cancelled() => {
                inner.finish();
                return;
            }
            _ = tokio::time::sleep(inner.config.reconnect_delay()) => {}
        }
    }
}

/// Serve one open socket until it closes.
///
/// Returns `Break` when the shutdown was caller-initiated and the loop must
/// not reconnect.
async fn serve(
    inner: &Arc<Inner>,
    mut socket: Box<dyn Socket>,
    cancel: &CancellationToken,
) -> ControlFlow<()> {
    // Handshake first: the init action carrying current settings must be the
    // first frame on the wire, ahead of anything queued while connecting.
    let init = OutgoingAction::init(inner.config.settings.clone());
    let handshake = async {
        socket.send(init.to_frame()?).await?;
        inner.flush(&mut socket).await
    };
    if let Err(e) = handshake.await {
        tracing::warn!("handshake failed: {}", e);
        inner
            .dispatcher
            .track_error(Some(WS_ERROR_KEY), e.to_string(), SESSION_ERROR_SOURCE);
        return ControlFlow::Continue(());
    }

    inner.set_status(ConnectionStatus::Open);
    inner.dispatcher.resolve_error(WS_ERROR_KEY);
    inner.emit(SessionEvent::Open);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                socket.close().await;
                inner.finish();
                return ControlFlow::Break(());
            }
            _ = inner.queue_notify.notified() => {
                if let Err(e) = inner.flush(&mut socket).await {
                    tracing::warn!("send failed: {}", e);
                    inner.dispatcher.track_error(Some(WS_ERROR_KEY), e.to_string(), SESSION_ERROR_SOURCE);
                    break;
                }
            }
            message = socket.recv() => match message {
                Some(Ok(text)) => inner.dispatcher.dispatch_text(&text),
                Some(Err(e)) => {
                    tracing::warn!("socket error: {}", e);
                    inner.dispatcher.track_error(Some(WS_ERROR_KEY), e.to_string(), SESSION_ERROR_SOURCE);
                }
                None => break,
            }
        }
    }

    // Remote close: hand control back to the reconnect loop.
    inner.set_status(ConnectionStatus::Connecting);
    inner
        .dispatcher
        .track_error(Some(WS_ERROR_KEY), "connection closed", SESSION_ERROR_SOURCE);
    inner.emit(SessionEvent::Closed {
        will_reconnect: true,
    });
    ControlFlow::Continue(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::StaticTokenProvider;
    use crate::notify::NoopNotifier;
    use crate::state::TerminalEntry;
    use serde_json::json;
    use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
    use std::time::Duration;
    use async_trait::async_trait;
    use tokio::sync::{Semaphore, mpsc};

    struct ConnectRecord {
        url: Url,
        sent: Arc<Mutex<Vec<String>>>,
        /// Dropped on `remote_close`, which ends the socket's recv stream
        incoming: Option<mpsc::UnboundedSender<String>>,
        closed: Arc<AtomicBool>,
    }

    struct MockTransport {
        /// Each connect waits for one permit; tests gate the handshake by
        /// starting at zero and adding permits.
        gate: Arc<Semaphore>,
        connects: Arc<Mutex<Vec<ConnectRecord>>>,
        fail_first: AtomicU32,
    }

    impl MockTransport {
        fn new(initial_permits: usize) -> Arc<Self> {
            Arc::new(Self {
                gate: Arc::new(Semaphore::new(initial_permits)),
                connects: Arc::new(Mutex::new(vec![])),
                fail_first: AtomicU32::new(0),
            })
        }

        fn failing_first(initial_permits: usize, failures: u32) -> Arc<Self> {
            let transport = Self::new(initial_permits);
            transport.fail_first.store(failures, Ordering::SeqCst);
            transport
        }

        fn connect_count(&self) -> usize {
            self.connects.lock().len()
        }

        fn record(&self, index: usize) -> (Url, Arc<Mutex<Vec<String>>>) {
            let connects = self.connects.lock();
            let record = &connects[index];
            (record.url.clone(), record.sent.clone())
        }

        /// Deliver one inbound frame on a live socket.
        fn send_incoming(&self, index: usize, frame: serde_json::Value) {
            let connects = self.connects.lock();
            let sender = connects[index].incoming.as_ref().expect("socket closed");
            sender.send(frame.to_string()).unwrap();
        }

        /// Close a socket from the backend side.
        fn remote_close(&self, index: usize) {
            self.connects.lock()[index].incoming = None;
        }

        fn is_closed(&self, index: usize) -> bool {
            self.connects.lock()[index].closed.load(Ordering::SeqCst)
        }
    }

    struct MockSocket {
        sent: Arc<Mutex<Vec<String>>>,
        incoming: mpsc::UnboundedReceiver<String>,
        closed: Arc<AtomicBool>,
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn connect(&self, url: &Url) -> Result<Box<dyn Socket>> {
            let failures = self.fail_first.load(Ordering::SeqCst);
            if failures > 0 {
                self.fail_first.store(failures - 1, Ordering::SeqCst);
                self.connects.lock().push(ConnectRecord {
                    url: url.clone(),
                    sent: Arc::new(Mutex::new(vec![])),
                    incoming: None,
                    closed: Arc::new(AtomicBool::new(true)),
                });
                return Err(Error::Transport("connection refused".into()));
            }

            let permit = self.gate.clone().acquire_owned().await.unwrap();
            permit.forget();

            let (tx, rx) = mpsc::unbounded_channel();
            let sent = Arc::new(Mutex::new(vec![]));
            let closed = Arc::new(AtomicBool::new(false));
            self.connects.lock().push(ConnectRecord {
                url: url.clone(),
                sent: sent.clone(),
                incoming: Some(tx),
                closed: closed.clone(),
            });
            Ok(Box::new(MockSocket {
                sent,
                incoming: rx,
                closed,
            }))
        }
    }

    #[async_trait]
    impl Socket for MockSocket {
        async fn send(&mut self, text: String) -> Result<()> {
            self.sent.lock().push(text);
            Ok(())
        }

        async fn recv(&mut self) -> Option<Result<String>> {
            self.incoming.recv().await.map(Ok)
        }

        async fn close(&mut self) {
            self.closed.store(true, Ordering::SeqCst);
        }
    }

    fn make_manager(transport: Arc<MockTransport>) -> ConnectionManager {
        let config = SessionConfig {
            server_url: "ws://backend.test".into(),
            conversation_id: "conv-1".into(),
            reconnect_delay_ms: 3_000,
            ..Default::default()
        };
        ConnectionManager::new(
            config,
            transport,
            Arc::new(StaticTokenProvider::new("tok-1")),
            Arc::new(NoopNotifier),
        )
    }

    async fn wait_for_open(rx: &mut broadcast::Receiver<SessionEvent>) {
        wait_for(rx, |e| matches!(e, SessionEvent::Open)).await;
    }

    async fn wait_for(
        rx: &mut broadcast::Receiver<SessionEvent>,
        predicate: impl Fn(&SessionEvent) -> bool,
    ) -> SessionEvent {
        tokio::time::timeout(Duration::from_secs(30), async {
            loop {
                let event = rx.recv().await.expect("event channel closed");
                if predicate(&event) {
                    return event;
                }
            }
        })
        .await
        .expect("timed out waiting for event")
    }

    /// Poll until `condition` holds; panics after a generous timeout.
    async fn wait_until(condition: impl Fn() -> bool) {
        tokio::time::timeout(Duration::from_secs(30), async {
            while !condition() {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("timed out waiting for condition");
    }

    fn sent_actions(sent: &Arc<Mutex<Vec<String>>>) -> Vec<serde_json::Value> {
        sent.lock()
            .iter()
            .map(|text| serde_json::from_str(text).unwrap())
            .collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_connect_twice_keeps_one_socket() {
        let transport = MockTransport::new(16);
        let manager = make_manager(transport.clone());
        let mut rx = manager.subscribe();

        manager.connect().unwrap();
        wait_for_open(&mut rx).await;
        manager.connect().unwrap();
        manager.connect().unwrap();

        // Give any erroneous second task time to show up
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(transport.connect_count(), 1);
        assert_eq!(manager.status(), ConnectionStatus::Open);
    }

    #[tokio::test(start_paused = true)]
    async fn test_init_first_then_fifo_order() {
        // Gate the connect so sends land during the "connecting" window
        let transport = MockTransport::new(0);
        let manager = make_manager(transport.clone());
        let mut rx = manager.subscribe();

        manager.connect().unwrap();
        wait_until(|| manager.status() == ConnectionStatus::Connecting).await;

        manager.send(OutgoingAction::run("a")).unwrap();
        manager.send(OutgoingAction::run("b")).unwrap();
        manager.send(OutgoingAction::run("c")).unwrap();
        assert_eq!(manager.backlog(), 3);

        transport.gate.add_permits(1);
        wait_for_open(&mut rx).await;
        manager.send(OutgoingAction::run("d")).unwrap();

        let (_, sent) = transport.record(0);
        wait_until(|| sent.lock().len() == 5).await;

        let frames = sent_actions(&sent);
        assert_eq!(frames[0]["action"], "init");
        let commands: Vec<&str> = frames[1..]
            .iter()
            .map(|f| f["args"]["command"].as_str().unwrap())
            .collect();
        assert_eq!(commands, vec!["a", "b", "c", "d"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_send_while_down_is_an_error() {
        let transport = MockTransport::new(16);
        let manager = make_manager(transport);
        let err = manager.send(OutgoingAction::message("hello")).unwrap_err();
        assert!(matches!(err, Error::NotConnected));
    }

    #[tokio::test(start_paused = true)]
    async fn test_reconnect_embeds_resume_cursor() {
        let transport = MockTransport::new(16);
        let manager = make_manager(transport.clone());
        let mut rx = manager.subscribe();

        manager.connect().unwrap();
        wait_for_open(&mut rx).await;

        let (first_url, _) = transport.record(0);
        assert!(first_url.query().unwrap().contains("token=tok-1"));
        assert!(!first_url.query().unwrap().contains("latest_event_id"));

        transport.send_incoming(0, json!({"id": 7, "observation": "run", "content": "ok"}));
        wait_until(|| manager.state().read().latest_event_id() == Some(7)).await;

        transport.remote_close(0);
        wait_for(&mut rx, |e| matches!(e, SessionEvent::Closed { will_reconnect: true })).await;

        // Exactly one attempt after the fixed delay
        wait_until(|| transport.connect_count() == 2).await;
        let (second_url, _) = transport.record(1);
        assert!(second_url.query().unwrap().contains("latest_event_id=7"));

        wait_for_open(&mut rx).await;
        assert!(manager.state().read().errors.is_empty(), "sticky ws error resolved on open");
    }

    #[tokio::test(start_paused = true)]
    async fn test_disconnect_suppresses_reconnect() {
        let transport = MockTransport::new(16);
        let manager = make_manager(transport.clone());
        let mut rx = manager.subscribe();

        manager.connect().unwrap();
        wait_for_open(&mut rx).await;

        manager.disconnect();
        wait_for(&mut rx, |e| matches!(e, SessionEvent::Closed { will_reconnect: false })).await;
        assert_eq!(manager.status(), ConnectionStatus::Disconnected);
        assert!(transport.is_closed(0), "socket torn down on disconnect");

        // Ride well past the reconnect delay: no new attempt may appear
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(transport.connect_count(), 1);

        // A fresh connect afterwards succeeds
        manager.connect().unwrap();
        wait_for_open(&mut rx).await;
        assert_eq!(transport.connect_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_attempts_keep_single_error_entry() {
        let transport = MockTransport::failing_first(16, 2);
        let manager = make_manager(transport.clone());
        let mut rx = manager.subscribe();

        manager.connect().unwrap();
        wait_until(|| transport.connect_count() >= 2).await;
        assert_eq!(
            manager.state().read().errors.len(),
            1,
            "same-key errors must not accumulate"
        );

        wait_for_open(&mut rx).await;
        assert!(manager.state().read().errors.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_normal_lifecycle_scenario() {
        let transport = MockTransport::new(0);
        let manager = make_manager(transport.clone());
        let mut rx = manager.subscribe();

        manager.connect().unwrap();
        wait_until(|| manager.status() == ConnectionStatus::Connecting).await;
        manager
            .send(OutgoingAction::run("ls -la"))
            .unwrap();

        transport.gate.add_permits(1);
        wait_for_open(&mut rx).await;

        let (_, sent) = transport.record(0);
        wait_until(|| sent.lock().len() == 2).await;
        let frames = sent_actions(&sent);
        assert_eq!(frames[0]["action"], "init");
        assert_eq!(frames[1]["args"]["command"], "ls -la");

        transport.send_incoming(0, json!({"observation": "run", "content": "file1\nfile2"}));
        wait_until(|| !manager.state().read().terminal().is_empty()).await;
        assert_eq!(
            manager.state().read().terminal(),
            &[TerminalEntry::Output {
                text: "file1\nfile2".into()
            }]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_token_give_up_surfaces_auth_error() {
        struct FailingProvider;

        #[async_trait]
        impl TokenProvider for FailingProvider {
            async fn fetch_token(&self) -> Result<String> {
                Err(Error::Transport("token endpoint down".into()))
            }
        }

        let transport = MockTransport::new(16);
        let config = SessionConfig {
            server_url: "ws://backend.test".into(),
            conversation_id: "conv-1".into(),
            token_retry_limit: Some(1),
            ..Default::default()
        };
        let manager = ConnectionManager::new(
            config,
            transport.clone(),
            Arc::new(FailingProvider),
            Arc::new(NoopNotifier),
        );
        let mut rx = manager.subscribe();

        manager.connect().unwrap();
        wait_for(&mut rx, |e| matches!(e, SessionEvent::Closed { will_reconnect: false })).await;

        assert_eq!(manager.status(), ConnectionStatus::Disconnected);
        assert_eq!(transport.connect_count(), 0);
        let state = manager.state();
        let state = state.read();
        assert_eq!(state.errors.len(), 1);
        assert_eq!(state.errors.entries()[0].key.as_deref(), Some(AUTH_ERROR_KEY));
    }

    #[tokio::test(start_paused = true)]
    async fn test_sends_queued_between_reconnect_attempts() {
        let transport = MockTransport::new(16);
        let manager = make_manager(transport.clone());
        let mut rx = manager.subscribe();

        manager.connect().unwrap();
        wait_for_open(&mut rx).await;

        transport.remote_close(0);
        wait_for(&mut rx, |e| matches!(e, SessionEvent::Closed { will_reconnect: true })).await;

        // Between attempts the status is Connecting: sends queue, not error
        manager.send(OutgoingAction::run("pending")).unwrap();

        wait_for_open(&mut rx).await;
        let (_, sent) = transport.record(1);
        wait_until(|| sent.lock().len() == 2).await;
        let frames = sent_actions(&sent);
        assert_eq!(frames[0]["action"], "init");
        assert_eq!(frames[1]["args"]["command"], "pending");
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_server_url_rejected() {
        let transport = MockTransport::new(16);
        let config = SessionConfig {
            server_url: "not a url".into(),
            ..Default::default()
        };
        let manager = ConnectionManager::new(
            config,
            transport,
            Arc::new(StaticTokenProvider::new("t")),
            Arc::new(NoopNotifier),
        );
        assert!(matches!(manager.connect(), Err(Error::Config(_))));
    }
}
