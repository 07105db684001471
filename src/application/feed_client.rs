use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};
use std::time::Duration;

use strum::Display as StrumDisplay;

use crate::application::config::FeedConfig;
use crate::application::reconnect::Backoff;
use crate::application::store::SharedStore;
use crate::domain::errors::FeedResult;
use crate::domain::logging::LogComponent;
use crate::domain::market_data::{AssetRecord, ConnectionStatus, NoiseSource};
use crate::{log_debug, log_error, log_info, log_warn};

pub const CONNECT_FAILED_MESSAGE: &str = "Failed to connect to crypto data feed";
pub const CONNECTION_ERROR_MESSAGE: &str = "Connection error with crypto data feed";
pub const RETRIES_EXHAUSTED_MESSAGE: &str =
    "Failed to connect after several attempts. Please reload the page.";

/// Everything the transport and the reconnect timer report back to the client.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedEvent {
    Opened,
    Message(String),
    Error(String),
    Closed,
    ReconnectDue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, StrumDisplay)]
pub enum FeedPhase {
    #[default]
    #[strum(serialize = "disconnected")]
    Disconnected,
    #[strum(serialize = "connecting")]
    Connecting,
    #[strum(serialize = "connected")]
    Connected,
    #[strum(serialize = "connectionLost")]
    ConnectionLost,
    #[strum(serialize = "reconnecting")]
    Reconnecting,
    #[strum(serialize = "failed")]
    Failed,
}

/// Callback handed to transports and timers. Always routes through the owning [`FeedHandle`].
pub type FeedDispatch = Rc<dyn Fn(FeedEvent)>;

/// Streaming connection. Implementations report open/message/error/close through `dispatch`
/// and must stop reporting once `close` has been called.
pub trait FeedTransport {
    fn open(&mut self, url: &str, dispatch: FeedDispatch) -> FeedResult<()>;
    fn close(&mut self);
}

/// Single pending reconnect timer. Scheduling replaces any timer still pending.
pub trait ReconnectScheduler {
    fn schedule(&mut self, delay: Duration, dispatch: FeedDispatch);
    fn cancel(&mut self);
}

/// Turns one raw wire message into a replacement batch. A malformed message is an error for the
/// whole message; nothing partial comes back.
pub trait FeedNormalizer {
    fn normalize(&self, payload: &str, noise: &mut dyn NoiseSource)
    -> FeedResult<Vec<AssetRecord>>;
}

/// Runtime pieces the client drives. Grouped so the composition root can swap them in one go.
pub struct FeedRuntime {
    pub transport: Box<dyn FeedTransport>,
    pub scheduler: Box<dyn ReconnectScheduler>,
    pub normalizer: Box<dyn FeedNormalizer>,
    pub noise: Box<dyn NoiseSource>,
}

/// Phase and attempt count, mirrored out of the client so they stay readable while it is busy
/// handling an event.
#[derive(Debug, Default)]
struct FeedProgress {
    phase: Cell<FeedPhase>,
    attempts: Cell<u32>,
}

/// Connection state machine for the ticker feed.
///
/// `disconnected -> connecting -> connected`, and on failure
/// `connectionLost -> reconnecting -> connecting` until the backoff budget runs out, at which
/// point the client parks in `failed` until a manual [`FeedClient::connect`].
pub struct FeedClient {
    config: FeedConfig,
    store: SharedStore,
    runtime: FeedRuntime,
    backoff: Backoff,
    progress: Rc<FeedProgress>,
    dispatch: FeedDispatch,
}

impl FeedClient {
    pub fn new(config: FeedConfig, store: SharedStore, runtime: FeedRuntime) -> Self {
        let backoff = Backoff::new(config.reconnect);
        Self {
            config,
            store,
            runtime,
            backoff,
            progress: Rc::default(),
            dispatch: Rc::new(|_| {}),
        }
    }

    pub(crate) fn bind_dispatch(&mut self, dispatch: FeedDispatch) {
        self.dispatch = dispatch;
    }

    pub fn phase(&self) -> FeedPhase {
        self.progress.phase.get()
    }

    pub fn is_connected(&self) -> bool {
        self.phase() == FeedPhase::Connected
    }

    pub fn attempts(&self) -> u32 {
        self.backoff.attempts()
    }

    fn set_phase(&mut self, phase: FeedPhase) {
        self.progress.phase.set(phase);
    }

    fn sync_attempts(&self) {
        self.progress.attempts.set(self.backoff.attempts());
    }

    pub fn connect(&mut self) {
        match self.phase() {
            FeedPhase::Connecting | FeedPhase::Connected => {
                log_debug!(
                    LogComponent::Application("FeedClient"),
                    "connect() ignored while {}",
                    self.phase()
                );
                return;
            }
            FeedPhase::Reconnecting => self.runtime.scheduler.cancel(),
            FeedPhase::Failed => {
                self.backoff.reset();
                self.sync_attempts();
            }
            FeedPhase::Disconnected | FeedPhase::ConnectionLost => {}
        }
        self.open_transport();
    }

    /// Idempotent. Cancels the pending reconnect before closing so a timer cannot reopen the
    /// feed after a deliberate shutdown.
    pub fn disconnect(&mut self) {
        self.runtime.scheduler.cancel();
        if self.phase() != FeedPhase::Disconnected {
            self.runtime.transport.close();
            log_info!(
                LogComponent::Application("FeedClient"),
                "🔌 Feed disconnected from {}",
                self.phase()
            );
        }
        self.set_phase(FeedPhase::Disconnected);
        self.store.update(|store| store.set_connection_status(ConnectionStatus::Idle));
    }

    pub fn handle(&mut self, event: FeedEvent) {
        match event {
            FeedEvent::Opened => self.on_open(),
            FeedEvent::Message(payload) => self.on_message(&payload),
            FeedEvent::Error(reason) => self.on_error(&reason),
            FeedEvent::Closed => self.on_close(),
            FeedEvent::ReconnectDue => self.on_reconnect_due(),
        }
    }

    fn open_transport(&mut self) {
        self.set_phase(FeedPhase::Connecting);
        self.store.update(|store| store.set_connection_status(ConnectionStatus::Loading));
        log_info!(
            LogComponent::Application("FeedClient"),
            "🔌 Connecting to {}",
            self.config.endpoint
        );

        let dispatch = self.dispatch.clone();
        if let Err(e) = self.runtime.transport.open(&self.config.endpoint, dispatch) {
            log_error!(LogComponent::Application("FeedClient"), "❌ Failed to open feed: {e}");
            self.store.update(|store| {
                store.set_error(Some(CONNECT_FAILED_MESSAGE.to_string()));
                store.set_connection_status(ConnectionStatus::Failed);
            });
            self.set_phase(FeedPhase::ConnectionLost);
            self.schedule_reconnect();
        }
    }

    fn on_open(&mut self) {
        if self.phase() != FeedPhase::Connecting {
            log_debug!(
                LogComponent::Application("FeedClient"),
                "Stale open while {}",
                self.phase()
            );
            return;
        }
        self.set_phase(FeedPhase::Connected);
        self.backoff.reset();
        self.sync_attempts();
        self.store.update(|store| {
            store.set_connection_status(ConnectionStatus::Idle);
            store.set_error(None);
        });
        log_info!(LogComponent::Application("FeedClient"), "✅ Feed connected");
    }

    fn on_message(&mut self, payload: &str) {
        if self.phase() != FeedPhase::Connected {
            log_debug!(
                LogComponent::Application("FeedClient"),
                "Dropping message received while {}",
                self.phase()
            );
            return;
        }
        match self.runtime.normalizer.normalize(payload, self.runtime.noise.as_mut()) {
            Ok(batch) if batch.is_empty() => {
                log_debug!(LogComponent::Application("FeedClient"), "No tracked symbols in message");
            }
            Ok(batch) => {
                log_debug!(
                    LogComponent::Application("FeedClient"),
                    "📊 Replacing collection with {} assets",
                    batch.len()
                );
                self.store.update(|store| store.replace_assets(batch));
            }
            Err(e) => {
                log_warn!(LogComponent::Application("FeedClient"), "Dropping feed message: {e}");
            }
        }
    }

    fn on_error(&mut self, reason: &str) {
        if !matches!(self.phase(), FeedPhase::Connecting | FeedPhase::Connected) {
            return;
        }
        log_error!(LogComponent::Application("FeedClient"), "❌ Feed error: {reason}");
        self.set_phase(FeedPhase::ConnectionLost);
        self.store.update(|store| store.set_error(Some(CONNECTION_ERROR_MESSAGE.to_string())));
    }

    fn on_close(&mut self) {
        if !matches!(
            self.phase(),
            FeedPhase::Connecting | FeedPhase::Connected | FeedPhase::ConnectionLost
        ) {
            log_debug!(
                LogComponent::Application("FeedClient"),
                "Stale close while {}",
                self.phase()
            );
            return;
        }
        log_warn!(LogComponent::Application("FeedClient"), "Feed connection closed");
        self.set_phase(FeedPhase::ConnectionLost);
        self.store.update(|store| store.set_connection_status(ConnectionStatus::Failed));
        self.schedule_reconnect();
    }

    fn on_reconnect_due(&mut self) {
        if self.phase() != FeedPhase::Reconnecting {
            log_debug!(LogComponent::Application("FeedClient"), "Stale reconnect tick");
            return;
        }
        self.open_transport();
    }

    fn schedule_reconnect(&mut self) {
        let delay = self.backoff.next_delay();
        self.sync_attempts();
        match delay {
            Some(delay) => {
                log_warn!(
                    LogComponent::Application("FeedClient"),
                    "🔄 Reconnecting in {}ms (attempt {}/{})",
                    delay.as_millis(),
                    self.backoff.attempts(),
                    self.backoff.max_attempts()
                );
                self.set_phase(FeedPhase::Reconnecting);
                self.runtime.scheduler.schedule(delay, self.dispatch.clone());
            }
            None => {
                log_error!(
                    LogComponent::Application("FeedClient"),
                    "❌ Maximum reconnection attempts reached"
                );
                self.set_phase(FeedPhase::Failed);
                self.store.update(|store| {
                    store.set_connection_status(ConnectionStatus::Failed);
                    store.set_error(Some(RETRIES_EXHAUSTED_MESSAGE.to_string()));
                });
            }
        }
    }
}

/// Work queued on a [`FeedHandle`]; applied one item at a time, in arrival order.
enum FeedCommand {
    Connect,
    Disconnect,
    Event(FeedEvent),
}

struct FeedHandleInner {
    client: RefCell<FeedClient>,
    progress: Rc<FeedProgress>,
    queue: RefCell<VecDeque<FeedCommand>>,
}

impl FeedHandleInner {
    fn submit(&self, command: FeedCommand) {
        self.queue.borrow_mut().push_back(command);
        self.drain();
    }

    /// When the client is already busy (a command raised from inside a handler or a store
    /// subscriber) the active drain picks the command up once the handler returns.
    fn drain(&self) {
        loop {
            let Ok(mut client) = self.client.try_borrow_mut() else {
                return;
            };
            let Some(command) = self.queue.borrow_mut().pop_front() else {
                return;
            };
            match command {
                FeedCommand::Connect => client.connect(),
                FeedCommand::Disconnect => client.disconnect(),
                FeedCommand::Event(event) => client.handle(event),
            }
        }
    }
}

/// Shared owner of a [`FeedClient`]. Transports and timers only ever hold a weak dispatch into
/// it, so dropping the last handle silences any late callbacks.
#[derive(Clone)]
pub struct FeedHandle {
    inner: Rc<FeedHandleInner>,
}

impl FeedHandle {
    pub fn new(mut client: FeedClient) -> Self {
        let progress = client.progress.clone();
        let inner = Rc::new_cyclic(|weak: &Weak<FeedHandleInner>| {
            let weak = weak.clone();
            let dispatch: FeedDispatch = Rc::new(move |event| {
                if let Some(inner) = weak.upgrade() {
                    inner.submit(FeedCommand::Event(event));
                }
            });
            client.bind_dispatch(dispatch);
            FeedHandleInner {
                client: RefCell::new(client),
                progress,
                queue: RefCell::new(VecDeque::new()),
            }
        });
        Self { inner }
    }

    pub fn connect(&self) {
        self.inner.submit(FeedCommand::Connect);
    }

    pub fn disconnect(&self) {
        self.inner.submit(FeedCommand::Disconnect);
    }

    pub fn dispatch(&self, event: FeedEvent) {
        self.inner.submit(FeedCommand::Event(event));
    }

    pub fn is_connected(&self) -> bool {
        self.phase() == FeedPhase::Connected
    }

    pub fn phase(&self) -> FeedPhase {
        self.inner.progress.phase.get()
    }

    pub fn attempts(&self) -> u32 {
        self.inner.progress.attempts.get()
    }
}
