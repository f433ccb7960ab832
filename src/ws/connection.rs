//! Real-time channel lifecycle: one STOMP subscription per active game code.
//!
//! ```text
//! Disconnected --code set--> Connecting --CONNECTED + SUBSCRIBE--> Subscribed
//!      ^                         |                                    |
//!      +------ failure ----------+------ code cleared / teardown -----+
//! ```
//!
//! Inbound messages are parsed into [`GameEvent`]s and passed to the handler
//! currently stored in the channel's handler cell. Replacing the handler
//! never touches the transport.

use std::sync::Arc;

use parking_lot::RwLock;
use reqwest::Url;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};

use crate::error::{ClientError, Result};
use crate::ws::event::GameEvent;
use crate::ws::frame::{Command, Frame};
use crate::ws::transport::{Connector, Transport};

const SUBSCRIPTION_ID: &str = "sub-0";

pub type EventHandler = Arc<dyn Fn(GameEvent) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelState {
    Disconnected,
    Connecting,
    Subscribed,
}

/// Topic a game's events are published on.
pub fn topic_for(game_code: &str) -> String {
    format!("/topic/game/{game_code}")
}

struct Live {
    game_code: String,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

pub struct GameChannel<C: Connector> {
    connector: Arc<C>,
    url: String,
    handler: Arc<RwLock<EventHandler>>,
    state: Arc<watch::Sender<ChannelState>>,
    live: Mutex<Option<Live>>,
}

impl<C: Connector> GameChannel<C> {
    pub fn new(connector: C, url: impl Into<String>) -> Self {
        let (state, _) = watch::channel(ChannelState::Disconnected);
        let noop: EventHandler = Arc::new(|_| {});
        Self {
            connector: Arc::new(connector),
            url: url.into(),
            handler: Arc::new(RwLock::new(noop)),
            state: Arc::new(state),
            live: Mutex::new(None),
        }
    }

    /// Replace the handler. Takes effect for the next inbound message.
    pub fn set_handler(&self, handler: impl Fn(GameEvent) + Send + Sync + 'static) {
        *self.handler.write() = Arc::new(handler);
    }

    pub fn state(&self) -> ChannelState {
        *self.state.borrow()
    }

    pub fn watch_state(&self) -> watch::Receiver<ChannelState> {
        self.state.subscribe()
    }

    pub async fn game_code(&self) -> Option<String> {
        self.live.lock().await.as_ref().map(|l| l.game_code.clone())
    }

    /// Point the channel at `game_code`.
    ///
    /// The same code is a no-op. A different code tears the current
    /// subscription down first; `None` or an empty code only tears down.
    pub async fn set_game_code(&self, game_code: Option<&str>) {
        let wanted = game_code.map(str::trim).filter(|c| !c.is_empty());
        let mut live = self.live.lock().await;

        if let (Some(current), Some(next)) = (live.as_ref(), wanted) {
            if current.game_code == next && !current.task.is_finished() {
                return;
            }
        }

        if let Some(previous) = live.take() {
            teardown(previous).await;
        }

        if let Some(code) = wanted {
            *live = Some(self.spawn(code.to_string()));
        }
    }

    /// Tear down any live subscription and wait for it to finish.
    pub async fn shutdown(&self) {
        self.set_game_code(None).await;
    }

    fn spawn(&self, game_code: String) -> Live {
        let cancel = CancellationToken::new();
        // Connecting is published before the task runs so callers never see
        // a stale Disconnected right after asking for a subscription.
        self.state.send_replace(ChannelState::Connecting);
        let task = tokio::spawn(run(
            Arc::clone(&self.connector),
            self.url.clone(),
            game_code.clone(),
            Arc::clone(&self.handler),
            Arc::clone(&self.state),
            cancel.clone(),
        ));
        Live { game_code, cancel, task }
    }
}

impl<C: Connector> Drop for GameChannel<C> {
    fn drop(&mut self) {
        if let Some(live) = self.live.get_mut().take() {
            live.cancel.cancel();
        }
    }
}

impl<C: Connector> std::fmt::Debug for GameChannel<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameChannel")
            .field("url", &self.url)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

async fn teardown(live: Live) {
    debug!(game_code = %live.game_code, "tearing down subscription");
    live.cancel.cancel();
    if let Err(err) = live.task.await {
        warn!(error = %err, "channel task ended abnormally");
    }
}

async fn run<C: Connector>(
    connector: Arc<C>,
    url: String,
    game_code: String,
    handler: Arc<RwLock<EventHandler>>,
    state: Arc<watch::Sender<ChannelState>>,
    cancel: CancellationToken,
) {
    state.send_replace(ChannelState::Connecting);

    let connected = tokio::select! {
        _ = cancel.cancelled() => None,
        result = connector.connect(&url) => Some(result),
    };
    let mut transport = match connected {
        None => {
            state.send_replace(ChannelState::Disconnected);
            return;
        }
        Some(Err(err)) => {
            // no retry: the channel stays down until the game code is set again
            warn!(%game_code, error = %err, "websocket connection failed");
            state.send_replace(ChannelState::Disconnected);
            return;
        }
        Some(Ok(transport)) => transport,
    };

    let handshake = tokio::select! {
        _ = cancel.cancelled() => Err(ClientError::Channel("cancelled during handshake".into())),
        result = subscribe(&mut transport, &url, &game_code) => result,
    };
    if let Err(err) = handshake {
        if !cancel.is_cancelled() {
            warn!(%game_code, error = %err, "subscription failed");
        }
        let _ = transport.close().await;
        state.send_replace(ChannelState::Disconnected);
        return;
    }

    state.send_replace(ChannelState::Subscribed);
    info!(%game_code, "connected to game channel");

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                let _ = transport.send(Frame::unsubscribe(SUBSCRIPTION_ID).encode()).await;
                let _ = transport.send(Frame::disconnect().encode()).await;
                if let Err(err) = transport.close().await {
                    debug!(error = %err, "close after disconnect");
                }
                info!(%game_code, "disconnected from game channel");
                break;
            }
            incoming = transport.recv() => {
                match incoming {
                    None => {
                        info!(%game_code, "game channel closed by server");
                        break;
                    }
                    Some(Err(err)) => {
                        warn!(%game_code, error = %err, "game channel transport error");
                        break;
                    }
                    Some(Ok(text)) => {
                        if !dispatch(&text, &handler, &game_code) {
                            break;
                        }
                    }
                }
            }
        }
    }

    state.send_replace(ChannelState::Disconnected);
}

/// CONNECT, wait for CONNECTED, then SUBSCRIBE to the game's topic.
async fn subscribe<T: Transport>(transport: &mut T, url: &str, game_code: &str) -> Result<()> {
    let host = Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_owned))
        .unwrap_or_else(|| "/".to_string());
    transport.send(Frame::connect(&host).encode()).await?;

    loop {
        let text = transport
            .recv()
            .await
            .ok_or_else(|| ClientError::Channel("closed before CONNECTED".into()))??;
        let frame = match Frame::decode(&text) {
            Ok(Some(frame)) => frame,
            Ok(None) => continue,
            Err(err) => return Err(ClientError::Channel(format!("bad frame during handshake: {err}"))),
        };
        match frame.command {
            Command::Connected => break,
            Command::Error => {
                let message = frame.get("message").unwrap_or("broker error").to_string();
                return Err(ClientError::Channel(message));
            }
            other => trace!(command = %other, "ignored during handshake"),
        }
    }

    let topic = topic_for(game_code);
    transport.send(Frame::subscribe(SUBSCRIPTION_ID, &topic).encode()).await?;
    debug!(%topic, "subscribed");
    Ok(())
}

/// Handle one inbound text message. Returns `false` when the session must end.
fn dispatch(text: &str, handler: &RwLock<EventHandler>, game_code: &str) -> bool {
    let frame = match Frame::decode(text) {
        Ok(Some(frame)) => frame,
        Ok(None) => return true,
        Err(err) => {
            warn!(%game_code, error = %err, "dropping undecodable frame");
            return true;
        }
    };
    match frame.command {
        Command::Message => {
            if frame.body.trim().is_empty() {
                return true;
            }
            match GameEvent::parse(&frame.body) {
                Ok(event) => {
                    debug!(%game_code, event_type = ?event.event_type, "game event");
                    let current = Arc::clone(&handler.read());
                    current(event);
                }
                Err(err) => warn!(%game_code, error = %err, "dropping malformed game event"),
            }
            true
        }
        Command::Error => {
            warn!(%game_code, message = frame.get("message").unwrap_or(""), "broker error");
            false
        }
        other => {
            trace!(command = %other, "ignored frame");
            true
        }
    }
}
