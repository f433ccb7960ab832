//! Persisted session: the identity fields that survive a restart.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::model::PlayerId;
use crate::router::Screen;

/// Key under which the session is stored.
pub const PERSIST_KEY: &str = "monopoly_game_state";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(default)]
    pub game_code: Option<String>,
    #[serde(default)]
    pub current_player_id: Option<PlayerId>,
    #[serde(default)]
    pub current_player_name: Option<String>,
    #[serde(default)]
    pub current_screen: Screen,
}

impl Session {
    /// Enforce the identity invariant: player id and name are either both
    /// present together with a game code, or both absent.
    pub fn normalized(mut self) -> Self {
        self.game_code = non_blank(self.game_code);
        self.current_player_name = non_blank(self.current_player_name);
        self.current_player_id = self.current_player_id.filter(|id| !id.as_str().trim().is_empty());

        let identity_complete = self.current_player_id.is_some() && self.current_player_name.is_some();
        if self.game_code.is_none() || !identity_complete {
            self.current_player_id = None;
            self.current_player_name = None;
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.game_code.is_none() && self.current_player_id.is_none() && self.current_player_name.is_none()
    }

    /// A saved game the player can jump back into.
    pub fn is_resumable(&self) -> bool {
        self.game_code.is_some() && self.current_player_id.is_some()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Decode stored session text. Corrupt or mis-shaped content yields `None`.
pub fn decode(raw: &str) -> Option<Session> {
    match serde_json::from_str::<Session>(raw) {
        Ok(session) => {
            let session = session.normalized();
            (!session.is_empty()).then_some(session)
        }
        Err(err) => {
            warn!(error = %err, "discarding unreadable persisted session");
            None
        }
    }
}

/// Persistence adapter for the session.
///
/// Implementations never fail loudly: load problems read as "no session",
/// write problems are logged and dropped.
pub trait SessionStore: Send + Sync {
    fn load(&self) -> Option<Session>;
    fn save(&self, session: &Session);
    fn clear(&self);
}

/// Session kept as a JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Option<Session> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => decode(&raw),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no persisted session");
                None
            }
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "cannot read persisted session");
                None
            }
        }
    }

    fn save(&self, session: &Session) {
        if session.is_empty() {
            self.clear();
            return;
        }
        let json = match serde_json::to_string(session) {
            Ok(json) => json,
            Err(err) => {
                warn!(error = %err, "cannot encode session");
                return;
            }
        };
        // write-then-rename so a crash never leaves half a file behind
        let tmp = self.path.with_extension("json.tmp");
        let result = fs::write(&tmp, json).and_then(|()| fs::rename(&tmp, &self.path));
        if let Err(err) = result {
            warn!(path = %self.path.display(), error = %err, "cannot persist session");
        }
    }

    fn clear(&self) {
        match fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "persisted session removed"),
            Err(err) if err.kind() == ErrorKind::NotFound => {}
            Err(err) => warn!(path = %self.path.display(), error = %err, "cannot remove session"),
        }
    }
}

/// In-process storage holding the raw serialized text, like a browser's
/// local storage slot.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    raw: Mutex<Option<String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with arbitrary stored text, valid or not.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self { raw: Mutex::new(Some(raw.into())) }
    }

    pub fn raw(&self) -> Option<String> {
        self.raw.lock().clone()
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Option<Session> {
        self.raw.lock().as_deref().and_then(decode)
    }

    fn save(&self, session: &Session) {
        if session.is_empty() {
            self.clear();
            return;
        }
        match serde_json::to_string(session) {
            Ok(json) => *self.raw.lock() = Some(json),
            Err(err) => warn!(error = %err, "cannot encode session"),
        }
    }

    fn clear(&self) {
        self.raw.lock().take();
    }
}

impl<T: SessionStore + ?Sized> SessionStore for std::sync::Arc<T> {
    fn load(&self) -> Option<Session> {
        (**self).load()
    }

    fn save(&self, session: &Session) {
        (**self).save(session)
    }

    fn clear(&self) {
        (**self).clear()
    }
}
