//! Configuration utilities (backend URLs, session file, env vars)

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::state::PERSIST_KEY;

const DEFAULT_API_URL: &str = "http://localhost:8080/monopoly";
const DEFAULT_WS_URL: &str = "ws://localhost:8080/ws/websocket";
const DEFAULT_TOAST_MS: u64 = 4000;

#[derive(Debug, Clone)]
pub struct Config {
    /// REST base path; every endpoint path is joined onto it.
    pub api_url: String,
    /// STOMP websocket endpoint.
    pub ws_url: String,
    pub session_file: PathBuf,
    /// `None` disables admin mode entirely.
    pub admin_password: Option<String>,
    pub toast_duration: Duration,
}

impl Config {
    /// Build the configuration from the process environment.
    ///
    /// Reads `MONOPOLY_API_URL`, `MONOPOLY_WS_URL`, `MONOPOLY_SESSION_FILE`,
    /// `MONOPOLY_ADMIN_PASSWORD` and `MONOPOLY_TOAST_MS`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Config::from_env`] with an explicit variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_url = lookup("MONOPOLY_API_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let ws_url = lookup("MONOPOLY_WS_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_WS_URL.to_string());
        let session_file = lookup("MONOPOLY_SESSION_FILE")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| default_session_file(lookup("HOME")));
        let admin_password = lookup("MONOPOLY_ADMIN_PASSWORD").filter(|v| !v.is_empty());
        let toast_ms = lookup("MONOPOLY_TOAST_MS")
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|ms| *ms > 0)
            .unwrap_or(DEFAULT_TOAST_MS);

        Self {
            api_url,
            ws_url,
            session_file,
            admin_password,
            toast_duration: Duration::from_millis(toast_ms),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

/// Dot-file named after the storage key, e.g. `.monopoly_game_state.json`.
fn session_file_name() -> String {
    format!(".{PERSIST_KEY}.json")
}

/// Resolve the session file path.
/// Order:
/// 1) $HOME/.monopoly_game_state.json
/// 2) ./.monopoly_game_state.json
fn default_session_file(home: Option<String>) -> PathBuf {
    match home {
        Some(home) if !home.is_empty() => PathBuf::from(home).join(session_file_name()),
        _ => PathBuf::from(session_file_name()),
    }
}
