//! Client error type.

use reqwest::StatusCode;

pub type Result<T, E = ClientError> = std::result::Result<T, E>;

#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    /// The request never produced a response (connection refused, DNS, TLS...).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The backend answered with a non-success status.
    #[error("rejected with {status}{}", suffix(.message))]
    Rejected { status: StatusCode, message: Option<String> },
    #[error("malformed payload: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("an identical action is already in flight")]
    Busy,
    #[error("no active game")]
    NoGame,
    #[error("not joined to a game")]
    NotJoined,
    #[error("admin mode required")]
    Unauthorized,
    #[error("{0}")]
    InvalidInput(String),
    /// The session moved on (game left or switched) while the request was in flight.
    #[error("response arrived for a session that is no longer active")]
    Stale,
    #[error("real-time channel: {0}")]
    Channel(String),
}

impl ClientError {
    /// Text shown to the user for this failure.
    ///
    /// Backend rejections carry their own message and are shown verbatim;
    /// everything else collapses to `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ClientError::Rejected { message: Some(message), .. } if !message.trim().is_empty() => {
                message.clone()
            }
            ClientError::InvalidInput(message) => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

fn suffix(message: &Option<String>) -> String {
    message.as_deref().map(|m| format!(": {m}")).unwrap_or_default()
}
