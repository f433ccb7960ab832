//! Real-time event records published on a game's topic.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::model::PlayerId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum GameEventType {
    PlayerJoined,
    GameStarted,
    RoundCompleted,
    AllPlayersDone,
    GameFinished,
    Other(String),
}

impl From<String> for GameEventType {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "PLAYER_JOINED" => GameEventType::PlayerJoined,
            "GAME_STARTED" => GameEventType::GameStarted,
            "ROUND_COMPLETED" => GameEventType::RoundCompleted,
            "ALL_PLAYERS_DONE" => GameEventType::AllPlayersDone,
            "GAME_FINISHED" => GameEventType::GameFinished,
            _ => GameEventType::Other(raw),
        }
    }
}

impl From<GameEventType> for String {
    fn from(kind: GameEventType) -> Self {
        match kind {
            GameEventType::PlayerJoined => "PLAYER_JOINED".into(),
            GameEventType::GameStarted => "GAME_STARTED".into(),
            GameEventType::RoundCompleted => "ROUND_COMPLETED".into(),
            GameEventType::AllPlayersDone => "ALL_PLAYERS_DONE".into(),
            GameEventType::GameFinished => "GAME_FINISHED".into(),
            GameEventType::Other(raw) => raw,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameEvent {
    pub event_type: GameEventType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_id: Option<PlayerId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub round_number: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl GameEvent {
    pub fn new(event_type: GameEventType) -> Self {
        Self {
            event_type,
            game_code: None,
            player_id: None,
            player_name: None,
            round_number: None,
            message: None,
            extra: Map::new(),
        }
    }

    /// Parse a message body. Anything that is not a JSON object with an
    /// `eventType` is rejected.
    pub fn parse(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }
}
