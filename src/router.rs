//! Screen router: one enumerated state field selects the view.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::views::{self, ViewModel};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Screen {
    #[default]
    Landing,
    Lobby,
    Game,
    Leaderboard,
    History,
}

impl Screen {
    pub fn as_str(self) -> &'static str {
        match self {
            Screen::Landing => "landing",
            Screen::Lobby => "lobby",
            Screen::Game => "game",
            Screen::Leaderboard => "leaderboard",
            Screen::History => "history",
        }
    }

    /// Unrecognized names fall back to the landing screen.
    pub fn parse_lossy(raw: &str) -> Screen {
        raw.parse().unwrap_or_default()
    }
}

impl FromStr for Screen {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "landing" => Ok(Screen::Landing),
            "lobby" => Ok(Screen::Lobby),
            "game" => Ok(Screen::Game),
            "leaderboard" => Ok(Screen::Leaderboard),
            "history" => Ok(Screen::History),
            other => Err(format!("unknown screen `{other}`")),
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Screen {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map(Screen::parse_lossy).unwrap_or_default())
    }
}

/// Render the view selected by `model.state.current_screen`.
pub fn render(model: &ViewModel<'_>) -> String {
    match model.state.current_screen {
        Screen::Landing => views::landing::render(model),
        Screen::Lobby => views::lobby::render(model),
        Screen::Game => views::board::render(model),
        Screen::Leaderboard => views::leaderboard::render(model),
        Screen::History => views::history::render(model),
    }
}
