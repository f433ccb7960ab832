//! One definition per backend capability: method, path, body, and the cache
//! tags it provides or invalidates.

use reqwest::Method;
use serde_json::{json, Value};

use crate::model::{HousingType, PlayerId};

/// Cache category used for invalidation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tag {
    Game,
    Player,
    Leaderboard,
    Admin,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Endpoint {
    CreateGame,
    JoinGame { game_code: String, player_name: String },
    StartGame { game_code: String },
    GetGame { game_code: String },
    PickHousing { player_id: PlayerId, housing: HousingType },
    PlayRound { player_id: PlayerId, loan_payment_naira: i64 },
    GetLeaderboard { game_code: String, round: u32 },
    GetPlayerHistory { player_id: PlayerId },
    PreviewLoan { player_id: PlayerId, proposed_payment_naira: i64 },
    AdminGames,
    AdminPlayers,
    DeletePlayer { player_id: PlayerId },
    DeleteAllPlayersInGame { game_code: String },
    DeleteGame { game_code: String },
    ForceEndGame { game_code: String },
}

impl Endpoint {
    pub fn name(&self) -> &'static str {
        match self {
            Endpoint::CreateGame => "createGame",
            Endpoint::JoinGame { .. } => "joinGame",
            Endpoint::StartGame { .. } => "startGame",
            Endpoint::GetGame { .. } => "getGame",
            Endpoint::PickHousing { .. } => "pickHousing",
            Endpoint::PlayRound { .. } => "playRound",
            Endpoint::GetLeaderboard { .. } => "getLeaderboard",
            Endpoint::GetPlayerHistory { .. } => "getPlayerHistory",
            Endpoint::PreviewLoan { .. } => "previewLoan",
            Endpoint::AdminGames => "getAllGames",
            Endpoint::AdminPlayers => "getAllPlayers",
            Endpoint::DeletePlayer { .. } => "deletePlayer",
            Endpoint::DeleteAllPlayersInGame { .. } => "deleteAllPlayersInGame",
            Endpoint::DeleteGame { .. } => "deleteGame",
            Endpoint::ForceEndGame { .. } => "forceEndGame",
        }
    }

    pub fn method(&self) -> Method {
        match self {
            Endpoint::GetGame { .. }
            | Endpoint::GetLeaderboard { .. }
            | Endpoint::GetPlayerHistory { .. }
            | Endpoint::AdminGames
            | Endpoint::AdminPlayers => Method::GET,
            Endpoint::DeletePlayer { .. }
            | Endpoint::DeleteAllPlayersInGame { .. }
            | Endpoint::DeleteGame { .. } => Method::DELETE,
            Endpoint::ForceEndGame { .. } => Method::PATCH,
            _ => Method::POST,
        }
    }

    /// Raw path segments below the base path; encoding happens when the URL is built.
    pub fn segments(&self) -> Vec<String> {
        let s = |parts: &[&str]| parts.iter().map(|p| p.to_string()).collect::<Vec<_>>();
        match self {
            Endpoint::CreateGame => s(&["games", "createGame"]),
            Endpoint::JoinGame { game_code, .. } => s(&["games", game_code, "join"]),
            Endpoint::StartGame { game_code } => s(&["games", game_code, "start"]),
            Endpoint::GetGame { game_code } => s(&["games", game_code]),
            Endpoint::PickHousing { player_id, .. } => {
                s(&["games", "players", player_id.as_str(), "housing"])
            }
            Endpoint::PlayRound { player_id, .. } => s(&["rounds", "players", player_id.as_str(), "play"]),
            Endpoint::GetLeaderboard { game_code, round } => {
                s(&["rounds", game_code, "leaderboard", &round.to_string()])
            }
            Endpoint::GetPlayerHistory { player_id } => s(&["players", player_id.as_str(), "history"]),
            Endpoint::PreviewLoan { player_id, .. } => {
                s(&["players", player_id.as_str(), "loan", "preview"])
            }
            Endpoint::AdminGames => s(&["admin", "games"]),
            Endpoint::AdminPlayers => s(&["admin", "players"]),
            Endpoint::DeletePlayer { player_id } => s(&["admin", "players", player_id.as_str()]),
            Endpoint::DeleteAllPlayersInGame { game_code } => s(&["admin", "games", game_code, "players"]),
            Endpoint::DeleteGame { game_code } => s(&["admin", "games", game_code]),
            Endpoint::ForceEndGame { game_code } => s(&["admin", "games", game_code, "force-end"]),
        }
    }

    pub fn path(&self) -> String {
        self.segments().join("/")
    }

    pub fn body(&self) -> Option<Value> {
        match self {
            Endpoint::JoinGame { player_name, .. } => Some(json!({ "playerName": player_name })),
            Endpoint::PickHousing { housing, .. } => Some(json!({ "housingType": housing })),
            Endpoint::PlayRound { loan_payment_naira, .. } => {
                Some(json!({ "loanPaymentNaira": loan_payment_naira }))
            }
            Endpoint::PreviewLoan { proposed_payment_naira, .. } => {
                Some(json!({ "proposedPaymentNaira": proposed_payment_naira }))
            }
            _ => None,
        }
    }

    /// Tags whose cached data this query supplies. Empty for mutations.
    pub fn provides(&self) -> &'static [Tag] {
        match self {
            Endpoint::GetGame { .. } => &[Tag::Game],
            Endpoint::GetLeaderboard { .. } => &[Tag::Leaderboard],
            Endpoint::GetPlayerHistory { .. } => &[Tag::Player],
            Endpoint::AdminGames | Endpoint::AdminPlayers => &[Tag::Admin],
            _ => &[],
        }
    }

    /// Tags made stale once this call succeeds.
    pub fn invalidates(&self) -> &'static [Tag] {
        match self {
            Endpoint::CreateGame
            | Endpoint::JoinGame { .. }
            | Endpoint::StartGame { .. }
            | Endpoint::DeletePlayer { .. }
            | Endpoint::DeleteAllPlayersInGame { .. }
            | Endpoint::ForceEndGame { .. } => &[Tag::Game, Tag::Admin],
            Endpoint::PickHousing { .. } => &[Tag::Game],
            Endpoint::PlayRound { .. } => &[Tag::Game, Tag::Leaderboard, Tag::Admin],
            Endpoint::DeleteGame { .. } => &[Tag::Admin],
            _ => &[],
        }
    }

    pub fn is_query(&self) -> bool {
        self.method() == Method::GET
    }
}
