//! Read-only projections of backend entities.
//!
//! Everything here is owned and mutated server-side; the client only
//! deserializes and renders it. Field names follow the backend's camelCase
//! JSON, enums its SCREAMING_SNAKE_CASE constants.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameStatus {
    Lobby,
    InProgress,
    Finished,
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GameStatus::Lobby => "LOBBY",
            GameStatus::InProgress => "IN PROGRESS",
            GameStatus::Finished => "FINISHED",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PlayerStatus {
    Active,
    JobLost,
    Eliminated,
    Other(String),
}

impl From<String> for PlayerStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "ACTIVE" => PlayerStatus::Active,
            "JOB_LOST" => PlayerStatus::JobLost,
            "ELIMINATED" => PlayerStatus::Eliminated,
            _ => PlayerStatus::Other(raw),
        }
    }
}

impl From<PlayerStatus> for String {
    fn from(status: PlayerStatus) -> Self {
        match status {
            PlayerStatus::Active => "ACTIVE".into(),
            PlayerStatus::JobLost => "JOB_LOST".into(),
            PlayerStatus::Eliminated => "ELIMINATED".into(),
            PlayerStatus::Other(raw) => raw,
        }
    }
}

impl fmt::Display for PlayerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerStatus::Active => f.write_str("ACTIVE"),
            PlayerStatus::JobLost => f.write_str("JOB LOST"),
            PlayerStatus::Eliminated => f.write_str("ELIMINATED"),
            PlayerStatus::Other(raw) => f.write_str(raw),
        }
    }
}

/// Living-cost tier paid every round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HousingType {
    ParentHouse,
    SharedApartment,
    SingleApartment,
    LuxuryApartmentNinuLekki,
}

impl HousingType {
    pub const ALL: [HousingType; 4] = [
        HousingType::ParentHouse,
        HousingType::SharedApartment,
        HousingType::SingleApartment,
        HousingType::LuxuryApartmentNinuLekki,
    ];

    pub fn label(self) -> &'static str {
        match self {
            HousingType::ParentHouse => "Parent's House",
            HousingType::SharedApartment => "Shared Apartment",
            HousingType::SingleApartment => "Single Apartment",
            HousingType::LuxuryApartmentNinuLekki => "Luxury Lekki",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            HousingType::ParentHouse => "🏠",
            HousingType::SharedApartment => "🏢",
            HousingType::SingleApartment => "🏬",
            HousingType::LuxuryApartmentNinuLekki => "🏰",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            HousingType::ParentHouse => "No monthly cost, but zero privacy. Best for saving money.",
            HousingType::SharedApartment => "Split bills with flatmates. Affordable and social.",
            HousingType::SingleApartment => "Your own space. Fairly expensive but peaceful.",
            HousingType::LuxuryApartmentNinuLekki => "The peak of Lagos living. Extremely expensive.",
        }
    }

    /// Per-round cost as advertised to the player.
    pub fn cost(self) -> &'static str {
        match self {
            HousingType::ParentHouse => "₦0",
            HousingType::SharedApartment => "₦200,000",
            HousingType::SingleApartment => "₦500,000",
            HousingType::LuxuryApartmentNinuLekki => "₦1,500,000",
        }
    }

    pub fn wire_name(self) -> &'static str {
        match self {
            HousingType::ParentHouse => "PARENT_HOUSE",
            HousingType::SharedApartment => "SHARED_APARTMENT",
            HousingType::SingleApartment => "SINGLE_APARTMENT",
            HousingType::LuxuryApartmentNinuLekki => "LUXURY_APARTMENT_NINU_LEKKI",
        }
    }
}

impl FromStr for HousingType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.trim().to_ascii_uppercase().replace(['-', ' '], "_");
        match norm.as_str() {
            "PARENT" | "PARENT_HOUSE" => Ok(HousingType::ParentHouse),
            "SHARED" | "SHARED_APARTMENT" => Ok(HousingType::SharedApartment),
            "SINGLE" | "SINGLE_APARTMENT" => Ok(HousingType::SingleApartment),
            "LUXURY" | "LEKKI" | "LUXURY_APARTMENT_NINU_LEKKI" => {
                Ok(HousingType::LuxuryApartmentNinuLekki)
            }
            _ => Err(format!("unknown housing tier `{s}` (parent, shared, single, luxury)")),
        }
    }
}

/// Random event category resolved for a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    JobLoss,
    MedicalEmergency,
    FamilyEmergency,
    FamilySupport,
    GoodInvestment,
    BadInvestment,
    #[serde(other)]
    Unknown,
}

impl EventType {
    pub fn icon(self) -> &'static str {
        match self {
            EventType::JobLoss => "💼❌",
            EventType::MedicalEmergency => "🏥",
            EventType::FamilyEmergency => "👪⚠️",
            EventType::FamilySupport => "👪💰",
            EventType::GoodInvestment => "📈",
            EventType::BadInvestment => "📉",
            EventType::Unknown => "🎲",
        }
    }

    pub fn is_favourable(self) -> bool {
        matches!(self, EventType::GoodInvestment | EventType::FamilySupport)
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EventType::JobLoss => "JOB LOSS",
            EventType::MedicalEmergency => "MEDICAL EMERGENCY",
            EventType::FamilyEmergency => "FAMILY EMERGENCY",
            EventType::FamilySupport => "FAMILY SUPPORT",
            EventType::GoodInvestment => "GOOD INVESTMENT",
            EventType::BadInvestment => "BAD INVESTMENT",
            EventType::Unknown => "EVENT",
        })
    }
}

/// Player identifier. The backend sends numeric ids; strings are accepted too.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl PlayerId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(s: &str) -> Self {
        PlayerId(s.to_string())
    }
}

impl<'de> Deserialize<'de> for PlayerId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(i64),
            Text(String),
        }
        Ok(match Raw::deserialize(deserializer)? {
            Raw::Int(n) => PlayerId(n.to_string()),
            Raw::Text(s) => PlayerId(s),
        })
    }
}

/// A value the server formats for display; rendered exactly as received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Formatted {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for Formatted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Formatted::Number(n) => write!(f, "{n}"),
            Formatted::Text(s) => f.write_str(s),
        }
    }
}

/// Render an optional server value, with a dash when absent.
pub fn shown(value: &Option<Formatted>) -> String {
    value.as_ref().map(|v| v.to_string()).unwrap_or_else(|| "—".to_string())
}

/// Integer amounts that may arrive as JSON floats (`200000.0`) or null.
fn lenient_amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let value = Option::<serde_json::Number>::deserialize(deserializer)?;
    Ok(match value {
        None => 0,
        Some(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.round() as i64))
            .unwrap_or_default(),
    })
}

fn default_round() -> u32 {
    1
}

fn default_total_rounds() -> u32 {
    10
}

fn default_max_players() -> u32 {
    4
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    #[serde(default)]
    pub game_code: String,
    pub status: GameStatus,
    #[serde(default = "default_round")]
    pub current_round: u32,
    #[serde(default = "default_total_rounds")]
    pub total_rounds: u32,
    #[serde(default = "default_max_players")]
    pub max_players: u32,
    #[serde(default)]
    pub players: Vec<Player>,
}

impl Game {
    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| &p.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub status: PlayerStatus,
    #[serde(default, alias = "housingType")]
    pub housing: Option<HousingType>,
    #[serde(default)]
    pub cash_balance: Option<Formatted>,
    #[serde(default)]
    pub loan_balance: Option<Formatted>,
    #[serde(default)]
    pub net_worth: Option<Formatted>,
    #[serde(default)]
    pub credit_score: Option<Formatted>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundResult {
    pub round_number: u32,
    pub dice_roll: u8,
    pub event_type: EventType,
    #[serde(default)]
    pub event_description: String,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub event_amount: i64,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub salary_received: i64,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub housing_cost: i64,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub survival_cost: i64,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub loan_payment: i64,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub cash_balance_end: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub player_id: PlayerId,
    pub player_name: String,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub net_worth_kobo: i64,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub cash_balance_kobo: i64,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub loan_balance_kobo: i64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Leaderboard {
    #[serde(default)]
    pub round_number: Option<u32>,
    #[serde(default)]
    pub standings: Vec<LeaderboardEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRound {
    pub round_number: u32,
    #[serde(default)]
    pub dice_roll: Option<u8>,
    #[serde(default)]
    pub event_type: Option<EventType>,
    #[serde(default)]
    pub event_description: Option<String>,
    #[serde(default)]
    pub event_amount: Option<Formatted>,
    #[serde(default)]
    pub housing_type: Option<HousingType>,
    #[serde(default)]
    pub salary_received: Option<Formatted>,
    #[serde(default)]
    pub housing_cost: Option<Formatted>,
    #[serde(default)]
    pub survival_cost: Option<Formatted>,
    #[serde(default)]
    pub loan_payment: Option<Formatted>,
    #[serde(default)]
    pub cash_balance_end: Option<Formatted>,
    #[serde(default)]
    pub net_worth: Option<Formatted>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerHistory {
    #[serde(default)]
    pub current_cash_balance: Option<Formatted>,
    #[serde(default)]
    pub current_loan_balance: Option<Formatted>,
    #[serde(default)]
    pub current_net_worth: Option<Formatted>,
    #[serde(default)]
    pub credit_score: Option<Formatted>,
    #[serde(default)]
    pub rounds: Vec<HistoryRound>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanPreview {
    #[serde(default)]
    pub current_loan_balance: Option<Formatted>,
    #[serde(default)]
    pub proposed_payment: Option<Formatted>,
    #[serde(default)]
    pub balance_after_payment: Option<Formatted>,
    #[serde(default)]
    pub interest_if_not_fully_paid: Option<Formatted>,
    #[serde(default)]
    pub new_balance_next_round: Option<Formatted>,
    #[serde(default)]
    pub tip: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedGame {
    pub game_code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinedPlayer {
    pub id: PlayerId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminGame {
    pub game_code: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub players: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminPlayer {
    pub id: PlayerId,
    pub name: String,
}
