use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Score points that make up one unit of balance.
pub const SCORE_PER_BALANCE_UNIT: f64 = 10_000.0;

pub const STARTING_BALANCE: f64 = 10.0;

pub const WIN_MESSAGE: &str = "Victory!";
pub const LOSS_MESSAGE: &str = "Defeat, but you gained experience";

/// Player bookkeeping as returned by the profile lookup.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: i64,
    pub name: String,
    pub balance: f64,
    pub wins: u32,
    pub level: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub joined_at: Option<String>,
}

impl UserProfile {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            balance: STARTING_BALANCE,
            wins: 0,
            level: 1,
            joined_at: None,
        }
    }
}

/// Sent to the result sink once a game reaches a terminal state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameResultSubmission {
    pub user_id: i64,
    pub score: u32,
    pub won: bool,
    pub difficulty: String,
    pub filled_percent: f64,
}

/// Sink reply carrying the updated bookkeeping.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultAck {
    pub success: bool,
    pub new_balance: f64,
    pub new_level: u32,
    pub message: String,
}

impl ResultAck {
    pub fn accepted(won: bool, new_balance: f64, new_level: u32) -> Self {
        Self {
            success: true,
            new_balance,
            new_level,
            message: if won { WIN_MESSAGE } else { LOSS_MESSAGE }.to_owned(),
        }
    }
}

pub fn balance_after(current_balance: f64, score: u32) -> f64 {
    current_balance + f64::from(score) / SCORE_PER_BALANCE_UNIT
}

pub fn encode<T: Serialize>(message: &T) -> serde_json::Result<String> {
    serde_json::to_string(message)
}

pub fn decode<T: DeserializeOwned>(json: &str) -> serde_json::Result<T> {
    serde_json::from_str(json)
}
