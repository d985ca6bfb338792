use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::user::PlayerStatus;

/// Lifecycle phase of a game session, always derived from the stored start
/// time and time limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum GameState {
    Pending,
    Active,
    Completed,
}

impl GameState {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameState::Pending => "pending",
            GameState::Active => "active",
            GameState::Completed => "completed",
        }
    }
}

impl std::fmt::Display for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status report returned to polling clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "PascalCase")]
pub struct GameStatus {
    pub game_state: GameState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub board: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub time_limit: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub time_left: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub player1: Option<PlayerStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub player2: Option<PlayerStatus>,
}

impl GameStatus {
    /// Report for a session still waiting on its second player.
    pub fn pending() -> Self {
        Self {
            game_state: GameState::Pending,
            board: None,
            time_limit: None,
            time_left: None,
            player1: None,
            player2: None,
        }
    }
}
