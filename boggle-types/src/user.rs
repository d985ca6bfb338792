use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A registered player. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "PascalCase")]
pub struct User {
    pub user_token: String,
    pub nickname: String,
}

/// Per-player section of a status report.
///
/// `nickname` and `words_played` are only filled in for full (non-brief)
/// reports, and `words_played` only once the game is completed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "PascalCase")]
pub struct PlayerStatus {
    pub score: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub nickname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub words_played: Option<Vec<WordPlayed>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "PascalCase")]
pub struct WordPlayed {
    pub word: String,
    pub score: i32,
}
