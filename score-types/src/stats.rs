use serde::{Deserialize, Serialize};

use crate::location::LatLng;

/// One entry of a round leaderboard.
///
/// `modified` is a caller-observable fact, not a storage one: the controller
/// sets it when a submission replaced an earlier guess in the same round.
/// Rows read back from storage always carry `false`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundScore {
    pub guess_id: String,
    pub username: String,
    pub color: Option<String>,
    pub flag: Option<String>,
    pub position: LatLng,
    pub streak: i32,
    pub distance: f64,
    pub score: i32,
    pub modified: bool,
}

/// A participant of a round, without scores (shown while guesses are open).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundParticipant {
    pub guess_id: String,
    pub username: String,
    pub color: Option<String>,
    pub flag: Option<String>,
}

/// One entry of a game leaderboard: per-user totals over the game's rounds.
/// `streak` is the value recorded on the user's last guess in the game, not
/// a live recomputation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameScore {
    pub username: String,
    pub color: Option<String>,
    pub flag: Option<String>,
    pub streak: i32,
    pub rounds: i32,
    pub distance: f64,
    pub score: i32,
}

/// Lifetime statistics for one user, honoring the reset watermark.
/// Victories are never watermarked: a game, once won, stays won.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub username: String,
    pub flag: Option<String>,
    pub streak: i32,
    pub best_streak: i32,
    pub nb_guesses: i64,
    pub correct_guesses: i64,
    pub mean_score: Option<f64>,
    pub perfects: i64,
    pub victories: i64,
}

/// The holder of one channel-wide record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatLeader {
    pub id: String,
    pub username: String,
    pub count: i64,
}

/// Channel-wide "best of" records. Each is `None` until anyone qualifies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalStats {
    pub streak: Option<StatLeader>,
    pub victories: Option<StatLeader>,
    pub perfects: Option<StatLeader>,
}
