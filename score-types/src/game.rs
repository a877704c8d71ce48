use serde::{Deserialize, Serialize};

use crate::location::{LatLng, MapBounds};

/// The settings of a game session as supplied by the external game provider.
/// Games are immutable once recorded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSeed {
    pub token: String,
    pub map: String,
    pub map_name: String,
    pub bounds: MapBounds,
    pub forbid_moving: bool,
    pub forbid_rotating: bool,
    pub forbid_zooming: bool,
    pub time_limit: Option<i32>, // seconds
}

/// The payload of a guess at submission time. Color and flag are snapshots:
/// a later flag change must not rewrite history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewGuess {
    pub color: Option<String>,
    pub flag: Option<String>,
    pub location: LatLng,
    pub country: Option<String>,
    pub streak: i32,
    pub distance: f64,
    pub score: i32,
}

/// A stored guess for one (round, user) pair, returned by lookups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserGuess {
    pub id: String,
    pub color: Option<String>,
    pub flag: Option<String>,
    pub location: LatLng,
    pub country: Option<String>,
    pub streak: i32,
    pub distance: f64,
    pub score: i32,
}

/// A user row as seen by callers. `reset_at` is the watermark: guesses
/// created at or before it are excluded from current stats.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub flag: Option<String>,
    pub previous_guess: Option<LatLng>,
    pub last_location: Option<LatLng>,
    pub reset_at: i64, // unix seconds
}

/// A user's current streak, joined with the last round that extended it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentStreak {
    pub id: String,
    pub count: i32,
    pub last_location: LatLng,
}
