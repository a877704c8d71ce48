use serde::{Deserialize, Serialize};

use crate::location::LatLng;

/// A user entry from the previous flat-file store, keyed by login name.
/// All fields are optional: old installations recorded whatever was known at
/// the time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LegacyUser {
    pub user: Option<String>,
    pub username: Option<String>,
    pub flag: Option<String>,
    pub previous_guess: Option<LatLng>,
    pub last_location: Option<LatLng>,
    pub best_streak: i32,
    pub correct_guesses: i64,
    pub nb_guesses: i64,
    pub perfects: i64,
    pub victories: i64,
}
