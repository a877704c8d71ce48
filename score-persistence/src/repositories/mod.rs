pub mod game_repository;
pub mod stats_repository;
pub mod streak_repository;
pub mod user_repository;

pub use game_repository::GameRepository;
pub use stats_repository::StatsRepository;
pub use streak_repository::StreakRepository;
pub use user_repository::UserRepository;

/// Unix seconds; the time base for every row this store writes.
pub(crate) fn timestamp() -> i64 {
    chrono::Utc::now().timestamp()
}

#[cfg(test)]
pub(crate) mod test_support {
    use score_types::{GameSeed, LatLng, MapBounds, NewGuess, RoundLocation};

    pub fn game_seed(token: &str) -> GameSeed {
        GameSeed {
            token: token.to_owned(),
            map: "test-map".to_owned(),
            map_name: "Test Map".to_owned(),
            bounds: MapBounds {
                min: LatLng { lat: 0.0, lng: 0.0 },
                max: LatLng {
                    lat: 10.0,
                    lng: 10.0,
                },
            },
            forbid_moving: true,
            forbid_rotating: false,
            forbid_zooming: false,
            time_limit: None,
        }
    }

    pub fn target(lat: f64, lng: f64) -> RoundLocation {
        RoundLocation {
            lat,
            lng,
            pano_id: None,
            heading: 0.0,
            pitch: 0.0,
        }
    }

    pub fn guess(score: i32, distance: f64, streak: i32) -> NewGuess {
        NewGuess {
            color: Some("#fff".to_owned()),
            flag: Some("jo".to_owned()),
            location: LatLng { lat: 0.0, lng: 0.0 },
            country: None,
            streak,
            distance,
            score,
        }
    }
}
