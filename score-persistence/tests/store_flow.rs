//! End-to-end flow over a real store: scores computed from coordinates, a
//! full game played out, leaderboards and stats read back.

use score_core::scoring::{haversine_km, map_scale, score};
use score_persistence::Store;
use score_types::{GameSeed, LatLng, MapBounds, NewGuess, RoundLocation, PERFECT_SCORE};

fn seed() -> GameSeed {
    GameSeed {
        token: "flow".to_owned(),
        map: "world".to_owned(),
        map_name: "World".to_owned(),
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
        time_limit: Some(90),
    }
}

fn target(lat: f64, lng: f64) -> RoundLocation {
    RoundLocation {
        lat,
        lng,
        pano_id: Some("pano".to_owned()),
        heading: 0.0,
        pitch: 0.0,
    }
}

fn guess_at(position: LatLng, target: LatLng, scale: f64, streak: i32) -> NewGuess {
    let distance = haversine_km(position, target);
    NewGuess {
        color: Some("#fff".to_owned()),
        flag: None,
        location: position,
        country: None,
        streak,
        distance,
        score: score(distance, scale),
    }
}

#[tokio::test]
async fn test_full_game_flow() {
    let store = Store::open_in_memory().await.unwrap();
    store.users().get_or_create_user("a", "alice").await.unwrap();
    store.users().get_or_create_user("b", "bob").await.unwrap();

    let seed = seed();
    let scale = map_scale(&seed.bounds);
    let games = store.games();
    games.create_game(&seed).await.unwrap();

    let mut bob_total = 0;
    for i in 0..5 {
        let round_target = target(1.0 + i as f64, 2.0);
        let round = games.create_round("flow", &round_target).await.unwrap();
        assert_eq!(
            games.get_current_round("flow").await.unwrap().as_deref(),
            Some(round.as_str())
        );

        // Alice hits the target exactly, bob lands a degree east.
        let alice = guess_at(round_target.lat_lng(), round_target.lat_lng(), scale, i + 1);
        assert_eq!(alice.score, PERFECT_SCORE);
        games.create_guess(&round, "a", &alice).await.unwrap();
        store.streaks().add_user_streak("a", &round).await.unwrap();

        let off_target = LatLng {
            lat: round_target.lat,
            lng: round_target.lng + 1.0,
        };
        let bob = guess_at(off_target, round_target.lat_lng(), scale, 0);
        assert!(bob.score > 0 && bob.score < PERFECT_SCORE);
        bob_total += bob.score;
        games.create_guess(&round, "b", &bob).await.unwrap();

        let scores = store.stats().get_round_scores(&round).await.unwrap();
        assert_eq!(scores[0].username, "alice");
        assert_eq!(scores[1].username, "bob");
    }

    let totals = store.stats().get_game_scores("flow").await.unwrap();
    assert_eq!(totals[0].username, "alice");
    assert_eq!(totals[0].score, 5 * PERFECT_SCORE);
    assert_eq!(totals[0].rounds, 5);
    assert_eq!(totals[1].username, "bob");
    assert_eq!(totals[1].score, bob_total);

    let alice_stats = store.stats().get_user_stats("a").await.unwrap().unwrap();
    assert_eq!(alice_stats.perfects, 5);
    assert_eq!(alice_stats.victories, 1);
    assert_eq!(alice_stats.streak, 5);
    assert_eq!(alice_stats.best_streak, 5);

    let bob_stats = store.stats().get_user_stats("b").await.unwrap().unwrap();
    assert_eq!(bob_stats.victories, 0);
    assert_eq!(bob_stats.nb_guesses, 5);

    let streak = store.streaks().get_user_streak("a").await.unwrap().unwrap();
    assert_eq!(streak.count, 5);

    store.close().await.unwrap();
}
