use score_core::{haversine_km, map_scale, score};
use score_types::{LatLng, MapBounds, PERFECT_SCORE};

fn world_bounds() -> MapBounds {
    MapBounds {
        min: LatLng {
            lat: -85.0,
            lng: -180.0,
        },
        max: LatLng {
            lat: 85.0,
            lng: 180.0,
        },
    }
}

#[test]
fn test_haversine_zero_for_same_point() {
    let p = LatLng { lat: 48.85, lng: 2.35 };
    assert_eq!(haversine_km(p, p), 0.0);
}

#[test]
fn test_haversine_paris_london() {
    let paris = LatLng { lat: 48.8566, lng: 2.3522 };
    let london = LatLng {
        lat: 51.5074,
        lng: -0.1278,
    };
    let km = haversine_km(paris, london);
    // Roughly 344 km; allow for the rounded earth radius constant.
    assert!((km - 344.0).abs() < 2.0, "got {km}");
}

#[test]
fn test_perfect_score_at_zero_distance() {
    let scale = map_scale(&world_bounds());
    assert_eq!(score(0.0, scale), PERFECT_SCORE);
}

#[test]
fn test_score_decreases_with_distance() {
    let scale = map_scale(&world_bounds());
    let near = score(10.0, scale);
    let far = score(2500.0, scale);
    assert!(near > far);
    assert!(far > 0);
    assert!(near < PERFECT_SCORE);
}

#[test]
fn test_sub_meter_distance_rounds_to_perfect() {
    let scale = map_scale(&world_bounds());
    assert_eq!(score(0.0005, scale), PERFECT_SCORE);
}
