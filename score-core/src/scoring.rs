//! Distance and score computation for guesses.
//!
//! The store persists and ranks whatever the controller hands it; this module
//! is where the controller gets those numbers from.

use score_types::{LatLng, MapBounds, PERFECT_SCORE};

/// Mean earth radius in kilometres.
const EARTH_RADIUS_KM: f64 = 6371.071;

/// Divisor turning the map diagonal into the score decay scale. Matches the
/// game provider's own scoring curve.
const SCALE_DIVISOR: f64 = 7.458421;

const SCORE_DECAY: f64 = 0.99866017;

/// Great-circle distance between two coordinates, in kilometres.
pub fn haversine_km(a: LatLng, b: LatLng) -> f64 {
    let rlat1 = a.lat.to_radians();
    let rlat2 = b.lat.to_radians();
    let dlat = rlat2 - rlat1;
    let dlng = (b.lng - a.lng).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + rlat1.cos() * rlat2.cos() * (dlng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

/// The scoring scale of a map, derived from its bounds diagonal.
pub fn map_scale(bounds: &MapBounds) -> f64 {
    haversine_km(bounds.min, bounds.max) / SCALE_DIVISOR
}

/// Score for a guess `distance_km` away from the target, on a map with the
/// given scale. Sub-meter guesses round up to the full 5000.
pub fn score(distance_km: f64, scale: f64) -> i32 {
    (f64::from(PERFECT_SCORE) * SCORE_DECAY.powf(distance_km * 1000.0 / scale)).round() as i32
}
