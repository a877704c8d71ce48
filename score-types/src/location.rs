use serde::{Deserialize, Serialize};

/// A plain coordinate pair, as submitted by players and stored in JSON
/// columns.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// Map bounds used to derive the scoring scale for a game.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapBounds {
    pub min: LatLng,
    pub max: LatLng,
}

/// The target panorama of a round, as received from the game provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundLocation {
    pub lat: f64,
    pub lng: f64,
    pub pano_id: Option<String>,
    pub heading: f64,
    pub pitch: f64,
}

impl RoundLocation {
    pub fn lat_lng(&self) -> LatLng {
        LatLng {
            lat: self.lat,
            lng: self.lng,
        }
    }
}
