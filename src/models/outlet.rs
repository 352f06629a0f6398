use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

/// Wire form of a coordinate where either field may be missing. Latitude and
/// longitude only mean something together, so a half-populated pair collapses
/// to no coordinate at all.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PartialCoordinate {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

impl PartialCoordinate {
    pub fn into_coordinate(self) -> Option<Coordinate> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => Some(Coordinate { lat, lng }),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Outlet {
    pub id: Uuid,
    pub airport_id: Uuid,
    pub name: String,
    pub terminal: Option<String>,
    pub location: Option<Coordinate>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: Uuid,
    pub outlet_id: Uuid,
    pub name: String,
    pub price: f64,
    pub is_available: bool,
}

/// An outlet annotated with its distance from a reference point at query
/// time. Never persisted; built per-response by the proximity ranker.
#[derive(Debug, Clone, Serialize)]
pub struct OutletCandidate {
    #[serde(flatten)]
    pub outlet: Outlet,
    pub distance_km: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::PartialCoordinate;

    #[test]
    fn full_pair_becomes_a_coordinate() {
        let partial = PartialCoordinate {
            lat: Some(28.5562),
            lng: Some(77.1000),
        };
        let coordinate = partial.into_coordinate().unwrap();
        assert_eq!(coordinate.lat, 28.5562);
        assert_eq!(coordinate.lng, 77.1000);
    }

    #[test]
    fn half_populated_pair_collapses_to_none() {
        let lat_only = PartialCoordinate {
            lat: Some(28.5562),
            lng: None,
        };
        assert!(lat_only.into_coordinate().is_none());

        let lng_only = PartialCoordinate {
            lat: None,
            lng: Some(77.1000),
        };
        assert!(lng_only.into_coordinate().is_none());

        let empty = PartialCoordinate {
            lat: None,
            lng: None,
        };
        assert!(empty.into_coordinate().is_none());
    }
}
