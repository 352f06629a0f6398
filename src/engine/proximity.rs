use std::cmp::Ordering;

use crate::geo::haversine_km;
use crate::models::outlet::{Coordinate, Outlet, OutletCandidate};

/// Annotates candidates with their distance from `reference` and sorts them
/// ascending. Candidates with no known location sort after every candidate
/// with a computed distance; their relative input order is preserved. With no
/// reference point the input passes through untouched, no distances computed.
pub fn rank_by_proximity(
    reference: Option<&Coordinate>,
    outlets: Vec<Outlet>,
) -> Vec<OutletCandidate> {
    let Some(reference) = reference else {
        return outlets
            .into_iter()
            .map(|outlet| OutletCandidate {
                outlet,
                distance_km: None,
            })
            .collect();
    };

    let mut candidates: Vec<OutletCandidate> = outlets
        .into_iter()
        .map(|outlet| {
            let distance_km = outlet
                .location
                .as_ref()
                .map(|location| haversine_km(reference, location));
            OutletCandidate {
                outlet,
                distance_km,
            }
        })
        .collect();

    // Nulls compare as equal among themselves so the stable sort keeps their
    // input order.
    candidates.sort_by(|a, b| match (a.distance_km, b.distance_km) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    candidates
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::rank_by_proximity;
    use crate::models::outlet::{Coordinate, Outlet};

    fn outlet(name: &str, location: Option<Coordinate>) -> Outlet {
        Outlet {
            id: Uuid::new_v4(),
            airport_id: Uuid::from_u128(1),
            name: name.to_string(),
            terminal: Some("T3".to_string()),
            location,
            created_at: Utc::now(),
        }
    }

    fn at(lat: f64, lng: f64) -> Option<Coordinate> {
        Some(Coordinate { lat, lng })
    }

    #[test]
    fn absent_reference_is_a_pass_through() {
        let outlets = vec![
            outlet("far", at(28.60, 77.20)),
            outlet("near", at(28.5563, 77.1001)),
            outlet("unlocated", None),
        ];

        let ranked = rank_by_proximity(None, outlets);

        assert_eq!(ranked[0].outlet.name, "far");
        assert_eq!(ranked[1].outlet.name, "near");
        assert_eq!(ranked[2].outlet.name, "unlocated");
        assert!(ranked.iter().all(|c| c.distance_km.is_none()));
    }

    #[test]
    fn known_distances_sort_ascending() {
        let gate = Coordinate {
            lat: 28.5562,
            lng: 77.1000,
        };
        let outlets = vec![
            outlet("far", at(28.60, 77.20)),
            outlet("near", at(28.5563, 77.1001)),
            outlet("mid", at(28.57, 77.12)),
        ];

        let ranked = rank_by_proximity(Some(&gate), outlets);

        assert_eq!(ranked[0].outlet.name, "near");
        assert_eq!(ranked[1].outlet.name, "mid");
        assert_eq!(ranked[2].outlet.name, "far");
    }

    #[test]
    fn unlocated_candidates_sort_last_in_input_order() {
        let gate = Coordinate {
            lat: 28.5562,
            lng: 77.1000,
        };
        let outlets = vec![
            outlet("no-location-a", None),
            outlet("far", at(28.60, 77.20)),
            outlet("no-location-b", None),
            outlet("near", at(28.5563, 77.1001)),
        ];

        let ranked = rank_by_proximity(Some(&gate), outlets);

        // All non-null distances precede all null distances, non-decreasing.
        let null_start = ranked
            .iter()
            .position(|c| c.distance_km.is_none())
            .unwrap();
        assert!(ranked[..null_start]
            .windows(2)
            .all(|pair| pair[0].distance_km.unwrap() <= pair[1].distance_km.unwrap()));
        assert!(ranked[null_start..].iter().all(|c| c.distance_km.is_none()));

        assert_eq!(ranked[0].outlet.name, "near");
        assert_eq!(ranked[1].outlet.name, "far");
        assert_eq!(ranked[2].outlet.name, "no-location-a");
        assert_eq!(ranked[3].outlet.name, "no-location-b");
    }
}
