use crate::error::AppError;
use crate::models::outlet::Coordinate;

const EARTH_RADIUS_KM: f64 = 6_371.0;

/// Rejects coordinates outside valid degree ranges. Out-of-range input is a
/// caller error, never clamped.
pub fn validate_coordinate(coordinate: &Coordinate) -> Result<(), AppError> {
    if !(-90.0..=90.0).contains(&coordinate.lat) {
        return Err(AppError::Validation {
            field: "lat",
            message: format!("latitude {} outside [-90, 90]", coordinate.lat),
        });
    }
    if !(-180.0..=180.0).contains(&coordinate.lng) {
        return Err(AppError::Validation {
            field: "lng",
            message: format!("longitude {} outside [-180, 180]", coordinate.lng),
        });
    }
    Ok(())
}

pub fn haversine_km(a: &Coordinate, b: &Coordinate) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let delta_lat = (b.lat - a.lat).to_radians();
    let delta_lng = (b.lng - a.lng).to_radians();

    let sin_lat = (delta_lat / 2.0).sin();
    let sin_lng = (delta_lng / 2.0).sin();

    let haversine = sin_lat * sin_lat + lat1.cos() * lat2.cos() * sin_lng * sin_lng;
    let central_angle = 2.0 * haversine.sqrt().asin();

    EARTH_RADIUS_KM * central_angle
}
