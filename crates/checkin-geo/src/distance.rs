//! Haversine great-circle distance.

use crate::point::GeoPoint;

/// Mean Earth radius in meters.
const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Computes the great-circle distance between two fixes in meters
/// using the Haversine formula.
///
/// The spherical approximation is adequate at sub-kilometer scale; the
/// error is negligible for a 20 m geofence. Coordinates outside the
/// valid latitude/longitude ranges are a caller error and yield an
/// undefined result; they are not clamped.
pub fn haversine_distance_meters(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let phi1 = a.latitude.to_radians();
    let phi2 = b.latitude.to_radians();
    let delta_phi = (b.latitude - a.latitude).to_radians();
    let delta_lambda = (b.longitude - a.longitude).to_radians();

    let h = (delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_METERS * c
}

/// Formats a distance for display: centimetres below one meter, meters
/// below one kilometre, kilometres with two decimals beyond that.
pub fn format_distance(distance_meters: f64) -> String {
    if distance_meters < 1.0 {
        format!("{} cm", (distance_meters * 100.0).round() as i64)
    } else if distance_meters < 1000.0 {
        format!("{} m", distance_meters.round() as i64)
    } else {
        format!("{:.2} km", distance_meters / 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OFFICE: GeoPoint = GeoPoint {
        latitude: 4.1025,
        longitude: 9.3908,
        accuracy_meters: 0.0,
    };

    #[test]
    fn test_distance_to_self_is_zero() {
        assert_eq!(haversine_distance_meters(&OFFICE, &OFFICE), 0.0);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let other = GeoPoint::from_coordinates(4.1525, 9.2908);
        let forward = haversine_distance_meters(&OFFICE, &other);
        let backward = haversine_distance_meters(&other, &OFFICE);
        assert_eq!(forward, backward);
        assert!(forward > 0.0);
    }

    #[test]
    fn test_small_latitude_offset_is_roughly_33_meters() {
        // 0.0003 degrees of latitude is about 33 m anywhere on the globe.
        let nearby = GeoPoint::from_coordinates(OFFICE.latitude + 0.0003, OFFICE.longitude);
        let distance = haversine_distance_meters(&OFFICE, &nearby);
        assert!(
            (distance - 33.0).abs() < 1.0,
            "expected ~33 m, got {distance} m"
        );
    }

    #[test]
    fn test_distance_doubles_with_latitude_delta() {
        // Small-angle regime on a shared meridian: doubling the latitude
        // delta roughly doubles the distance.
        let one = GeoPoint::from_coordinates(OFFICE.latitude + 0.001, OFFICE.longitude);
        let two = GeoPoint::from_coordinates(OFFICE.latitude + 0.002, OFFICE.longitude);
        let d1 = haversine_distance_meters(&OFFICE, &one);
        let d2 = haversine_distance_meters(&OFFICE, &two);
        assert!((d2 / d1 - 2.0).abs() < 0.01, "ratio was {}", d2 / d1);
    }

    #[test]
    fn test_format_distance_units() {
        assert_eq!(format_distance(0.42), "42 cm");
        assert_eq!(format_distance(33.4), "33 m");
        assert_eq!(format_distance(1530.0), "1.53 km");
    }
}
