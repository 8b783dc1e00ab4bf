//! Great-circle distance

use crate::domain::Coordinates;

/// Mean Earth radius in kilometres
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance in kilometres
pub fn distance_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lng = (lng2 - lng1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

pub fn distance_between(a: Coordinates, b: Coordinates) -> f64 {
    distance_km(a.lat, a.lng, b.lat, b.lng)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SF: (f64, f64) = (37.7749, -122.4194);
    const OAKLAND: (f64, f64) = (37.8044, -122.2711);

    #[test]
    fn test_same_point_is_zero() {
        assert_eq!(distance_km(SF.0, SF.1, SF.0, SF.1), 0.0);
    }

    #[test]
    fn test_symmetric() {
        let pairs = [
            (SF, OAKLAND),
            ((51.5074, -0.1278), (40.7128, -74.0060)),
            ((-33.8688, 151.2093), (35.6762, 139.6503)),
            ((0.0, 179.9), (0.0, -179.9)),
        ];
        for (p, q) in pairs {
            let forward = distance_km(p.0, p.1, q.0, q.1);
            let backward = distance_km(q.0, q.1, p.0, p.1);
            assert!((forward - backward).abs() < 1e-9, "{:?} vs {:?}", p, q);
        }
    }

    #[test]
    fn test_known_distances() {
        let bay = distance_km(SF.0, SF.1, OAKLAND.0, OAKLAND.1);
        assert!((bay - 13.4).abs() < 0.5, "got {}", bay);

        let london_new_york = distance_km(51.5074, -0.1278, 40.7128, -74.0060);
        assert!((london_new_york - 5570.0).abs() < 10.0, "got {}", london_new_york);
    }

    #[test]
    fn test_antimeridian_is_short() {
        let d = distance_km(0.0, 179.9, 0.0, -179.9);
        assert!(d < 25.0, "got {}", d);
    }
}
