//! Spherical-earth geodesy helpers
//!
//! Distance uses the spherical law of cosines and bearing the standard
//! initial-bearing formula, both on a sphere of radius [`EARTH_RADIUS_M`].
//! Formulas follow Chris Veness, <http://www.movable-type.co.uk/scripts/latlong.html>.

use std::f64::consts::PI;

/// Mean earth radius in meters
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Convert degrees to radians
pub fn degrees_to_radians(degrees: f64) -> f64 {
    degrees * PI / 180.0
}

/// Convert radians to degrees
pub fn radians_to_degrees(radians: f64) -> f64 {
    radians * 180.0 / PI
}

/// Great-circle distance in meters between two lat/lon points (degrees)
///
/// Returns exactly 0 for coincident points.
pub fn distance_meters(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    if lat1 == lat2 && lon1 == lon2 {
        return 0.0;
    }

    let phi1 = degrees_to_radians(lat1);
    let phi2 = degrees_to_radians(lat2);
    let delta_lambda = degrees_to_radians(lon2 - lon1);

    let cos_angle = phi1.sin() * phi2.sin() + phi1.cos() * phi2.cos() * delta_lambda.cos();

    // Rounding can push nearly-coincident points just past 1.0
    cos_angle.clamp(-1.0, 1.0).acos() * EARTH_RADIUS_M
}

/// Initial bearing in degrees from point 1 to point 2, normalized to [0, 360)
///
/// The bearing from a point to itself is 0.
pub fn bearing_degrees(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = degrees_to_radians(lat1);
    let phi2 = degrees_to_radians(lat2);
    let delta_lambda = degrees_to_radians(lon2 - lon1);

    let y = delta_lambda.sin() * phi2.cos();
    let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * delta_lambda.cos();

    let bearing = radians_to_degrees(y.atan2(x)).rem_euclid(360.0);
    if bearing >= 360.0 {
        0.0
    } else {
        bearing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degree_radian_boundaries() {
        assert_eq!(degrees_to_radians(0.0), 0.0);
        assert!((degrees_to_radians(90.0) - PI / 2.0).abs() < 1e-15);
        assert!((degrees_to_radians(180.0) - PI).abs() < 1e-15);
        assert!((degrees_to_radians(360.0) - 2.0 * PI).abs() < 1e-15);

        for deg in [0.0, 90.0, 180.0, 360.0] {
            assert!((radians_to_degrees(degrees_to_radians(deg)) - deg).abs() < 1e-12);
        }
    }

    #[test]
    fn test_distance_to_self_is_zero() {
        let points = [
            (0.0, 0.0),
            (90.0, 0.0),
            (-90.0, 135.0),
            (51.5, -0.12),
            (-33.9, 180.0),
            (12.0, -180.0),
        ];
        for (lat, lon) in points {
            assert_eq!(distance_meters(lat, lon, lat, lon), 0.0, "({lat}, {lon})");
        }
    }

    #[test]
    fn test_distance_one_degree_of_latitude() {
        // One degree of arc on a 6371 km sphere
        let expected = EARTH_RADIUS_M * PI / 180.0;
        let d = distance_meters(50.0, 10.0, 51.0, 10.0);
        assert!((d - expected).abs() < 0.01, "got {d}");
    }

    #[test]
    fn test_distance_nearly_coincident_is_finite() {
        let d = distance_meters(52.123456, 0.1, 52.123456, 0.1000001);
        assert!(d.is_finite());
        assert!(d >= 0.0);
    }

    #[test]
    fn test_bearing_cardinal_directions() {
        assert!(bearing_degrees(50.0, 0.0, 51.0, 0.0).abs() < 1e-9);
        assert!((bearing_degrees(0.0, 0.0, 0.0, 1.0) - 90.0).abs() < 1e-9);
        assert!((bearing_degrees(51.0, 0.0, 50.0, 0.0) - 180.0).abs() < 1e-9);
        assert!((bearing_degrees(0.0, 1.0, 0.0, 0.0) - 270.0).abs() < 1e-9);
    }

    #[test]
    fn test_bearing_always_in_range() {
        let coords = [-89.5, -45.0, -0.001, 0.0, 0.001, 45.0, 89.5];
        let lons = [-179.9, -90.0, -0.001, 0.0, 0.001, 90.0, 179.9];
        for &lat1 in &coords {
            for &lat2 in &coords {
                for &lon1 in &lons {
                    for &lon2 in &lons {
                        let b = bearing_degrees(lat1, lon1, lat2, lon2);
                        assert!((0.0..360.0).contains(&b), "bearing {b} out of range");
                    }
                }
            }
        }
    }

    #[test]
    fn test_bearing_to_self_is_zero() {
        assert_eq!(bearing_degrees(47.0, 8.0, 47.0, 8.0), 0.0);
    }
}
