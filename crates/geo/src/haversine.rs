//! Haversine distance calculation.
//!
//! The Haversine formula calculates the great-circle distance between two
//! points on a sphere given their longitudes and latitudes. Road distance is
//! always at least the great-circle distance, which is what makes this usable
//! as a cheap pre-filter before any routing call.

use crate::Coordinate;

/// Earth's mean radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Earth's mean radius in meters.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Calculates the great-circle distance between two coordinates in kilometers.
///
/// Pure and total: no failure modes, symmetric in its arguments, and zero
/// for identical points.
///
/// # Example
/// ```
/// use carefind_geo::{haversine_distance, Coordinate};
///
/// let berlin = Coordinate::new(52.5200, 13.4050);
/// let paris = Coordinate::new(48.8566, 2.3522);
///
/// let distance = haversine_distance(&berlin, &paris);
/// assert!((distance - 878.0).abs() < 10.0);
/// ```
#[inline]
pub fn haversine_distance(from: &Coordinate, to: &Coordinate) -> f64 {
    haversine_distance_with_radius(from, to, EARTH_RADIUS_KM)
}

/// Calculates the great-circle distance between two coordinates in meters.
#[inline]
pub fn haversine_distance_meters(from: &Coordinate, to: &Coordinate) -> f64 {
    haversine_distance_with_radius(from, to, EARTH_RADIUS_M)
}

#[inline]
fn haversine_distance_with_radius(from: &Coordinate, to: &Coordinate, radius: f64) -> f64 {
    let (lat1, lon1) = from.to_radians();
    let (lat2, lon2) = to.to_radians();

    let d_lat = lat2 - lat1;
    let d_lon = lon2 - lon1;

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);

    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    radius * c
}

#[cfg(test)]
mod tests {
    use super::*;

    // Test data: known distances between cities
    const BERLIN: Coordinate = Coordinate {
        latitude: 52.5200,
        longitude: 13.4050,
    };
    const PARIS: Coordinate = Coordinate {
        latitude: 48.8566,
        longitude: 2.3522,
    };
    const SAO_PAULO: Coordinate = Coordinate {
        latitude: -23.5505,
        longitude: -46.6333,
    };
    const RIO: Coordinate = Coordinate {
        latitude: -22.9068,
        longitude: -43.1729,
    };

    #[test]
    fn test_berlin_to_paris() {
        let distance = haversine_distance(&BERLIN, &PARIS);
        // Reference great-circle value: ~877.5 km; required within 0.5%
        assert!(
            (distance - 877.5).abs() / 877.5 < 0.005,
            "Berlin-Paris: {}",
            distance
        );
    }

    #[test]
    fn test_sao_paulo_to_rio() {
        let distance = haversine_distance(&SAO_PAULO, &RIO);
        // Reference: ~357.4 km
        assert!(
            (distance - 357.4).abs() / 357.4 < 0.005,
            "SP-Rio: {}",
            distance
        );
    }

    #[test]
    fn test_same_point_zero_distance() {
        let distance = haversine_distance(&BERLIN, &BERLIN);
        assert!(distance.abs() < 0.001);
    }

    #[test]
    fn test_symmetry() {
        let d1 = haversine_distance(&BERLIN, &PARIS);
        let d2 = haversine_distance(&PARIS, &BERLIN);
        assert!((d1 - d2).abs() < 0.001);
    }

    #[test]
    fn test_one_tenth_degree_on_equator() {
        // 0.09 degrees of longitude on the equator is ~10 km; this anchors
        // the radius-scenario fixtures used elsewhere in the workspace.
        let origin = Coordinate::new(0.0, 0.0);
        let near = Coordinate::new(0.0, 0.09);
        let distance = haversine_distance(&origin, &near);
        assert!((distance - 10.0).abs() < 0.1, "got {}", distance);
    }

    #[test]
    fn test_meters_conversion() {
        let km = haversine_distance(&BERLIN, &PARIS);
        let meters = haversine_distance_meters(&BERLIN, &PARIS);
        assert!((meters - km * 1000.0).abs() < 1.0);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn distance_is_symmetric(
                lat1 in -90.0f64..90.0, lon1 in -180.0f64..180.0,
                lat2 in -90.0f64..90.0, lon2 in -180.0f64..180.0,
            ) {
                let a = Coordinate::new(lat1, lon1);
                let b = Coordinate::new(lat2, lon2);
                let d1 = haversine_distance(&a, &b);
                let d2 = haversine_distance(&b, &a);
                prop_assert!((d1 - d2).abs() < 1e-9);
            }

            #[test]
            fn distance_is_non_negative_and_bounded(
                lat1 in -90.0f64..90.0, lon1 in -180.0f64..180.0,
                lat2 in -90.0f64..90.0, lon2 in -180.0f64..180.0,
            ) {
                let d = haversine_distance(
                    &Coordinate::new(lat1, lon1),
                    &Coordinate::new(lat2, lon2),
                );
                // Half the Earth's circumference is the upper bound
                prop_assert!(d >= 0.0);
                prop_assert!(d <= std::f64::consts::PI * EARTH_RADIUS_KM + 1.0);
            }
        }
    }
}
