//! Coordinate types and great-circle distance math for Carefind.
//!
//! This crate provides:
//! - The `Coordinate` value type with range validation
//! - Haversine great-circle distance calculations
//!
//! # Example
//!
//! ```
//! use carefind_geo::{haversine_distance, Coordinate};
//!
//! let berlin = Coordinate::new(52.5200, 13.4050);
//! let paris = Coordinate::new(48.8566, 2.3522);
//!
//! let distance_km = haversine_distance(&berlin, &paris);
//! assert!((distance_km - 878.0).abs() < 10.0); // ~878 km
//! ```

mod error;
mod haversine;

pub use error::{GeoError, Result};
pub use haversine::{haversine_distance, haversine_distance_meters, EARTH_RADIUS_KM};

/// A geographic coordinate with latitude and longitude.
///
/// Immutable value type; construction does not validate ranges, use
/// [`Coordinate::try_new`] when the values come from an external source.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees (-90 to 90)
    pub latitude: f64,
    /// Longitude in degrees (-180 to 180)
    pub longitude: f64,
}

impl Coordinate {
    /// Creates a new coordinate.
    #[inline]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Creates a coordinate, rejecting out-of-range values.
    pub fn try_new(latitude: f64, longitude: f64) -> Result<Self> {
        let coord = Self::new(latitude, longitude);
        if coord.is_valid() {
            Ok(coord)
        } else {
            Err(GeoError::InvalidCoordinate(format!(
                "({latitude}, {longitude}) is outside valid ranges"
            )))
        }
    }

    /// Returns true if the coordinate has valid values.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.latitude >= -90.0
            && self.latitude <= 90.0
            && self.longitude >= -180.0
            && self.longitude <= 180.0
    }

    /// Converts degrees to radians for internal calculations.
    #[inline]
    pub(crate) fn to_radians(&self) -> (f64, f64) {
        (self.latitude.to_radians(), self.longitude.to_radians())
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_creation() {
        let coord = Coordinate::new(-23.5505, -46.6333);
        assert_eq!(coord.latitude, -23.5505);
        assert_eq!(coord.longitude, -46.6333);
    }

    #[test]
    fn test_coordinate_validation() {
        assert!(Coordinate::new(0.0, 0.0).is_valid());
        assert!(Coordinate::new(90.0, 180.0).is_valid());
        assert!(Coordinate::new(-90.0, -180.0).is_valid());
        assert!(!Coordinate::new(91.0, 0.0).is_valid());
        assert!(!Coordinate::new(0.0, 181.0).is_valid());
    }

    #[test]
    fn test_try_new_rejects_out_of_range() {
        assert!(Coordinate::try_new(-23.5505, -46.6333).is_ok());
        assert!(Coordinate::try_new(120.0, 0.0).is_err());
    }

    #[test]
    fn test_coordinate_from_tuple() {
        let coord: Coordinate = (-23.5505, -46.6333).into();
        assert_eq!(coord.latitude, -23.5505);
    }

    #[test]
    fn test_display_is_lat_comma_lng() {
        let coord = Coordinate::new(-23.5, -46.6);
        assert_eq!(coord.to_string(), "-23.5,-46.6");
    }
}
