//! Core domain types: facilities, user location, and proximity estimates.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use carefind_geo::Coordinate;
use serde::{Deserialize, Serialize};

/// A care facility as served by the directory provider.
///
/// Immutable once fetched within a computation cycle. The photo payload is
/// pass-through: decoded to a displayable data URL at ingestion and never
/// inspected afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Facility {
    pub id: i64,
    pub name: String,
    pub coordinate: Coordinate,
    /// Current wait time reported by the facility, in minutes
    #[serde(rename = "waitTimeMinutes")]
    pub wait_time_minutes: u32,
    pub street: String,
    pub district: String,
    pub city: String,
    pub region: String,
    /// Opaque photo payload as a `data:image/jpeg;base64,` URL, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

impl Facility {
    /// Joins the non-empty address parts with ", " for display.
    pub fn full_address(&self) -> String {
        [&self.street, &self.district, &self.city, &self.region]
            .iter()
            .map(|part| part.trim())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Converts a raw photo payload (byte buffer) into a base64 data URL.
///
/// The directory backend serves photos either as a serialized byte buffer or
/// as an already-encoded string; callers pass strings through unchanged and
/// route buffers here. Assumes JPEG, matching the backend.
pub fn photo_data_url(bytes: &[u8]) -> String {
    format!("data:image/jpeg;base64,{}", BASE64.encode(bytes))
}

/// The user's resolved position for one session.
///
/// Produced by the location resolver; replaced wholesale on re-resolution,
/// never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserLocation {
    pub coordinate: Coordinate,
    /// The geocoder's normalized formatted address, when the location came
    /// from a manual address rather than the device
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_address: Option<String>,
}

impl UserLocation {
    /// A location resolved from the device's own position.
    pub fn from_device(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            source_address: None,
        }
    }

    /// A location resolved by geocoding a manual address.
    pub fn from_address(coordinate: Coordinate, formatted: impl Into<String>) -> Self {
        Self {
            coordinate,
            source_address: Some(formatted.into()),
        }
    }
}

/// How the user's position should be obtained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LocationSource {
    /// Geocode a saved manual address
    ManualAddress(String),
    /// Query the device's geolocation
    CurrentDevicePosition,
}

/// The active search radius plus the location preference behind it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadiusConfig {
    /// Search radius in kilometers (> 0)
    pub kilometers: u32,
    pub source: LocationSource,
}

/// A facility annotated with the best available distance information.
///
/// Derived, recomputed every cycle, never persisted. `straight_line_km` is
/// always present for any estimate that survived the pre-filter; the route
/// fields are present only when an enrichment call succeeded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProximityEstimate {
    pub facility: Facility,
    /// Great-circle distance from the user's position, in kilometers
    #[serde(rename = "straightLineKm")]
    pub straight_line_km: f64,
    /// Road distance from the routing provider, in kilometers
    #[serde(rename = "routeKm", skip_serializing_if = "Option::is_none")]
    pub route_km: Option<f64>,
    /// Driving time from the routing provider, in whole minutes (rounded up)
    #[serde(rename = "routeMinutes", skip_serializing_if = "Option::is_none")]
    pub route_minutes: Option<u32>,
}

impl ProximityEstimate {
    /// A fresh estimate carrying only the straight-line distance.
    pub fn straight_line(facility: Facility, straight_line_km: f64) -> Self {
        Self {
            facility,
            straight_line_km,
            route_km: None,
            route_minutes: None,
        }
    }

    /// The distance used for filtering and ranking: the routed distance when
    /// known, otherwise the straight-line distance.
    #[inline]
    pub fn effective_km(&self) -> f64 {
        self.route_km.unwrap_or(self.straight_line_km)
    }
}

/// The published ranking: estimates filtered to the active radius, ordered by
/// effective distance with wait time breaking ties.
pub type RankedResult = Vec<ProximityEstimate>;

#[cfg(test)]
mod tests {
    use super::*;

    fn facility(street: &str, district: &str, city: &str, region: &str) -> Facility {
        Facility {
            id: 1,
            name: "General Hospital".to_string(),
            coordinate: Coordinate::new(-23.55, -46.63),
            wait_time_minutes: 30,
            street: street.to_string(),
            district: district.to_string(),
            city: city.to_string(),
            region: region.to_string(),
            photo: None,
        }
    }

    #[test]
    fn test_full_address_skips_empty_parts() {
        let f = facility("Av. Paulista 100", "", "São Paulo", "SP");
        assert_eq!(f.full_address(), "Av. Paulista 100, São Paulo, SP");
    }

    #[test]
    fn test_full_address_all_empty() {
        let f = facility("", " ", "", "");
        assert_eq!(f.full_address(), "");
    }

    #[test]
    fn test_photo_data_url() {
        let url = photo_data_url(&[255, 216, 255]);
        assert!(url.starts_with("data:image/jpeg;base64,"));
        assert!(url.len() > "data:image/jpeg;base64,".len());
    }

    #[test]
    fn test_effective_km_prefers_route() {
        let mut estimate = ProximityEstimate::straight_line(facility("a", "b", "c", "d"), 5.0);
        assert_eq!(estimate.effective_km(), 5.0);

        estimate.route_km = Some(7.2);
        assert_eq!(estimate.effective_km(), 7.2);
    }

    #[test]
    fn test_user_location_constructors() {
        let device = UserLocation::from_device(Coordinate::new(1.0, 2.0));
        assert!(device.source_address.is_none());

        let manual = UserLocation::from_address(Coordinate::new(1.0, 2.0), "Av. Paulista, SP");
        assert_eq!(manual.source_address.as_deref(), Some("Av. Paulista, SP"));
    }
}
