//! Geocoding endpoint.
//!
//! Forward geocoding turns a manual address into coordinates plus the
//! provider's normalized formatted address; reverse geocoding turns a
//! coordinate back into a formatted address for display. Both answer with a
//! status string from a known taxonomy.

use crate::client::FinderClient;
use crate::error::{ApiError, GeocodeStatus, GeocodingError};
use crate::traits::GeocodingProvider;
use carefind_geo::Coordinate;
use serde::{Deserialize, Serialize};

/// Geocoding provider interface.
#[derive(Clone)]
pub struct GeocodingApi {
    client: FinderClient,
}

impl GeocodingApi {
    pub(crate) fn new(client: FinderClient) -> Self {
        Self { client }
    }

    /// Geocode an address, applying the configured country hint.
    pub async fn geocode_address(&self, address: &str) -> Result<GeocodedAddress, GeocodingError> {
        let config = self.client.config();
        let mut url = format!(
            "{}?address={}",
            config.geocoding_url,
            urlencode(address)
        );
        if let Some(ref region) = config.region {
            url.push_str(&format!("&country={region}"));
        }
        self.request(&url).await
    }

    /// Reverse geocode a coordinate into a formatted address.
    pub async fn reverse(&self, coordinate: Coordinate) -> Result<GeocodedAddress, GeocodingError> {
        let url = format!(
            "{}?latlng={}",
            self.client.config().geocoding_url,
            coordinate
        );
        self.request(&url).await
    }

    async fn request(&self, url: &str) -> Result<GeocodedAddress, GeocodingError> {
        let response: GeocodeResponse = self.client.get_once(url).await.map_err(map_api_error)?;
        first_result(response)
    }
}

/// Map a provider response to its first result, forward and reverse alike.
fn first_result(response: GeocodeResponse) -> Result<GeocodedAddress, GeocodingError> {
    if response.status != "OK" {
        return Err(GeocodingError::Status(GeocodeStatus::from_provider(
            &response.status,
        )));
    }

    let result = response
        .results
        .into_iter()
        .next()
        .ok_or(GeocodingError::Status(GeocodeStatus::ZeroResults))?;

    Ok(GeocodedAddress {
        coordinate: Coordinate::new(result.geometry.location.lat, result.geometry.location.lng),
        formatted_address: result.formatted_address,
    })
}

fn map_api_error(e: ApiError) -> GeocodingError {
    if e.is_transport() {
        GeocodingError::Unavailable(e.to_string())
    } else {
        GeocodingError::Status(GeocodeStatus::Other(e.to_string()))
    }
}

impl GeocodingProvider for GeocodingApi {
    async fn geocode(&self, address: &str) -> Result<GeocodedAddress, GeocodingError> {
        self.geocode_address(address).await
    }
}

/// A successful geocoding result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeocodedAddress {
    pub coordinate: Coordinate,
    /// The provider's normalized formatted address
    pub formatted_address: String,
}

/// Minimal percent-encoding for the address query parameter.
fn urlencode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char)
            }
            b' ' => out.push('+'),
            _ => out.push_str(&format!("%{b:02X}")),
        }
    }
    out
}

// ============================================================================
// Raw wire types
// ============================================================================

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<RawGeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct RawGeocodeResult {
    formatted_address: String,
    geometry: RawGeometry,
}

#[derive(Debug, Deserialize)]
struct RawGeometry {
    location: RawLocation,
}

#[derive(Debug, Deserialize)]
struct RawLocation {
    lat: f64,
    lng: f64,
}
