//! Routing (directions) endpoint.
//!
//! One call per enriched facility: origin and destination coordinates,
//! driving mode, metric units, optional region hint. The provider answers
//! with a status string and a list of routes; only the first leg of the
//! first route is consumed.

use crate::client::FinderClient;
use crate::error::{ApiError, RoutingError};
use crate::traits::RoutingProvider;
use carefind_geo::Coordinate;
use serde::Deserialize;

/// Routing provider interface.
#[derive(Clone)]
pub struct RoutingApi {
    client: FinderClient,
}

impl RoutingApi {
    pub(crate) fn new(client: FinderClient) -> Self {
        Self { client }
    }

    /// Request a driving route from `origin` to `destination`.
    ///
    /// Single attempt, no retry: a failed call degrades the one estimate it
    /// belongs to, it never multiplies provider load.
    pub async fn driving_route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<RouteLeg, RoutingError> {
        let config = self.client.config();
        let mut url = format!(
            "{}?origin={}&destination={}&mode=driving&units=metric",
            config.routing_url, origin, destination
        );
        if let Some(ref region) = config.region {
            url.push_str(&format!("&region={region}"));
        }

        let response: DirectionsResponse =
            self.client.get_once(&url).await.map_err(map_api_error)?;

        if response.status != "OK" {
            return Err(RoutingError::Status(response.status));
        }

        response
            .routes
            .into_iter()
            .next()
            .and_then(|route| route.legs.into_iter().next())
            .map(|leg| RouteLeg {
                distance_meters: leg.distance.value,
                duration_seconds: leg.duration.value,
            })
            .ok_or_else(|| RoutingError::Decode("response contains no route legs".to_string()))
    }
}

fn map_api_error(e: ApiError) -> RoutingError {
    if e.is_transport() {
        RoutingError::Unavailable(e.to_string())
    } else {
        RoutingError::Status(e.to_string())
    }
}

impl RoutingProvider for RoutingApi {
    async fn route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<RouteLeg, RoutingError> {
        self.driving_route(origin, destination).await
    }
}

/// One leg of a returned route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteLeg {
    /// Road distance in meters
    pub distance_meters: f64,
    /// Driving time in seconds
    pub duration_seconds: f64,
}

impl RouteLeg {
    /// Road distance in kilometers.
    #[inline]
    pub fn kilometers(&self) -> f64 {
        self.distance_meters / 1000.0
    }

    /// Driving time in whole minutes, rounded up.
    #[inline]
    pub fn minutes(&self) -> u32 {
        (self.duration_seconds / 60.0).ceil() as u32
    }
}

// ============================================================================
// Raw wire types
// ============================================================================

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    status: String,
    #[serde(default)]
    routes: Vec<RawRoute>,
}

#[derive(Debug, Deserialize)]
struct RawRoute {
    legs: Vec<RawLeg>,
}

#[derive(Debug, Deserialize)]
struct RawLeg {
    distance: RawValue,
    duration: RawValue,
}

#[derive(Debug, Deserialize)]
struct RawValue {
    value: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leg_conversions() {
        let leg = RouteLeg {
            distance_meters: 12_345.0,
            duration_seconds: 610.0,
        };
        assert!((leg.kilometers() - 12.345).abs() < 1e-9);
        // 610 s = 10.17 min, rounded up
        assert_eq!(leg.minutes(), 11);
    }

    #[test]
    fn test_exact_minutes_do_not_round_up() {
        let leg = RouteLeg {
            distance_meters: 1000.0,
            duration_seconds: 600.0,
        };
        assert_eq!(leg.minutes(), 10);
    }

    #[test]
    fn test_directions_response_deserialize() {
        let json = r#"{
            "status": "OK",
            "routes": [{"legs": [{"distance": {"value": 8200.0}, "duration": {"value": 930.0}}]}]
        }"#;
        let response: DirectionsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.status, "OK");
        assert_eq!(response.routes[0].legs[0].distance.value, 8200.0);
    }

    #[test]
    fn test_failure_status_deserialize() {
        let json = r#"{"status": "NOT_FOUND"}"#;
        let response: DirectionsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.status, "NOT_FOUND");
        assert!(response.routes.is_empty());
    }
}
