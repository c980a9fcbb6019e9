//! Provider seams.
//!
//! The pipeline is generic over these traits; the HTTP types in this crate
//! implement them, and tests substitute fakes.

use crate::error::{DirectoryError, GeocodingError, PositionError, RoutingError};
use crate::geocoding::GeocodedAddress;
use crate::position::PositionOptions;
use crate::routing::RouteLeg;
use carefind_core::model::Facility;
use carefind_geo::Coordinate;

/// Source of the facility directory.
#[allow(async_fn_in_trait)]
pub trait DirectoryProvider {
    /// Fetch every facility. Failure is fatal for the calling cycle.
    async fn fetch_facilities(&self) -> Result<Vec<Facility>, DirectoryError>;
}

/// Source of driving routes.
#[allow(async_fn_in_trait)]
pub trait RoutingProvider {
    /// Request one driving route. Failures are per-call; callers degrade the
    /// affected estimate rather than aborting.
    async fn route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<RouteLeg, RoutingError>;
}

/// Source of geocoded addresses.
#[allow(async_fn_in_trait)]
pub trait GeocodingProvider {
    /// Geocode a manual address into coordinates plus a formatted address.
    async fn geocode(&self, address: &str) -> Result<GeocodedAddress, GeocodingError>;
}

/// Source of the device's own position.
#[allow(async_fn_in_trait)]
pub trait PositionProvider {
    /// Check the location permission, requesting it if not yet granted.
    async fn ensure_permission(&self) -> Result<(), PositionError>;

    /// Query the current position.
    async fn current_position(
        &self,
        options: &PositionOptions,
    ) -> Result<Coordinate, PositionError>;
}
