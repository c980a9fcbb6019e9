//! HTTP client and upstream provider integrations for Carefind.
//!
//! This crate covers everything the proximity pipeline treats as an
//! external collaborator:
//! - The facility directory (`GET /facilities`)
//! - The routing provider (driving distance/time per facility)
//! - The geocoding provider (manual address → coordinates, and reverse)
//! - Device geolocation, behind the [`PositionProvider`] seam
//!
//! The HTTP types all ride on [`FinderClient`], a `reqwest` wrapper with
//! request correlation IDs, timeouts, and retry for idempotent fetches.

mod client;
mod config;
mod directory;
mod error;
mod geocoding;
mod position;
mod routing;
mod traits;

pub use client::FinderClient;
pub use config::{ClientConfig, Environment};
pub use directory::DirectoryApi;
pub use error::{
    ApiError, DirectoryError, GeocodeStatus, GeocodingError, PositionError, RoutingError,
};
pub use geocoding::{GeocodedAddress, GeocodingApi};
pub use position::{PositionOptions, StaticPositionProvider};
pub use routing::{RouteLeg, RoutingApi};
pub use traits::{DirectoryProvider, GeocodingProvider, PositionProvider, RoutingProvider};
