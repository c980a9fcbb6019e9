//! Error types for the pipeline.

use carefind_core::error::ConfigError;
use carefind_providers::{DirectoryError, GeocodeStatus, GeocodingError, PositionError, RoutingError};
use thiserror::Error;

/// Location resolution failures.
///
/// Any of these aborts the current cycle; the previously published ranking
/// stays in place.
#[derive(Debug, Error)]
pub enum LocationError {
    /// The user denied the location permission
    #[error("Location permission denied. Enable it in your device settings.")]
    PermissionDenied,

    /// The device could not produce a position
    #[error("Location unavailable. Check that GPS is enabled.")]
    PositionUnavailable,

    /// The position request timed out
    #[error("Timed out obtaining location. Try again.")]
    Timeout,

    /// The manual address could not be geocoded
    #[error("{0}")]
    GeocodingFailed(GeocodeStatus),

    /// No usable location preference is saved
    #[error("No valid location configuration found")]
    NoConfiguration,
}

impl From<PositionError> for LocationError {
    fn from(e: PositionError) -> Self {
        match e {
            PositionError::PermissionDenied => Self::PermissionDenied,
            PositionError::PositionUnavailable => Self::PositionUnavailable,
            PositionError::Timeout(_) => Self::Timeout,
        }
    }
}

impl From<GeocodingError> for LocationError {
    fn from(e: GeocodingError) -> Self {
        match e {
            GeocodingError::Status(status) => Self::GeocodingFailed(status),
            GeocodingError::Unavailable(msg) | GeocodingError::Decode(msg) => {
                Self::GeocodingFailed(GeocodeStatus::Other(msg))
            }
        }
    }
}

/// Cycle-aborting pipeline failures.
///
/// Per-facility routing failures never appear here; only a routing provider
/// that was unreachable for the entire enrichment batch does.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Persisted settings missing or malformed
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Location resolution failed
    #[error(transparent)]
    Location(#[from] LocationError),

    /// The facility directory could not be fetched
    #[error(transparent)]
    Directory(#[from] DirectoryError),

    /// The routing provider was unreachable for the whole batch
    #[error(transparent)]
    Routing(#[from] RoutingError),
}
