//! Error types for the geo crate.

use thiserror::Error;

/// Result type alias for geo operations.
pub type Result<T> = std::result::Result<T, GeoError>;

/// Errors that can occur during geo operations.
#[derive(Debug, Error)]
pub enum GeoError {
    /// Coordinate values outside valid latitude/longitude ranges
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),
}
