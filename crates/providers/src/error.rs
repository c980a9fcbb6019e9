//! Error types for the provider integrations.
//!
//! The split mirrors how failures propagate through a computation cycle:
//! `DirectoryError` is fatal for the cycle, `RoutingError` degrades a single
//! estimate, `GeocodingError` and `PositionError` abort location resolution.

use std::time::Duration;
use thiserror::Error;

/// Transport-level errors shared by every HTTP provider.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// API returned a non-success response
    #[error("API error ({status}): {message}")]
    ApiResponse {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// All retry attempts exhausted
    #[error("All {attempts} retry attempts failed: {last_error}")]
    RetriesExhausted {
        /// Number of attempts made
        attempts: u32,
        /// Last error message
        last_error: String,
    },
}

impl ApiError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an API response error.
    pub fn api_response(status: u16, message: impl Into<String>) -> Self {
        Self::ApiResponse {
            status,
            message: message.into(),
        }
    }

    /// Check if this error is retryable.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Request(e) => e.is_connect() || e.is_timeout(),
            Self::ApiResponse { status, .. } => *status >= 500 || *status == 429,
            Self::Config(_) | Self::RetriesExhausted { .. } => false,
        }
    }

    /// Check if the provider could not be reached at all (connect/timeout
    /// class), as opposed to answering with a failure.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        match self {
            Self::Request(e) => e.is_connect() || e.is_timeout(),
            _ => false,
        }
    }
}

/// Facility directory fetch failures. Fatal for the current cycle.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// Transport or response failure
    #[error("Failed to fetch the facility directory: {0}")]
    Fetch(#[from] ApiError),

    /// The directory answered but the payload could not be decoded
    #[error("Failed to decode facility directory response: {0}")]
    Decode(String),
}

/// Per-call routing failures.
///
/// Only `Unavailable` ever escalates beyond one estimate; every other
/// variant degrades that facility to its straight-line distance.
#[derive(Debug, Error)]
pub enum RoutingError {
    /// The routing provider could not be reached
    #[error("Routing provider unreachable: {0}")]
    Unavailable(String),

    /// The provider answered with a failure status for this request
    #[error("Routing request failed with status {0}")]
    Status(String),

    /// The provider answered but the payload could not be decoded
    #[error("Failed to decode routing response: {0}")]
    Decode(String),
}

impl RoutingError {
    /// True when the provider itself was unreachable rather than refusing
    /// one request.
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

/// Geocoding status taxonomy, as reported by the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeocodeStatus {
    /// No match for the address
    ZeroResults,
    /// Provider quota exceeded
    OverQuota,
    /// The provider refused the request
    RequestDenied,
    /// The request itself was malformed
    InvalidRequest,
    /// Any other provider-reported status
    Other(String),
}

impl GeocodeStatus {
    /// Map a provider status string onto the taxonomy.
    pub fn from_provider(status: &str) -> Self {
        match status {
            "ZERO_RESULTS" => Self::ZeroResults,
            "OVER_QUERY_LIMIT" => Self::OverQuota,
            "REQUEST_DENIED" => Self::RequestDenied,
            "INVALID_REQUEST" => Self::InvalidRequest,
            other => Self::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for GeocodeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroResults => write!(f, "Address not found. Check that it is correct."),
            Self::OverQuota => write!(f, "Geocoding quota exceeded. Try again later."),
            Self::RequestDenied => write!(f, "The geocoding service denied the request."),
            Self::InvalidRequest => write!(f, "Invalid address. Check the data entered."),
            Self::Other(status) => write!(f, "Failed to process address: {status}"),
        }
    }
}

/// Geocoding failures.
#[derive(Debug, Error)]
pub enum GeocodingError {
    /// The geocoding provider could not be reached
    #[error("Geocoding provider unreachable: {0}")]
    Unavailable(String),

    /// The provider answered with a non-OK status
    #[error("{0}")]
    Status(GeocodeStatus),

    /// The provider answered but the payload could not be decoded
    #[error("Failed to decode geocoding response: {0}")]
    Decode(String),
}

/// Device geolocation failures.
#[derive(Debug, Error)]
pub enum PositionError {
    /// The user denied the location permission
    #[error("Location permission denied. Enable it in your device settings.")]
    PermissionDenied,

    /// The device could not produce a position
    #[error("Location unavailable. Check that GPS is enabled.")]
    PositionUnavailable,

    /// The position request timed out
    #[error("Timed out obtaining location after {0:?}. Try again.")]
    Timeout(Duration),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geocode_status_mapping() {
        assert_eq!(
            GeocodeStatus::from_provider("ZERO_RESULTS"),
            GeocodeStatus::ZeroResults
        );
        assert_eq!(
            GeocodeStatus::from_provider("OVER_QUERY_LIMIT"),
            GeocodeStatus::OverQuota
        );
        assert_eq!(
            GeocodeStatus::from_provider("REQUEST_DENIED"),
            GeocodeStatus::RequestDenied
        );
        assert_eq!(
            GeocodeStatus::from_provider("INVALID_REQUEST"),
            GeocodeStatus::InvalidRequest
        );
        assert_eq!(
            GeocodeStatus::from_provider("UNKNOWN_ERROR"),
            GeocodeStatus::Other("UNKNOWN_ERROR".to_string())
        );
    }

    #[test]
    fn test_api_response_retryable() {
        assert!(ApiError::api_response(503, "unavailable").is_retryable());
        assert!(ApiError::api_response(429, "slow down").is_retryable());
        assert!(!ApiError::api_response(404, "not found").is_retryable());
        assert!(!ApiError::api_response(400, "bad request").is_retryable());
    }

    #[test]
    fn test_api_response_is_not_transport() {
        assert!(!ApiError::api_response(503, "unavailable").is_transport());
        assert!(!ApiError::config("bad url").is_transport());
    }

    #[test]
    fn test_routing_unavailable_flag() {
        assert!(RoutingError::Unavailable("refused".to_string()).is_unavailable());
        assert!(!RoutingError::Status("NOT_FOUND".to_string()).is_unavailable());
    }
}
