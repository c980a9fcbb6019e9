//! Device geolocation.
//!
//! Geolocation is platform-specific, so this crate only defines the seam
//! ([`crate::PositionProvider`]) plus a fixed-coordinate implementation for
//! headless use (the CLI, integration tests, CI).

use crate::error::PositionError;
use crate::traits::PositionProvider;
use carefind_geo::Coordinate;
use std::time::Duration;

/// Options for a position request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionOptions {
    /// Ask the device for its best fix rather than a cached coarse one
    pub high_accuracy: bool,
    /// How long to wait for a fix
    pub timeout: Duration,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            timeout: Duration::from_secs(10),
        }
    }
}

/// A position provider that always answers with a fixed coordinate.
///
/// Construct with `None` to model a device without a position source.
#[derive(Debug, Clone, Default)]
pub struct StaticPositionProvider {
    coordinate: Option<Coordinate>,
}

impl StaticPositionProvider {
    /// Provider that reports the given coordinate.
    pub fn at(coordinate: Coordinate) -> Self {
        Self {
            coordinate: Some(coordinate),
        }
    }

    /// Provider with no position available.
    pub fn unavailable() -> Self {
        Self { coordinate: None }
    }
}

impl PositionProvider for StaticPositionProvider {
    async fn ensure_permission(&self) -> Result<(), PositionError> {
        Ok(())
    }

    async fn current_position(
        &self,
        _options: &PositionOptions,
    ) -> Result<Coordinate, PositionError> {
        self.coordinate.ok_or(PositionError::PositionUnavailable)
    }
}
