//! Location resolution.
//!
//! Turns a saved location preference into concrete coordinates, either by
//! geocoding a manual address or by querying the device position.

use crate::error::LocationError;
use carefind_core::config::SavedSettings;
use carefind_core::model::{LocationSource, UserLocation};
use carefind_providers::{GeocodingProvider, PositionOptions, PositionProvider};
use tracing::{info, warn};

/// Resolves a [`LocationSource`] to a [`UserLocation`].
#[derive(Debug)]
pub struct LocationResolver<G, P> {
    geocoding: G,
    position: P,
    options: PositionOptions,
}

impl<G: GeocodingProvider, P: PositionProvider> LocationResolver<G, P> {
    pub fn new(geocoding: G, position: P) -> Self {
        Self {
            geocoding,
            position,
            options: PositionOptions::default(),
        }
    }

    /// Overrides the device position options (accuracy, timeout).
    pub fn with_position_options(mut self, options: PositionOptions) -> Self {
        self.options = options;
        self
    }

    /// Resolves a single location source.
    pub async fn resolve(&self, source: &LocationSource) -> Result<UserLocation, LocationError> {
        match source {
            LocationSource::ManualAddress(address) => {
                let geocoded = self.geocoding.geocode(address).await?;
                info!(address = %geocoded.formatted_address, "Resolved manual address");
                Ok(UserLocation::from_address(
                    geocoded.coordinate,
                    geocoded.formatted_address,
                ))
            }
            LocationSource::CurrentDevicePosition => {
                self.position.ensure_permission().await?;
                let coordinate = self.position.current_position(&self.options).await?;
                info!(%coordinate, "Resolved device position");
                Ok(UserLocation::from_device(coordinate))
            }
        }
    }

    /// Resolves the preference expressed by the saved settings, trying the
    /// alternate branch when the preferred one fails.
    ///
    /// A failed manual address falls back to the device position; a failed
    /// device position falls back to a saved address, if one exists. When
    /// both branches fail, the preferred branch's error is surfaced as the
    /// more actionable one. Settings with no usable preference go straight
    /// to the device branch.
    pub async fn resolve_from_settings(
        &self,
        settings: &SavedSettings,
    ) -> Result<UserLocation, LocationError> {
        let preferred = match settings.location_source() {
            Some(source) => source,
            None => {
                // Nothing saved: the device is the only candidate, and a
                // failure there means there is no configuration to act on
                return self
                    .resolve(&LocationSource::CurrentDevicePosition)
                    .await
                    .map_err(|_| LocationError::NoConfiguration);
            }
        };

        let preferred_error = match self.resolve(&preferred).await {
            Ok(location) => return Ok(location),
            Err(error) => error,
        };

        let alternate = match &preferred {
            LocationSource::ManualAddress(_) => Some(LocationSource::CurrentDevicePosition),
            LocationSource::CurrentDevicePosition => settings
                .manual_address()
                .map(|addr| LocationSource::ManualAddress(addr.to_string())),
        };

        match alternate {
            Some(alternate) => {
                warn!(%preferred_error, "Preferred location failed, trying the alternate");
                match self.resolve(&alternate).await {
                    Ok(location) => Ok(location),
                    Err(_) => Err(preferred_error),
                }
            }
            None => Err(preferred_error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carefind_geo::Coordinate;
    use carefind_providers::{
        GeocodeStatus, GeocodedAddress, GeocodingError, StaticPositionProvider,
    };

    /// Geocoder fake returning a fixed outcome.
    struct FakeGeocoder {
        outcome: Result<(f64, f64, &'static str), GeocodeStatus>,
    }

    impl GeocodingProvider for FakeGeocoder {
        async fn geocode(&self, _address: &str) -> Result<GeocodedAddress, GeocodingError> {
            match &self.outcome {
                Ok((lat, lng, formatted)) => Ok(GeocodedAddress {
                    coordinate: Coordinate::new(*lat, *lng),
                    formatted_address: formatted.to_string(),
                }),
                Err(status) => Err(GeocodingError::Status(status.clone())),
            }
        }
    }

    fn manual_settings(address: &str) -> SavedSettings {
        SavedSettings {
            radius_km: 10,
            manual_address: address.to_string(),
            use_current_position: "false".to_string(),
        }
    }

    #[tokio::test]
    async fn test_manual_address_resolution() {
        let resolver = LocationResolver::new(
            FakeGeocoder {
                outcome: Ok((-23.55, -46.63, "Av. Paulista 1000, São Paulo")),
            },
            StaticPositionProvider::unavailable(),
        );

        let location = resolver
            .resolve(&LocationSource::ManualAddress("paulista 1000".to_string()))
            .await
            .unwrap();
        assert_eq!(location.coordinate, Coordinate::new(-23.55, -46.63));
        assert_eq!(
            location.source_address.as_deref(),
            Some("Av. Paulista 1000, São Paulo")
        );
    }

    #[tokio::test]
    async fn test_device_resolution() {
        let resolver = LocationResolver::new(
            FakeGeocoder {
                outcome: Err(GeocodeStatus::ZeroResults),
            },
            StaticPositionProvider::at(Coordinate::new(-23.5, -46.6)),
        );

        let location = resolver
            .resolve(&LocationSource::CurrentDevicePosition)
            .await
            .unwrap();
        assert!(location.source_address.is_none());
        assert_eq!(location.coordinate, Coordinate::new(-23.5, -46.6));
    }

    #[tokio::test]
    async fn test_falls_back_to_device_when_geocoding_fails() {
        let resolver = LocationResolver::new(
            FakeGeocoder {
                outcome: Err(GeocodeStatus::ZeroResults),
            },
            StaticPositionProvider::at(Coordinate::new(1.0, 2.0)),
        );

        let location = resolver
            .resolve_from_settings(&manual_settings("nowhere at all"))
            .await
            .unwrap();
        assert_eq!(location.coordinate, Coordinate::new(1.0, 2.0));
    }

    #[tokio::test]
    async fn test_preferred_error_surfaces_when_both_fail() {
        let resolver = LocationResolver::new(
            FakeGeocoder {
                outcome: Err(GeocodeStatus::ZeroResults),
            },
            StaticPositionProvider::unavailable(),
        );

        let error = resolver
            .resolve_from_settings(&manual_settings("nowhere at all"))
            .await
            .unwrap_err();
        assert!(matches!(
            error,
            LocationError::GeocodingFailed(GeocodeStatus::ZeroResults)
        ));
    }

    #[tokio::test]
    async fn test_failed_device_falls_back_to_saved_address() {
        let resolver = LocationResolver::new(
            FakeGeocoder {
                outcome: Ok((-23.55, -46.63, "Av. Paulista 1000, São Paulo")),
            },
            StaticPositionProvider::unavailable(),
        );

        let settings = SavedSettings {
            radius_km: 10,
            manual_address: "paulista 1000".to_string(),
            use_current_position: "true".to_string(),
        };
        let location = resolver.resolve_from_settings(&settings).await.unwrap();
        assert_eq!(location.coordinate, Coordinate::new(-23.55, -46.63));
    }

    #[tokio::test]
    async fn test_no_preference_uses_device() {
        let resolver = LocationResolver::new(
            FakeGeocoder {
                outcome: Err(GeocodeStatus::ZeroResults),
            },
            StaticPositionProvider::at(Coordinate::new(3.0, 4.0)),
        );

        let location = resolver
            .resolve_from_settings(&SavedSettings::default())
            .await
            .unwrap();
        assert_eq!(location.coordinate, Coordinate::new(3.0, 4.0));
    }

    #[tokio::test]
    async fn test_no_preference_and_no_device_position() {
        let resolver = LocationResolver::new(
            FakeGeocoder {
                outcome: Err(GeocodeStatus::ZeroResults),
            },
            StaticPositionProvider::unavailable(),
        );

        let error = resolver
            .resolve_from_settings(&SavedSettings::default())
            .await
            .unwrap_err();
        assert!(matches!(error, LocationError::NoConfiguration));
    }
}
