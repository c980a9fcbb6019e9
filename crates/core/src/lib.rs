//! Domain model, persisted settings, and retry policy for Carefind.
//!
//! This crate holds the types shared across the workspace:
//! - The facility/estimate/ranking model
//! - The persisted user settings (search radius and location preference)
//! - Retry configuration used by the HTTP providers

pub mod config;
pub mod error;
pub mod model;
pub mod retry;

pub use config::{SavedSettings, SettingsStore, DEFAULT_RADIUS_KM};
pub use error::{ConfigError, Result};
pub use model::{
    Facility, LocationSource, ProximityEstimate, RadiusConfig, RankedResult, UserLocation,
};
