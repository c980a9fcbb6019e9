//! Persisted user settings.
//!
//! The settings flow (an external concern) writes a small JSON record with
//! the search radius and the location preference; this crate only reads and
//! rewrites it. The schema keeps the backend's quirk of storing the
//! "use current position" flag as a boolean-valued string and the manual
//! address as either an address or the literal `"false"`.

use crate::error::{ConfigError, Result};
use crate::model::LocationSource;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Radius applied when no explicit radius has been saved yet.
pub const DEFAULT_RADIUS_KM: u32 = 10;

/// The persisted settings record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedSettings {
    /// Search radius in kilometers
    #[serde(rename = "radiusKm", default = "default_radius")]
    pub radius_km: u32,
    /// Manual address, or the literal "false" when unset
    #[serde(rename = "manualAddress", default = "literal_false")]
    pub manual_address: String,
    /// "true" when the device position should be used
    #[serde(rename = "useCurrentPosition", default = "literal_false")]
    pub use_current_position: String,
}

fn default_radius() -> u32 {
    DEFAULT_RADIUS_KM
}

fn literal_false() -> String {
    "false".to_string()
}

impl Default for SavedSettings {
    fn default() -> Self {
        Self {
            radius_km: DEFAULT_RADIUS_KM,
            manual_address: literal_false(),
            use_current_position: literal_false(),
        }
    }
}

impl SavedSettings {
    /// True when the saved flag selects the device position.
    pub fn wants_device_position(&self) -> bool {
        self.use_current_position == "true"
    }

    /// The saved manual address, if one is actually set.
    pub fn manual_address(&self) -> Option<&str> {
        let trimmed = self.manual_address.trim();
        if trimmed.is_empty() || trimmed == "false" {
            None
        } else {
            Some(trimmed)
        }
    }

    /// The location preference these settings express, if any.
    ///
    /// The device-position flag wins over a saved address, matching the
    /// settings flow that clears one when the other is chosen.
    pub fn location_source(&self) -> Option<LocationSource> {
        if self.wants_device_position() {
            Some(LocationSource::CurrentDevicePosition)
        } else {
            self.manual_address()
                .map(|addr| LocationSource::ManualAddress(addr.to_string()))
        }
    }

    /// Validates the record beyond what the schema enforces.
    pub fn validate(&self) -> Result<()> {
        if self.radius_km == 0 {
            return Err(ConfigError::Malformed(
                "radiusKm must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Reads and writes the settings file.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// Store at the default per-user location
    /// (`<config dir>/carefind/settings.json`).
    pub fn new() -> Result<Self> {
        let base = dirs::config_dir().ok_or_else(|| {
            ConfigError::Malformed("no user configuration directory available".to_string())
        })?;
        Ok(Self::at(base.join("carefind").join("settings.json")))
    }

    /// Store at an explicit path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file path this store reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True when a settings file exists and parses with a usable location
    /// preference.
    pub fn has_saved_settings(&self) -> bool {
        self.load()
            .map(|s| s.location_source().is_some())
            .unwrap_or(false)
    }

    /// Loads and validates the settings file.
    pub fn load(&self) -> Result<SavedSettings> {
        if !self.path.exists() {
            return Err(ConfigError::Missing);
        }
        let content = std::fs::read_to_string(&self.path)?;
        let settings: SavedSettings = serde_json::from_str(&content)
            .map_err(|e| ConfigError::Malformed(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Writes the settings file, creating parent directories as needed.
    pub fn save(&self, settings: &SavedSettings) -> Result<()> {
        settings.validate()?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(settings)
            .map_err(|e| ConfigError::Malformed(e.to_string()))?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    /// Persists a new radius, keeping the rest of the record intact.
    ///
    /// Falls back to defaults when nothing has been saved yet, so a radius
    /// change before initial configuration still round-trips.
    pub fn set_radius(&self, radius_km: u32) -> Result<()> {
        let mut settings = match self.load() {
            Ok(s) => s,
            Err(ConfigError::Missing) => SavedSettings::default(),
            Err(e) => return Err(e),
        };
        settings.radius_km = radius_km;
        self.save(&settings)
    }
}
