//! Error types for persisted configuration.

use thiserror::Error;

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors reading or writing the persisted settings.
///
/// These surface to the caller before any resolution attempt; a cycle never
/// starts from a missing or malformed settings file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No settings file has been written yet
    #[error("No saved settings found. Run the initial configuration first.")]
    Missing,

    /// The settings file exists but cannot be parsed or fails validation
    #[error("Saved settings are malformed: {0}")]
    Malformed(String),

    /// Filesystem error reading or writing the settings file
    #[error("Failed to access settings: {0}")]
    Io(#[from] std::io::Error),
}
