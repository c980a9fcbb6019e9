//! Configuration for the provider client.
//!
//! Supports environment-based configuration with sensible defaults.

use crate::error::ApiError;
use carefind_core::retry::RetryConfig;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Default directory backend.
const DEFAULT_DIRECTORY_URL: &str = "https://api.carefind.dev";

/// Environment types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    Development,
    /// Staging environment
    Staging,
    /// Production environment
    Production,
}

impl Default for Environment {
    fn default() -> Self {
        Self::Production
    }
}

impl Environment {
    /// Parse from the `CAREFIND_ENV` environment variable.
    pub fn from_env() -> Self {
        match env::var("CAREFIND_ENV")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "development" | "dev" | "local" => Self::Development,
            "staging" | "stage" => Self::Staging,
            _ => Self::Production,
        }
    }
}

/// Client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the facility directory backend
    pub directory_url: String,
    /// Base URL of the routing (directions) provider
    pub routing_url: String,
    /// Base URL of the geocoding provider
    pub geocoding_url: String,
    /// API key forwarded to the routing/geocoding providers, if required
    pub api_key: Option<String>,
    /// Region hint for routing and country hint for geocoding (e.g. "br")
    pub region: Option<String>,
    /// Request timeout
    #[serde(with = "duration_secs")]
    pub timeout: Duration,
    /// Retry configuration for idempotent fetches
    pub retry: RetryConfig,
    /// Current environment
    pub environment: Environment,
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            directory_url: DEFAULT_DIRECTORY_URL.to_string(),
            routing_url: format!("{DEFAULT_DIRECTORY_URL}/directions"),
            geocoding_url: format!("{DEFAULT_DIRECTORY_URL}/geocode"),
            api_key: None,
            region: None,
            timeout: Duration::from_secs(30),
            retry: RetryConfig::default(),
            environment: Environment::default(),
        }
    }
}

impl ClientConfig {
    /// Create configuration from environment variables.
    ///
    /// Reads:
    /// - `CAREFIND_API_URL`: directory backend base URL
    /// - `CAREFIND_ROUTING_URL`: routing provider base URL
    /// - `CAREFIND_GEOCODING_URL`: geocoding provider base URL
    /// - `CAREFIND_API_KEY`: provider API key
    /// - `CAREFIND_REGION`: region/country hint
    /// - `CAREFIND_ENV`: environment (development/staging/production)
    /// - `CAREFIND_TIMEOUT_SECS`: request timeout in seconds
    pub fn from_env() -> Result<Self, ApiError> {
        let environment = Environment::from_env();

        let directory_url =
            env::var("CAREFIND_API_URL").unwrap_or_else(|_| DEFAULT_DIRECTORY_URL.to_string());

        let routing_url =
            env::var("CAREFIND_ROUTING_URL").unwrap_or_else(|_| format!("{directory_url}/directions"));

        let geocoding_url =
            env::var("CAREFIND_GEOCODING_URL").unwrap_or_else(|_| format!("{directory_url}/geocode"));

        let api_key = env::var("CAREFIND_API_KEY").ok();
        let region = env::var("CAREFIND_REGION").ok();

        let timeout = env::var("CAREFIND_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(30));

        let retry = match environment {
            Environment::Development => RetryConfig::quick(),
            Environment::Staging => RetryConfig::default(),
            Environment::Production => RetryConfig::patient(),
        };

        Ok(Self {
            directory_url,
            routing_url,
            geocoding_url,
            api_key,
            region,
            timeout,
            retry,
            environment,
        })
    }

    /// Create development configuration (local backends).
    #[must_use]
    pub fn development() -> Self {
        Self {
            directory_url: "http://localhost:3000".to_string(),
            routing_url: "http://localhost:3000/directions".to_string(),
            geocoding_url: "http://localhost:3000/geocode".to_string(),
            api_key: env::var("CAREFIND_API_KEY").ok(),
            region: None,
            timeout: Duration::from_secs(10),
            retry: RetryConfig::quick(),
            environment: Environment::Development,
        }
    }

    /// Builder-style method to set the directory URL.
    #[must_use]
    pub fn with_directory_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.routing_url = format!("{url}/directions");
        self.geocoding_url = format!("{url}/geocode");
        self.directory_url = url;
        self
    }

    /// Builder-style method to set the routing URL.
    #[must_use]
    pub fn with_routing_url(mut self, url: impl Into<String>) -> Self {
        self.routing_url = url.into();
        self
    }

    /// Builder-style method to set the geocoding URL.
    #[must_use]
    pub fn with_geocoding_url(mut self, url: impl Into<String>) -> Self {
        self.geocoding_url = url.into();
        self
    }

    /// Builder-style method to set the API key.
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Builder-style method to set the region hint.
    #[must_use]
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Builder-style method to set the timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builder-style method to set the retry config.
    #[must_use]
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ApiError> {
        for (name, url) in [
            ("directory_url", &self.directory_url),
            ("routing_url", &self.routing_url),
            ("geocoding_url", &self.geocoding_url),
        ] {
            if url.is_empty() {
                return Err(ApiError::config(format!("{name} cannot be empty")));
            }
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ApiError::config(format!(
                    "{name} must start with http:// or https://"
                )));
            }
        }

        if self.timeout.is_zero() {
            return Err(ApiError::config("timeout cannot be zero"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert!(config.routing_url.ends_with("/directions"));
        assert!(config.geocoding_url.ends_with("/geocode"));
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_development_config() {
        let config = ClientConfig::development();
        assert!(config.directory_url.contains("localhost"));
        assert_eq!(config.environment, Environment::Development);
    }

    #[test]
    fn test_builder_pattern() {
        let config = ClientConfig::default()
            .with_directory_url("https://test.carefind.dev")
            .with_region("br")
            .with_timeout(Duration::from_secs(60));

        assert_eq!(config.directory_url, "https://test.carefind.dev");
        assert_eq!(config.routing_url, "https://test.carefind.dev/directions");
        assert_eq!(config.region.as_deref(), Some("br"));
        assert_eq!(config.timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_validation() {
        let valid = ClientConfig::default();
        assert!(valid.validate().is_ok());

        let invalid = ClientConfig::default().with_directory_url("");
        assert!(invalid.validate().is_err());

        let not_http = ClientConfig::default().with_routing_url("ftp://example.com");
        assert!(not_http.validate().is_err());
    }
}
