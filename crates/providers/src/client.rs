//! HTTP client shared by the provider integrations.

use crate::config::ClientConfig;
use crate::directory::DirectoryApi;
use crate::error::ApiError;
use crate::geocoding::GeocodingApi;
use crate::routing::RoutingApi;
use carefind_core::retry::RetryConfig;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

/// Request correlation ID header.
const X_REQUEST_ID: &str = "X-Request-ID";

/// HTTP client for the Carefind upstream providers.
///
/// Wraps `reqwest` and adds:
/// - Request correlation IDs for tracing
/// - A shared timeout and JSON defaults
/// - Retry with exponential backoff for idempotent fetches
///
/// Routing and geocoding calls go through [`FinderClient::get_once`]; a
/// failed call there degrades or surfaces immediately rather than being
/// retried.
#[derive(Clone)]
pub struct FinderClient {
    inner: Client,
    config: Arc<ClientConfig>,
}

impl FinderClient {
    /// Create a new client with configuration from the environment.
    pub fn new() -> Result<Self, ApiError> {
        let config = ClientConfig::from_env()?;
        Self::with_config(config)
    }

    /// Create a new client with specific configuration.
    pub fn with_config(config: ClientConfig) -> Result<Self, ApiError> {
        config.validate()?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        default_headers.insert(
            USER_AGENT,
            HeaderValue::from_static("carefind-providers/0.3"),
        );

        let inner = Client::builder()
            .timeout(config.timeout)
            .default_headers(default_headers)
            .build()
            .map_err(ApiError::Request)?;

        Ok(Self {
            inner,
            config: Arc::new(config),
        })
    }

    /// The current configuration.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    // -------------------------------------------------------------------------
    // Provider API accessors
    // -------------------------------------------------------------------------

    /// Access the facility directory.
    #[must_use]
    pub fn directory(&self) -> DirectoryApi {
        DirectoryApi::new(self.clone())
    }

    /// Access the routing provider.
    #[must_use]
    pub fn routing(&self) -> RoutingApi {
        RoutingApi::new(self.clone())
    }

    /// Access the geocoding provider.
    #[must_use]
    pub fn geocoding(&self) -> GeocodingApi {
        GeocodingApi::new(self.clone())
    }

    // -------------------------------------------------------------------------
    // Low-level HTTP methods
    // -------------------------------------------------------------------------

    /// GET an absolute URL with the configured retry policy. Used for the
    /// idempotent directory fetch.
    #[instrument(skip(self), fields(request_id))]
    pub async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        self.get_with_retry(url, &self.config.retry).await
    }

    /// GET an absolute URL with a single attempt, no retry.
    #[instrument(skip(self), fields(request_id))]
    pub async fn get_once<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        self.get_with_retry(url, &RetryConfig::no_retry()).await
    }

    /// GET with an explicit retry policy.
    async fn get_with_retry<T: DeserializeOwned>(
        &self,
        url: &str,
        retry: &RetryConfig,
    ) -> Result<T, ApiError> {
        let request_id = Uuid::new_v4().to_string();
        let mut last_error: Option<ApiError> = None;

        for attempt in 0..retry.max_attempts {
            if attempt > 0 {
                let delay = retry.delay_for_attempt(attempt);
                debug!(
                    request_id = %request_id,
                    attempt = attempt,
                    delay_ms = delay.as_millis(),
                    "Retrying after delay"
                );
                tokio::time::sleep(delay).await;
            }

            let start = Instant::now();
            let result = self.execute_single_request(&request_id, url).await;
            let elapsed = start.elapsed();

            match result {
                Ok(value) => {
                    debug!(
                        request_id = %request_id,
                        attempt = attempt + 1,
                        elapsed_ms = elapsed.as_millis(),
                        "Request succeeded"
                    );
                    return Ok(value);
                }
                Err(e) => {
                    if e.is_retryable() && attempt + 1 < retry.max_attempts {
                        warn!(
                            request_id = %request_id,
                            attempt = attempt + 1,
                            error = %e,
                            "Request failed, will retry"
                        );
                        last_error = Some(e);
                    } else {
                        debug!(
                            request_id = %request_id,
                            attempt = attempt + 1,
                            error = %e,
                            "Request failed, not retrying"
                        );
                        return Err(e);
                    }
                }
            }
        }

        Err(ApiError::RetriesExhausted {
            attempts: retry.max_attempts,
            last_error: last_error.map_or_else(|| "Unknown error".to_string(), |e| e.to_string()),
        })
    }

    /// Execute a single GET without retry.
    async fn execute_single_request<T: DeserializeOwned>(
        &self,
        request_id: &str,
        url: &str,
    ) -> Result<T, ApiError> {
        let mut request = self.inner.get(url).header(X_REQUEST_ID, request_id);

        if let Some(ref key) = self.config.api_key {
            request = request.query(&[("key", key)]);
        }

        let response = request.send().await?;
        self.handle_response(response).await
    }

    /// Handle an HTTP response and deserialize the JSON body.
    async fn handle_response<T: DeserializeOwned>(&self, response: Response) -> Result<T, ApiError> {
        let status = response.status();

        if status.is_success() {
            response.json().await.map_err(ApiError::Request)
        } else {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            Err(ApiError::api_response(status.as_u16(), message))
        }
    }
}

/// Join a base URL and a path without doubling slashes.
pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}
