//! Retrying HTTP client for the provider API.

use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::Client;
use thiserror::Error;
use tracing::debug;

use huangpu_types::{DataTable, HuangpuError};

use crate::api::{ApiRequest, ApiResponse};

/// Default provider endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.tushare.pro";

/// Configuration for the provider client.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Provider endpoint URL.
    pub base_url: String,
    /// Access token sent with every request.
    pub token: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Maximum retry attempts for transient failures.
    pub max_retries: u32,
    /// Base delay for exponential backoff (in milliseconds).
    pub base_delay_ms: u64,
    /// Maximum delay between retries (in milliseconds).
    pub max_delay_ms: u64,
    /// User agent string.
    pub user_agent: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: String::new(),
            timeout: Duration::from_secs(60),
            max_retries: 5,
            base_delay_ms: 500,
            max_delay_ms: 30_000, // Max 30 seconds between retries
            user_agent: format!("huangpu/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ProviderConfig {
    /// Default configuration with the given access token.
    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            ..Self::default()
        }
    }
}

/// Errors that can occur while calling the provider.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server kept failing after all retries.
    #[error("server error: {status}")]
    ServerError {
        /// HTTP status code.
        status: u16,
    },

    /// Provider answered with a business error code.
    #[error("provider error {code}: {msg}")]
    Api {
        /// Provider status code.
        code: i64,
        /// Provider error message.
        msg: String,
    },

    /// Success response without a data payload.
    #[error("provider response carried no data")]
    MissingData,
}

impl From<ProviderError> for HuangpuError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Http(e) => Self::Http(e.to_string()),
            ProviderError::ServerError { status } => {
                Self::Http(format!("server error: {status}"))
            }
            ProviderError::Api { code, msg } => Self::Provider { code, msg },
            ProviderError::MissingData => {
                Self::Parse("provider response carried no data".to_string())
            }
        }
    }
}

/// HTTP client with connection pooling and retry logic.
#[derive(Debug, Clone)]
pub struct ProviderClient {
    client: Client,
    config: ProviderConfig,
}

impl ProviderClient {
    /// Creates a new provider client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: ProviderConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_nodelay(true)
            .tcp_keepalive(Duration::from_secs(60))
            .timeout(config.timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(&config.user_agent)
            .gzip(true)
            .build()?;
        Ok(Self { client, config })
    }

    /// Creates a client with default configuration and the given token.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_token(token: impl Into<String>) -> Result<Self, reqwest::Error> {
        Self::new(ProviderConfig::with_token(token))
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Calls one provider endpoint and normalizes the response.
    ///
    /// Retries server errors (5xx), rate limiting (429), and transient
    /// transport failures up to `max_retries` times before giving up.
    ///
    /// # Errors
    ///
    /// Returns an error if the request keeps failing after all retries, or
    /// if the provider answers with a business error.
    pub async fn call(
        &self,
        api_name: &str,
        params: &BTreeMap<String, String>,
        fields: &str,
    ) -> Result<DataTable, ProviderError> {
        let request = ApiRequest {
            api_name,
            token: &self.config.token,
            params,
            fields,
        };

        let mut attempts = 0;
        loop {
            let sent = self
                .client
                .post(&self.config.base_url)
                .json(&request)
                .send()
                .await;

            match sent {
                Ok(response) => {
                    if response.status().is_server_error()
                        || response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS
                    {
                        if attempts < self.config.max_retries {
                            attempts += 1;
                            let delay = self.backoff_delay(attempts);
                            debug!(api_name, attempts, ?delay, "retrying after server error");
                            tokio::time::sleep(delay).await;
                            continue;
                        }
                        return Err(ProviderError::ServerError {
                            status: response.status().as_u16(),
                        });
                    }

                    response.error_for_status_ref()?;
                    let body: ApiResponse = response.json().await?;
                    return body.into_table();
                }
                Err(e) if Self::is_retryable_error(&e) && attempts < self.config.max_retries => {
                    attempts += 1;
                    let delay = self.backoff_delay(attempts);
                    debug!(api_name, attempts, ?delay, "retrying after transport error");
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Calculates the backoff delay with exponential backoff and jitter.
    fn backoff_delay(&self, attempt: u32) -> Duration {
        let exp_delay = self
            .config
            .base_delay_ms
            .saturating_mul(1u64 << attempt.min(10));
        let capped_delay = exp_delay.min(self.config.max_delay_ms);

        // Deterministic jitter (±25%) keyed off the attempt number, so no
        // random number generator is needed.
        let jitter_range = capped_delay / 4;
        let jitter = if jitter_range > 0 {
            let jitter_offset = (u64::from(attempt) * 17) % (jitter_range * 2);
            jitter_offset.saturating_sub(jitter_range)
        } else {
            0
        };

        let final_delay = (capped_delay + jitter).max(100);
        Duration::from_millis(final_delay)
    }

    /// Determines if a transport error is worth retrying.
    fn is_retryable_error(error: &reqwest::Error) -> bool {
        if error.is_builder() {
            return false;
        }
        error.is_timeout() || error.is_connect() || error.is_request()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = ProviderConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.base_delay_ms, 500);
        assert_eq!(config.max_delay_ms, 30_000);
    }

    #[test]
    fn test_with_token_keeps_defaults() {
        let config = ProviderConfig::with_token("tok");
        assert_eq!(config.token, "tok");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[tokio::test]
    async fn test_client_creation() {
        let client = ProviderClient::with_token("tok");
        assert!(client.is_ok());
    }

    #[test]
    fn test_backoff_delay_calculation() {
        let client = ProviderClient::with_token("tok").unwrap();

        // First attempt: base_delay * 2 = 1000ms (plus jitter)
        let delay1 = client.backoff_delay(1);
        assert!(delay1.as_millis() >= 750 && delay1.as_millis() <= 1250);

        // Second attempt: base_delay * 4 = 2000ms (plus jitter)
        let delay2 = client.backoff_delay(2);
        assert!(delay2.as_millis() >= 1500 && delay2.as_millis() <= 2500);

        // High attempt count is capped at max_delay plus jitter.
        let delay_high = client.backoff_delay(20);
        assert!(delay_high.as_millis() <= 37_500);
    }
}
