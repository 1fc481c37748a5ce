//! HTTP client for the unsigned upstream APIs (event discovery, flights).
//!
//! Provides:
//! - per-request timeouts
//! - exponential backoff with jitter on transient failures
//! - structured request logging with API keys redacted from URLs
//! - optional Prometheus outcome counters

use crate::services::AppMetrics;
use crate::utils::redact_query_secrets;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tokio_retry::{
    RetryIf,
    strategy::{ExponentialBackoff, jitter},
};
use tracing::{error, info, warn};
use url::Url;

/// Configuration for the upstream HTTP client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamClientConfig {
    /// Total timeout for one request attempt (in seconds)
    pub timeout_seconds: u64,

    /// Connection timeout (in seconds)
    pub connect_timeout_seconds: u64,

    pub retry: RetryConfig,

    /// Log every attempt, not only the final outcome
    pub enable_detailed_logging: bool,
}

/// Retry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Retries after the first attempt
    pub max_retries: usize,

    /// Base delay in milliseconds
    pub initial_delay_ms: u64,

    /// Maximum delay between attempts in milliseconds
    pub max_delay_ms: u64,

    /// Statuses treated as transient
    pub retry_on_status: Vec<u16>,
}

impl Default for UpstreamClientConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 10,
            connect_timeout_seconds: 3,
            retry: RetryConfig::default(),
            enable_detailed_logging: true,
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 2,
            initial_delay_ms: 100,
            max_delay_ms: 2000,
            retry_on_status: vec![408, 429, 500, 502, 503, 504],
        }
    }
}

/// Errors that can occur when calling an upstream API
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("Network error: {0}")]
    Network(reqwest::Error),

    #[error("Request timed out")]
    Timeout,

    #[error("Retryable status code: {0}")]
    RetryableStatus(u16),

    #[error("Upstream returned status {0}")]
    Status(u16),

    #[error("Invalid response body: {0}")]
    Decode(String),

    #[error("Invalid upstream URL: {0}")]
    InvalidUrl(String),
}

/// Request URLs carry API keys in the query string, so they never travel with the error
impl From<reqwest::Error> for UpstreamError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            UpstreamError::Decode(e.without_url().to_string())
        } else {
            UpstreamError::Network(e.without_url())
        }
    }
}

impl UpstreamError {
    /// Whether another attempt may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            UpstreamError::Network(_) | UpstreamError::Timeout | UpstreamError::RetryableStatus(_)
        )
    }

    /// Upstream HTTP status, when one was received
    pub fn status(&self) -> Option<u16> {
        match self {
            UpstreamError::RetryableStatus(status) | UpstreamError::Status(status) => Some(*status),
            _ => None,
        }
    }

    /// Get a user-friendly error message for API responses
    pub fn user_message(&self) -> String {
        match self {
            UpstreamError::Network(_) => {
                "Service temporarily unavailable due to network issues".to_string()
            }
            UpstreamError::Timeout => "Service temporarily unavailable due to timeout".to_string(),
            UpstreamError::RetryableStatus(status) => {
                format!("Service returned error status {status}, please try again")
            }
            UpstreamError::Status(status) => format!("Service returned error status {status}"),
            UpstreamError::Decode(_) => "Service returned an unreadable response".to_string(),
            UpstreamError::InvalidUrl(_) => "Service is misconfigured".to_string(),
        }
    }

    fn outcome_label(&self) -> &'static str {
        match self {
            UpstreamError::Network(_) => "network_error",
            UpstreamError::Timeout => "timeout",
            UpstreamError::RetryableStatus(_) => "retry_exhausted",
            UpstreamError::Status(_) => "http_error",
            UpstreamError::Decode(_) => "decode_error",
            UpstreamError::InvalidUrl(_) => "invalid_url",
        }
    }
}

/// JSON-over-HTTP client with timeouts and retries
#[derive(Clone)]
pub struct UpstreamClient {
    client: Client,
    config: UpstreamClientConfig,
    metrics: Option<AppMetrics>,
}

impl UpstreamClient {
    pub fn new(
        config: UpstreamClientConfig,
        metrics: Option<AppMetrics>,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            config,
            metrics,
        })
    }

    /// GET `url` with `params` appended to its query string and decode the JSON body
    pub async fn get_json(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<Value, UpstreamError> {
        let url = Url::parse_with_params(url, params)
            .map_err(|e| UpstreamError::InvalidUrl(e.to_string()))?;
        let destination = url.host_str().unwrap_or("unknown").to_string();
        let logged_url = redact_query_secrets(&url);
        let timeout = Duration::from_secs(self.config.timeout_seconds);

        let retry_strategy = ExponentialBackoff::from_millis(self.config.retry.initial_delay_ms)
            .max_delay(Duration::from_millis(self.config.retry.max_delay_ms))
            .map(jitter)
            .take(self.config.retry.max_retries);

        let result = RetryIf::spawn(
            retry_strategy,
            || self.attempt(url.clone(), &destination, &logged_url, timeout),
            UpstreamError::is_retryable,
        )
        .await;

        if let Some(metrics) = &self.metrics {
            let outcome = match &result {
                Ok(_) => "success",
                Err(e) => e.outcome_label(),
            };
            metrics.record_upstream_request(&destination, outcome);
        }

        result
    }

    /// One timed attempt; the timeout covers the body read as well as the headers
    async fn attempt(
        &self,
        url: Url,
        destination: &str,
        logged_url: &str,
        timeout: Duration,
    ) -> Result<Value, UpstreamError> {
        let detailed = self.config.enable_detailed_logging;
        let start = std::time::Instant::now();

        let outcome = match tokio::time::timeout(timeout, self.exchange(url)).await {
            Ok(outcome) => outcome,
            Err(_) => {
                if detailed {
                    warn!(
                        destination = %destination,
                        url = %logged_url,
                        timeout_seconds = timeout.as_secs(),
                        "Upstream request timed out"
                    );
                }
                return Err(UpstreamError::Timeout);
            }
        };
        let duration_ms = start.elapsed().as_millis();

        if detailed {
            match &outcome {
                Ok(_) => info!(
                    destination = %destination,
                    url = %logged_url,
                    duration_ms,
                    "Upstream request completed successfully"
                ),
                Err(UpstreamError::RetryableStatus(status) | UpstreamError::Status(status)) => {
                    warn!(
                        destination = %destination,
                        url = %logged_url,
                        status,
                        duration_ms,
                        "Upstream request failed with status"
                    )
                }
                Err(e) => error!(
                    destination = %destination,
                    url = %logged_url,
                    error = %e,
                    "Upstream request failed"
                ),
            }
        }

        outcome
    }

    async fn exchange(&self, url: Url) -> Result<Value, UpstreamError> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();

        if response.status().is_success() {
            return Ok(response.json::<Value>().await?);
        }

        if self.config.retry.retry_on_status.contains(&status) {
            Err(UpstreamError::RetryableStatus(status))
        } else {
            Err(UpstreamError::Status(status))
        }
    }
}
