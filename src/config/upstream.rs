//! Configuration for the upstream HTTP client
//!
//! Environment-based settings for the client used by the event-discovery
//! and flight-search integrations.

use crate::services::upstream_client::{RetryConfig, UpstreamClientConfig};
use std::env;

impl UpstreamClientConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let timeout_seconds = env::var("UPSTREAM_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);

        let connect_timeout_seconds = env::var("UPSTREAM_CONNECT_TIMEOUT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3);

        let enable_detailed_logging = env::var("UPSTREAM_DETAILED_LOGGING")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(true);

        Self {
            timeout_seconds,
            connect_timeout_seconds,
            retry: RetryConfig::from_env(),
            enable_detailed_logging,
        }
    }
}

impl RetryConfig {
    /// Load retry configuration from environment variables
    pub fn from_env() -> Self {
        let max_retries = env::var("UPSTREAM_RETRY_MAX_RETRIES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(2);

        let initial_delay_ms = env::var("UPSTREAM_RETRY_INITIAL_DELAY_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(100);

        let max_delay_ms = env::var("UPSTREAM_RETRY_MAX_DELAY_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(2000);

        // Comma-separated list, e.g. "429,503"
        let retry_on_status = env::var("UPSTREAM_RETRY_ON_STATUS")
            .ok()
            .map(|v| {
                v.split(',')
                    .filter_map(|s| s.trim().parse::<u16>().ok())
                    .collect()
            })
            .unwrap_or_else(|| vec![408, 429, 500, 502, 503, 504]);

        Self {
            max_retries,
            initial_delay_ms,
            max_delay_ms,
            retry_on_status,
        }
    }
}
