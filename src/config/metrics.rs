//! Metrics configuration.

use std::env;

/// Controls what the Prometheus endpoint exposes
#[derive(Clone, Debug)]
pub struct MetricsConfig {
    pub enabled: bool,
    /// Count every hotel signature attempt by format and outcome
    pub track_signature_attempts: bool,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            track_signature_attempts: true,
        }
    }
}

impl MetricsConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let enabled = env::var("METRICS_ENABLED")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(true);

        let track_signature_attempts = env::var("METRICS_SIGNATURE_ATTEMPTS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(true);

        Self {
            enabled,
            track_signature_attempts,
        }
    }
}
