//! Hotel search API configuration.

use std::env;
use std::fmt;
use std::str::FromStr;

/// Default hotel availability endpoint (Hotelbeds test environment)
pub const DEFAULT_HOTELBEDS_URL: &str = "https://api.test.hotelbeds.com/hotel-api/1.0/hotels";

/// Granularity of the epoch timestamp mixed into request signatures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimestampUnit {
    #[default]
    Seconds,
    Milliseconds,
}

impl TimestampUnit {
    /// Capture the current epoch time in this unit, rendered as a decimal string
    pub fn now(self) -> String {
        let now = chrono::Utc::now();
        match self {
            TimestampUnit::Seconds => now.timestamp().to_string(),
            TimestampUnit::Milliseconds => now.timestamp_millis().to_string(),
        }
    }
}

impl FromStr for TimestampUnit {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "s" | "sec" | "seconds" => Ok(TimestampUnit::Seconds),
            "ms" | "millis" | "milliseconds" => Ok(TimestampUnit::Milliseconds),
            other => Err(format!("unknown timestamp unit '{other}'")),
        }
    }
}

/// Credentials and signing behavior for the hotel search integration
#[derive(Clone)]
pub struct HotelbedsConfig {
    pub api_key: String,
    pub api_secret: String,
    pub url: String,
    /// Skip the signature sweep and only try this named format
    pub forced_signature: Option<String>,
    pub timestamp_unit: TimestampUnit,
    pub attempt_timeout_seconds: u64,
    pub connect_timeout_seconds: u64,
}

impl fmt::Debug for HotelbedsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HotelbedsConfig")
            .field("api_key_set", &!self.api_key.is_empty())
            .field("api_secret_set", &!self.api_secret.is_empty())
            .field("url", &self.url)
            .field("forced_signature", &self.forced_signature)
            .field("timestamp_unit", &self.timestamp_unit)
            .field("attempt_timeout_seconds", &self.attempt_timeout_seconds)
            .field("connect_timeout_seconds", &self.connect_timeout_seconds)
            .finish()
    }
}

impl Default for HotelbedsConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_secret: String::new(),
            url: DEFAULT_HOTELBEDS_URL.to_string(),
            forced_signature: None,
            timestamp_unit: TimestampUnit::Seconds,
            attempt_timeout_seconds: 8,
            connect_timeout_seconds: 3,
        }
    }
}

impl HotelbedsConfig {
    /// Both halves of the credential pair are set
    pub fn has_credentials(&self) -> bool {
        !self.api_key.trim().is_empty() && !self.api_secret.trim().is_empty()
    }

    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let api_key = env::var("HOTELBEDS_API_KEY").unwrap_or_default();
        let api_secret = env::var("HOTELBEDS_API_SECRET").unwrap_or_default();

        let url = env::var("HOTELBEDS_URL").unwrap_or_else(|_| DEFAULT_HOTELBEDS_URL.to_string());

        let forced_signature = env::var("HOTELBEDS_SIGNATURE_FORMAT")
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        let timestamp_unit = env::var("HOTELBEDS_TIMESTAMP_UNIT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_default();

        let attempt_timeout_seconds = env::var("HOTELBEDS_ATTEMPT_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(8);

        let connect_timeout_seconds = env::var("HOTELBEDS_CONNECT_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3);

        Self {
            api_key,
            api_secret,
            url,
            forced_signature,
            timestamp_unit,
            attempt_timeout_seconds,
            connect_timeout_seconds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: [&str; 7] = [
        "HOTELBEDS_API_KEY",
        "HOTELBEDS_API_SECRET",
        "HOTELBEDS_URL",
        "HOTELBEDS_SIGNATURE_FORMAT",
        "HOTELBEDS_TIMESTAMP_UNIT",
        "HOTELBEDS_ATTEMPT_TIMEOUT_SECONDS",
        "HOTELBEDS_CONNECT_TIMEOUT_SECONDS",
    ];

    fn clear_vars() {
        for var in VARS {
            unsafe {
                env::remove_var(var);
            }
        }
    }

    #[test]
    fn test_defaults_without_environment() {
        let _lock = ENV_MUTEX.lock().unwrap();
        clear_vars();

        let config = HotelbedsConfig::from_env();
        assert!(config.api_key.is_empty());
        assert!(config.api_secret.is_empty());
        assert_eq!(config.url, DEFAULT_HOTELBEDS_URL);
        assert_eq!(config.forced_signature, None);
        assert_eq!(config.timestamp_unit, TimestampUnit::Seconds);
        assert_eq!(config.attempt_timeout_seconds, 8);
    }

    #[test]
    fn test_from_env() {
        let _lock = ENV_MUTEX.lock().unwrap();
        clear_vars();
        unsafe {
            env::set_var("HOTELBEDS_API_KEY", "key");
            env::set_var("HOTELBEDS_API_SECRET", "secret");
            env::set_var("HOTELBEDS_SIGNATURE_FORMAT", "sha256:apiKey+secret+timestamp");
            env::set_var("HOTELBEDS_TIMESTAMP_UNIT", "milliseconds");
            env::set_var("HOTELBEDS_ATTEMPT_TIMEOUT_SECONDS", "2");
        }

        let config = HotelbedsConfig::from_env();
        assert_eq!(config.api_key, "key");
        assert_eq!(config.api_secret, "secret");
        assert_eq!(
            config.forced_signature.as_deref(),
            Some("sha256:apiKey+secret+timestamp")
        );
        assert_eq!(config.timestamp_unit, TimestampUnit::Milliseconds);
        assert_eq!(config.attempt_timeout_seconds, 2);

        clear_vars();
    }

    #[test]
    fn test_blank_forced_signature_is_ignored() {
        let _lock = ENV_MUTEX.lock().unwrap();
        clear_vars();
        unsafe {
            env::set_var("HOTELBEDS_SIGNATURE_FORMAT", "   ");
        }

        assert_eq!(HotelbedsConfig::from_env().forced_signature, None);

        clear_vars();
    }

    #[test]
    fn test_timestamp_unit_parsing() {
        assert_eq!("seconds".parse(), Ok(TimestampUnit::Seconds));
        assert_eq!("MS".parse(), Ok(TimestampUnit::Milliseconds));
        assert!("fortnights".parse::<TimestampUnit>().is_err());
    }

    #[test]
    fn test_timestamp_unit_granularity() {
        let seconds = TimestampUnit::Seconds.now();
        let millis = TimestampUnit::Milliseconds.now();
        assert_eq!(seconds.len(), 10);
        assert_eq!(millis.len(), 13);
    }

    #[test]
    fn test_debug_hides_credentials() {
        let config = HotelbedsConfig {
            api_key: "visible-key".to_string(),
            api_secret: "visible-secret".to_string(),
            ..Default::default()
        };
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("visible-key"));
        assert!(!rendered.contains("visible-secret"));
    }
}
