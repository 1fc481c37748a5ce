//! Event-discovery and flight-search provider configuration.

use std::env;

pub const DEFAULT_TICKETMASTER_BASE_URL: &str = "https://app.ticketmaster.com/discovery/v2";
pub const DEFAULT_SERPAPI_BASE_URL: &str = "https://serpapi.com/search.json";

/// Configuration for the Ticketmaster Discovery API
#[derive(Clone, Debug)]
pub struct TicketmasterConfig {
    pub api_key: String,
    pub base_url: String,
}

impl Default for TicketmasterConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_TICKETMASTER_BASE_URL.to_string(),
        }
    }
}

impl TicketmasterConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            api_key: env::var("TM_API_KEY").unwrap_or_default(),
            base_url: env::var("TICKETMASTER_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_TICKETMASTER_BASE_URL.to_string()),
        }
    }
}

/// Configuration for the SerpApi Google Flights engine
#[derive(Clone, Debug)]
pub struct SerpApiConfig {
    pub api_key: String,
    pub base_url: String,
}

impl Default for SerpApiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_SERPAPI_BASE_URL.to_string(),
        }
    }
}

impl SerpApiConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            api_key: env::var("SERPAPI_API_KEY").unwrap_or_default(),
            base_url: env::var("SERPAPI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_SERPAPI_BASE_URL.to_string()),
        }
    }
}
